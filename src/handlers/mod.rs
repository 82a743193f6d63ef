// Three security tiers, mirrored in the module tree:
// public (no auth) -> protected (JWT auth) -> elevated (JWT + admin claim)
pub mod elevated;
pub mod protected;
pub mod public;
