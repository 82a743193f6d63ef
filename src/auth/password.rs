use crate::config;

/// Hash a plaintext password with the configured bcrypt cost.
pub fn hash(plain: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, config::config().security.bcrypt_cost)
}

/// Verify a plaintext password against a stored bcrypt hash.
pub fn verify(plain: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plain, hashed)
}
