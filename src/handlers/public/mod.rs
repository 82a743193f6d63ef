pub mod auth;
pub mod categories;
pub mod comments;
pub mod subcategories;
pub mod tags;
pub mod videos;
