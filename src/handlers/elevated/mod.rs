pub mod activity;
pub mod categories;
pub mod channels;
pub mod import;
pub mod subcategories;
pub mod tags;
pub mod users;
pub mod videos;
