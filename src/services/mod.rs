pub mod activity;
pub mod categories;
pub mod channels;
pub mod comments;
pub mod ratings;
pub mod subcategories;
pub mod tags;
pub mod users;
pub mod videos;

pub use activity::ActivityService;
pub use categories::CategoryService;
pub use channels::ChannelService;
pub use comments::CommentService;
pub use ratings::RatingService;
pub use subcategories::SubcategoryService;
pub use tags::TagService;
pub use users::UserService;
pub use videos::VideoService;

use crate::database::manager::DatabaseError;

/// Shared error type for the storage layer. Every service uses this one enum
/// so constraint violations map to the same HTTP classes everywhere.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database manager error: {0}")]
    Manager(#[from] DatabaseError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        classify_db_error(e)
    }
}

/// Translate PostgreSQL constraint violations into the conflict class;
/// everything else stays a generic database error (500 at the API layer).
fn classify_db_error(e: sqlx::Error) -> ServiceError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unique constraint");
                return ServiceError::Conflict(format!("Duplicate value for {}", constraint));
            }
            // foreign_key_violation
            Some("23503") => {
                return ServiceError::Conflict(
                    "Operation violates a reference to another row".to_string(),
                );
            }
            _ => {}
        }
    }
    ServiceError::Database(e)
}
