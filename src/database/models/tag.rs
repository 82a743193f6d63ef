use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::{is_valid_slug, slugify};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub slug: Option<String>,
}

impl CreateTagRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.name.trim().is_empty() || self.name.len() > 50 {
            field_errors.insert(
                "name".to_string(),
                "Name must be between 1 and 50 characters".to_string(),
            );
        }
        if let Some(slug) = &self.slug {
            if !is_valid_slug(slug) {
                field_errors.insert(
                    "slug".to_string(),
                    "Slug may only contain lowercase letters, digits, and hyphens".to_string(),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid tag payload", Some(field_errors)))
        }
    }

    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl UpdateTagRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() || name.len() > 50 {
                field_errors.insert(
                    "name".to_string(),
                    "Name must be between 1 and 50 characters".to_string(),
                );
            }
        }
        if let Some(slug) = &self.slug {
            if !is_valid_slug(slug) {
                field_errors.insert(
                    "slug".to_string(),
                    "Slug may only contain lowercase letters, digits, and hyphens".to_string(),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid tag payload", Some(field_errors)))
        }
    }
}
