use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::{is_valid_slug, slugify};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// Derived from the name when omitted.
    pub slug: Option<String>,
    pub parent_id: Option<i32>,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_name(&self.name, &mut field_errors);
        if let Some(slug) = &self.slug {
            validate_slug(slug, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid category payload", Some(field_errors)))
        }
    }

    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<i32>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(name) = &self.name {
            validate_name(name, &mut field_errors);
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid category payload", Some(field_errors)))
        }
    }
}

pub(super) fn validate_name(name: &str, field_errors: &mut HashMap<String, String>) {
    if name.trim().is_empty() || name.len() > 100 {
        field_errors.insert(
            "name".to_string(),
            "Name must be between 1 and 100 characters".to_string(),
        );
    }
}

pub(super) fn validate_slug(slug: &str, field_errors: &mut HashMap<String, String>) {
    if !is_valid_slug(slug) {
        field_errors.insert(
            "slug".to_string(),
            "Slug may only contain lowercase letters, digits, and hyphens".to_string(),
        );
    }
}
