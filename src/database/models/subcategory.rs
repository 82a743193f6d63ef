use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::category::{validate_name, validate_slug};
use super::slugify;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subcategory {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubcategoryRequest {
    pub name: String,
    pub slug: Option<String>,
    pub category_id: i32,
}

impl CreateSubcategoryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_name(&self.name, &mut field_errors);
        if let Some(slug) = &self.slug {
            validate_slug(slug, &mut field_errors);
        }
        if self.category_id <= 0 {
            field_errors.insert(
                "category_id".to_string(),
                "A parent category is required".to_string(),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid subcategory payload", Some(field_errors)))
        }
    }

    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubcategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<i32>,
}

impl UpdateSubcategoryRequest {
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
            Err(ApiError::validation_error("Invalid subcategory payload", Some(field_errors)))
        }
    }
}
