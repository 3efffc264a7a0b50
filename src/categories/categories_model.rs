use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::categories::{CategoryError, Result};

/// Database model for a user-scoped category. Categories form a best-effort
/// registry next to the denormalized strings stored on each expense; nothing
/// forces an expense's category string to match a row here.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Database model for a subcategory, unique per (user, category, name)
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::subcategories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(belongs_to(Category))]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub user_id: String,
    pub name: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::InvalidData(
                "Category name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for creating a new subcategory. The parent is addressed by
/// name and resolved against the user's categories at save time.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSubcategory {
    pub user_id: String,
    pub category_name: String,
    pub name: String,
}

impl NewSubcategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::InvalidData(
                "Subcategory name cannot be empty".to_string(),
            ));
        }
        if self.category_name.trim().is_empty() {
            return Err(CategoryError::InvalidData(
                "Parent category name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
