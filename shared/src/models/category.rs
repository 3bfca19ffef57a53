//! Category tree models
//!
//! Categories form a single self-referencing tree. Roots have depth 0 and
//! each child sits one level below its parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

/// A node in the category tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category with the counts that guard its deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategoryDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub category: Category,
    pub sub_categories_count: i64,
    pub skus_count: i64,
}

impl CategoryDetail {
    /// A node can be removed only when nothing hangs off it
    pub fn is_deletable(&self) -> bool {
        self.sub_categories_count == 0 && self.skus_count == 0
    }
}

/// Input for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    /// Omit to create a root category
    pub parent_id: Option<Uuid>,
}

/// Input for renaming a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
}

/// Filter for listing categories
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFilter {
    /// Children of this node; roots when absent
    pub parent_id: Option<Uuid>,
}
