//! Category tree service
//!
//! Categories live in one self-referencing table. A node's depth is derived
//! from its parent on creation and never changes, since nodes cannot be
//! moved.

use shared::{
    Category, CategoryDetail, CategoryFilter, CreateCategoryInput, UpdateCategoryInput,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

const CATEGORY_DETAIL_SELECT: &str = r#"
    SELECT c.id, c.name, c.parent_id, c.depth, c.created_at, c.updated_at,
           (SELECT COUNT(*) FROM categories sub WHERE sub.parent_id = c.id) AS sub_categories_count,
           (SELECT COUNT(*) FROM skus s WHERE s.category_id = c.id) AS skus_count
    FROM categories c
"#;

/// Category service for the product tree
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
    max_depth: i32,
}

impl CategoryService {
    /// Create a new CategoryService instance; `max_depth` is the number of
    /// levels allowed
    pub fn new(db: PgPool, max_depth: i32) -> Self {
        Self { db, max_depth }
    }

    /// Get a category with its child and SKU counts
    pub async fn get_category(&self, category_id: Uuid) -> AppResult<CategoryDetail> {
        let query = format!("{} WHERE c.id = $1", CATEGORY_DETAIL_SELECT);
        sqlx::query_as::<_, CategoryDetail>(&query)
            .bind(category_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Category", category_id))
    }

    /// List the children of `filter.parent_id`, or the roots
    pub async fn list_categories(&self, filter: &CategoryFilter) -> AppResult<Vec<CategoryDetail>> {
        let query = format!(
            r#"{}
            WHERE c.parent_id IS NOT DISTINCT FROM $1
            ORDER BY c.name ASC
            "#,
            CATEGORY_DETAIL_SELECT
        );
        let categories = sqlx::query_as::<_, CategoryDetail>(&query)
            .bind(filter.parent_id)
            .fetch_all(&self.db)
            .await?;

        Ok(categories)
    }

    /// Direct children of an existing category
    pub async fn get_children(&self, category_id: Uuid) -> AppResult<Vec<CategoryDetail>> {
        self.get_category(category_id).await?;
        self.list_categories(&CategoryFilter {
            parent_id: Some(category_id),
        })
        .await
    }

    /// Create a category under an optional parent
    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<CategoryDetail> {
        input.validate()?;

        let parent_depth = match input.parent_id {
            Some(parent_id) => Some(self.get_category(parent_id).await?.category.depth),
            None => None,
        };
        let depth = child_depth(parent_depth, self.max_depth)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id, depth)
            VALUES ($1, $2, $3)
            RETURNING id, name, parent_id, depth, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.parent_id)
        .bind(depth)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(category_id = %category.id, depth, "Category created");

        Ok(CategoryDetail {
            category,
            sub_categories_count: 0,
            skus_count: 0,
        })
    }

    /// Rename a category
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> AppResult<CategoryDetail> {
        input.validate()?;

        let result = sqlx::query("UPDATE categories SET name = $1, updated_at = NOW() WHERE id = $2")
            .bind(input.name.trim())
            .bind(category_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category", category_id));
        }

        self.get_category(category_id).await
    }

    /// Delete a category with no children and no SKUs
    pub async fn delete_category(&self, category_id: Uuid) -> AppResult<()> {
        let detail = self.get_category(category_id).await?;
        ensure_deletable(&detail)?;

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::restricted_delete(e, "category", "Cannot delete category: it has sub-categories or SKUs"))?;

        tracing::info!(category_id = %category_id, "Category deleted");

        Ok(())
    }
}

/// Depth of a new node under a parent at `parent_depth` (roots when `None`).
///
/// Roots sit at depth 0, so `max_depth` levels means depths below
/// `max_depth`.
pub fn child_depth(parent_depth: Option<i32>, max_depth: i32) -> AppResult<i32> {
    let depth = parent_depth.map_or(0, |d| d + 1);
    if depth >= max_depth {
        return Err(AppError::validation(
            "parent_id",
            format!("Categories cannot be nested more than {} levels deep", max_depth),
        ));
    }
    Ok(depth)
}

/// Refuse to delete a node that still has children or SKUs
pub fn ensure_deletable(detail: &CategoryDetail) -> AppResult<()> {
    if detail.sub_categories_count > 0 {
        return Err(AppError::DependencyConflict {
            resource: "category".to_string(),
            dependents: detail.sub_categories_count,
            message: format!(
                "Cannot delete category: {} sub-categories are linked to it",
                detail.sub_categories_count
            ),
        });
    }

    if detail.skus_count > 0 {
        return Err(AppError::DependencyConflict {
            resource: "category".to_string(),
            dependents: detail.skus_count,
            message: format!("Cannot delete category: {} SKUs are linked to it", detail.skus_count),
        });
    }

    Ok(())
}
