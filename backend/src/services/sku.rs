//! SKU catalog service

use shared::{
    buying_price_without_vat, clean_name, clean_optional, CreateSkuInput, PaginatedResponse,
    Pagination, Sku, SkuDetail, SkuFilter, UpdateSkuInput,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

const SKU_DETAIL_SELECT: &str = r#"
    SELECT s.id, s.name, s.brand, s.unit, s.unit_value, s.category_id, s.buying_price,
           s.buying_vat, s.buying_price_without_vat, s.selling_price, s.kvi_label,
           s.image_url, s.created_at, s.updated_at,
           c.name AS category_name
    FROM skus s
    LEFT JOIN categories c ON c.id = s.category_id
"#;

/// SKU service for managing product definitions
#[derive(Clone)]
pub struct SkuService {
    db: PgPool,
}

impl SkuService {
    /// Create a new SkuService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a SKU with its category name
    pub async fn get_sku(&self, sku_id: Uuid) -> AppResult<SkuDetail> {
        let query = format!("{} WHERE s.id = $1", SKU_DETAIL_SELECT);
        sqlx::query_as::<_, SkuDetail>(&query)
            .bind(sku_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("SKU", sku_id))
    }

    /// List SKUs, optionally by category or matching a search term
    pub async fn list_skus(
        &self,
        filter: &SkuFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<SkuDetail>> {
        let search = filter
            .search
            .as_deref()
            .and_then(clean_name)
            .map(|term| format!("%{}%", term));

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM skus s
            WHERE ($1::uuid IS NULL OR s.category_id = $1)
              AND ($2::text IS NULL OR s.name ILIKE $2 OR s.brand ILIKE $2)
            "#,
        )
        .bind(filter.category_id)
        .bind(&search)
        .fetch_one(&self.db)
        .await?;

        let query = format!(
            r#"{}
            WHERE ($1::uuid IS NULL OR s.category_id = $1)
              AND ($2::text IS NULL OR s.name ILIKE $2 OR s.brand ILIKE $2)
            ORDER BY s.name ASC
            LIMIT $3 OFFSET $4
            "#,
            SKU_DETAIL_SELECT
        );
        let skus = sqlx::query_as::<_, SkuDetail>(&query)
            .bind(filter.category_id)
            .bind(&search)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.db)
            .await?;

        Ok(PaginatedResponse::new(skus, pagination, total.max(0) as u64))
    }

    /// Create a new SKU
    pub async fn create_sku(&self, input: CreateSkuInput) -> AppResult<SkuDetail> {
        input.validate()?;

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        let net_price = buying_price_without_vat(input.buying_price, input.buying_vat);

        let sku_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO skus (name, brand, unit, unit_value, category_id, buying_price, buying_vat,
                              buying_price_without_vat, selling_price, kvi_label, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(clean_optional(input.brand))
        .bind(input.unit)
        .bind(input.unit_value.trim())
        .bind(input.category_id)
        .bind(input.buying_price)
        .bind(input.buying_vat)
        .bind(net_price)
        .bind(input.selling_price)
        .bind(clean_optional(input.kvi_label))
        .bind(clean_optional(input.image_url))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(sku_id = %sku_id, "SKU created");

        self.get_sku(sku_id).await
    }

    /// Update a SKU; the net buying price follows any change to the buying
    /// price or VAT
    pub async fn update_sku(&self, sku_id: Uuid, input: UpdateSkuInput) -> AppResult<SkuDetail> {
        input.validate()?;

        let existing = self.get_sku(sku_id).await?.sku;

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        let merged = merge_sku(existing, input);

        sqlx::query(
            r#"
            UPDATE skus
            SET name = $1, brand = $2, unit = $3, unit_value = $4, category_id = $5,
                buying_price = $6, buying_vat = $7, buying_price_without_vat = $8,
                selling_price = $9, kvi_label = $10, image_url = $11, updated_at = NOW()
            WHERE id = $12
            "#,
        )
        .bind(&merged.name)
        .bind(&merged.brand)
        .bind(merged.unit)
        .bind(&merged.unit_value)
        .bind(merged.category_id)
        .bind(merged.buying_price)
        .bind(merged.buying_vat)
        .bind(merged.buying_price_without_vat)
        .bind(merged.selling_price)
        .bind(&merged.kvi_label)
        .bind(&merged.image_url)
        .bind(sku_id)
        .execute(&self.db)
        .await?;

        self.get_sku(sku_id).await
    }

    /// Delete a SKU that no price mapping references
    pub async fn delete_sku(&self, sku_id: Uuid) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM skus WHERE id = $1)")
            .bind(sku_id)
            .fetch_one(&self.db)
            .await?;

        if !exists {
            return Err(AppError::not_found("SKU", sku_id));
        }

        let mapping_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_mappings WHERE sku_id = $1")
                .bind(sku_id)
                .fetch_one(&self.db)
                .await?;

        if mapping_count > 0 {
            return Err(AppError::DependencyConflict {
                resource: "sku".to_string(),
                dependents: mapping_count,
                message: format!("Cannot delete SKU: {} price mappings reference it", mapping_count),
            });
        }

        sqlx::query("DELETE FROM skus WHERE id = $1")
            .bind(sku_id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::restricted_delete(e, "sku", "Cannot delete SKU: price mappings reference it"))?;

        tracing::info!(sku_id = %sku_id, "SKU deleted");

        Ok(())
    }

    async fn ensure_category(&self, category_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.db)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found("Category", category_id))
        }
    }
}

/// Apply a partial update to a stored SKU, recomputing the net buying price
pub fn merge_sku(mut sku: Sku, input: UpdateSkuInput) -> Sku {
    let price_changed = input.buying_price.is_some() || input.buying_vat.is_some();

    if let Some(name) = input.name.as_deref().and_then(clean_name) {
        sku.name = name;
    }
    if input.brand.is_some() {
        sku.brand = clean_optional(input.brand);
    }
    if let Some(unit) = input.unit {
        sku.unit = unit;
    }
    if let Some(unit_value) = input.unit_value.as_deref().and_then(clean_name) {
        sku.unit_value = unit_value;
    }
    if input.category_id.is_some() {
        sku.category_id = input.category_id;
    }
    if let Some(buying_price) = input.buying_price {
        sku.buying_price = buying_price;
    }
    if let Some(buying_vat) = input.buying_vat {
        sku.buying_vat = buying_vat;
    }
    if let Some(selling_price) = input.selling_price {
        sku.selling_price = selling_price;
    }
    if input.kvi_label.is_some() {
        sku.kvi_label = clean_optional(input.kvi_label);
    }
    if input.image_url.is_some() {
        sku.image_url = clean_optional(input.image_url);
    }

    if price_changed {
        sku.buying_price_without_vat = buying_price_without_vat(sku.buying_price, sku.buying_vat);
    }

    sku
}
