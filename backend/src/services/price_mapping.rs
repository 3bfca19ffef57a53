//! Price mapping read path
//!
//! Joins stored mappings with their SKU and vendor and resolves the
//! location label through the resolver chain.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{PaginatedResponse, Pagination, PriceMappingFilter, PriceMappingView, UnitKind};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::location_resolver::LocationResolverChain;
use crate::error::{AppError, AppResult};
use crate::store::PgStore;

const VIEW_SELECT: &str = r#"
    SELECT pm.id, pm.sku_id, s.name AS sku_name, s.brand, s.unit, s.unit_value,
           pm.vendor_id, v.name AS vendor_name, pm.location_id,
           pm.price, pm.struck_price, pm.is_discounted, pm.unit_price, pm.currency,
           pm.created_at, pm.updated_at
    FROM price_mappings pm
    JOIN skus s ON s.id = pm.sku_id
    JOIN vendors v ON v.id = pm.vendor_id
"#;

const FILTER_CLAUSE: &str = r#"
    WHERE ($1::uuid IS NULL OR pm.sku_id = $1)
      AND ($2::uuid IS NULL OR pm.vendor_id = $2)
      AND ($3::uuid IS NULL OR pm.location_id = $3)
"#;

/// Mapping joined with SKU and vendor, before the location is resolved
#[derive(Debug, FromRow)]
struct PriceMappingRow {
    id: Uuid,
    sku_id: Uuid,
    sku_name: String,
    brand: Option<String>,
    unit: UnitKind,
    unit_value: String,
    vendor_id: Uuid,
    vendor_name: String,
    location_id: Uuid,
    price: Decimal,
    struck_price: Option<Decimal>,
    is_discounted: bool,
    unit_price: Decimal,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PriceMappingRow {
    fn into_view(self, location_name: String) -> PriceMappingView {
        PriceMappingView {
            id: self.id,
            sku_id: self.sku_id,
            sku_name: self.sku_name,
            brand: self.brand,
            unit: self.unit,
            unit_value: self.unit_value,
            vendor_id: self.vendor_id,
            vendor_name: self.vendor_name,
            location_id: self.location_id,
            location_name,
            price: self.price,
            struck_price: self.struck_price,
            is_discounted: self.is_discounted,
            unit_price: self.unit_price,
            currency: self.currency,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Read and delete operations on price mappings
#[derive(Clone)]
pub struct PriceMappingService {
    db: PgPool,
    locations: Arc<LocationResolverChain>,
}

impl PriceMappingService {
    /// Create a new PriceMappingService instance
    pub fn new(db: PgPool) -> Self {
        let locations = LocationResolverChain::standard(PgStore::new(db.clone()));
        Self {
            db,
            locations: Arc::new(locations),
        }
    }

    /// List mappings matching the filter, newest first
    pub async fn list_price_mappings(
        &self,
        filter: &PriceMappingFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<PriceMappingView>> {
        let count_query = format!(
            "SELECT COUNT(*) FROM price_mappings pm {}",
            FILTER_CLAUSE
        );
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(filter.sku_id)
            .bind(filter.vendor_id)
            .bind(filter.location_id)
            .fetch_one(&self.db)
            .await?;

        let query = format!(
            "{} {} ORDER BY pm.updated_at DESC, pm.id ASC LIMIT $4 OFFSET $5",
            VIEW_SELECT, FILTER_CLAUSE
        );
        let rows = sqlx::query_as::<_, PriceMappingRow>(&query)
            .bind(filter.sku_id)
            .bind(filter.vendor_id)
            .bind(filter.location_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.db)
            .await?;

        let views = self.resolve_views(rows).await;
        Ok(PaginatedResponse::new(views, pagination, total.max(0) as u64))
    }

    /// Get one mapping by ID
    pub async fn get_price_mapping(&self, mapping_id: Uuid) -> AppResult<PriceMappingView> {
        let query = format!("{} WHERE pm.id = $1", VIEW_SELECT);
        let row = sqlx::query_as::<_, PriceMappingRow>(&query)
            .bind(mapping_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Price mapping", mapping_id))?;

        let location_name = self.locations.resolve(row.location_id).await;
        Ok(row.into_view(location_name))
    }

    /// Every price recorded for a SKU, cheapest unit price first
    pub async fn prices_for_sku(&self, sku_id: Uuid) -> AppResult<Vec<PriceMappingView>> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM skus WHERE id = $1)")
            .bind(sku_id)
            .fetch_one(&self.db)
            .await?;

        if !exists {
            return Err(AppError::not_found("SKU", sku_id));
        }

        let query = format!(
            "{} WHERE pm.sku_id = $1 ORDER BY pm.unit_price ASC, pm.price ASC, v.name ASC",
            VIEW_SELECT
        );
        let rows = sqlx::query_as::<_, PriceMappingRow>(&query)
            .bind(sku_id)
            .fetch_all(&self.db)
            .await?;

        Ok(self.resolve_views(rows).await)
    }

    /// Delete a mapping by ID
    pub async fn delete_price_mapping(&self, mapping_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM price_mappings WHERE id = $1")
            .bind(mapping_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Price mapping", mapping_id));
        }

        tracing::info!(price_mapping_id = %mapping_id, "Price mapping deleted");

        Ok(())
    }

    /// Resolve each distinct location once per batch
    async fn resolve_views(&self, rows: Vec<PriceMappingRow>) -> Vec<PriceMappingView> {
        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut views = Vec::with_capacity(rows.len());

        for row in rows {
            let name = match names.get(&row.location_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.locations.resolve(row.location_id).await;
                    names.insert(row.location_id, name.clone());
                    name
                }
            };
            views.push(row.into_view(name));
        }

        views
    }
}
