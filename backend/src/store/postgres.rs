//! PostgreSQL implementation of the storage seams

use async_trait::async_trait;
use shared::{Location, PriceMappingWrite, Sku, UpsertAction, UpsertOutcome};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{CatalogRepository, LocationDirectory, PriceMappingRepository};
use crate::error::AppResult;

/// Store backed by the shared connection pool
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

/// Row returned by the upsert statement
#[derive(Debug, FromRow)]
struct UpsertRow {
    id: Uuid,
    inserted: bool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl CatalogRepository for PgStore {
    async fn find_sku(&self, id: Uuid) -> AppResult<Option<Sku>> {
        let sku = sqlx::query_as::<_, Sku>(
            r#"
            SELECT id, name, brand, unit, unit_value, category_id, buying_price, buying_vat,
                   buying_price_without_vat, selling_price, kvi_label, image_url,
                   created_at, updated_at
            FROM skus
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(sku)
    }

    async fn vendor_exists(&self, id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(exists)
    }

    async fn price_location_exists(&self, id: Uuid) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM price_locations WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl PriceMappingRepository for PgStore {
    async fn upsert_price_mapping(&self, write: &PriceMappingWrite) -> AppResult<UpsertOutcome> {
        // xmax is 0 only on a freshly inserted tuple
        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO price_mappings (
                sku_id, vendor_id, location_id, price, struck_price, is_discounted,
                unit_price, currency
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (sku_id, vendor_id, location_id) DO UPDATE
            SET price = EXCLUDED.price,
                struck_price = EXCLUDED.struck_price,
                is_discounted = EXCLUDED.is_discounted,
                unit_price = EXCLUDED.unit_price,
                currency = EXCLUDED.currency,
                updated_at = NOW()
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(write.key.sku_id)
        .bind(write.key.vendor_id)
        .bind(write.key.location_id)
        .bind(write.price)
        .bind(write.struck_price)
        .bind(write.is_discounted)
        .bind(write.unit_price)
        .bind(&write.currency)
        .fetch_one(&self.db)
        .await?;

        Ok(UpsertOutcome {
            id: row.id,
            action: if row.inserted {
                UpsertAction::Created
            } else {
                UpsertAction::Updated
            },
        })
    }
}

#[async_trait]
impl LocationDirectory for PgStore {
    async fn price_location_name(&self, id: Uuid) -> AppResult<Option<String>> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM price_locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(name)
    }

    async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, region, city, district, population_tier, income_band,
                   created_at, updated_at
            FROM locations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(location)
    }
}
