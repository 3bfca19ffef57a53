//! Location services
//!
//! Price locations are the keys price mappings are stored against. Full
//! locations hold regional metadata and are only read by the price views
//! when an older mapping points at one.

use shared::{
    clean_name, clean_optional, CreateLocationInput, Location, PaginatedResponse, Pagination,
    PriceLocation, PriceLocationInput, UpdateLocationInput,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

const LOCATION_COLUMNS: &str =
    "id, name, region, city, district, population_tier, income_band, created_at, updated_at";

/// Location service for price locations and full locations
#[derive(Clone)]
pub struct LocationService {
    db: PgPool,
}

impl LocationService {
    /// Create a new LocationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Price locations
    // ========================================================================

    /// Get a price location by ID
    pub async fn get_price_location(&self, location_id: Uuid) -> AppResult<PriceLocation> {
        sqlx::query_as::<_, PriceLocation>(
            "SELECT id, name, created_at, updated_at FROM price_locations WHERE id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Location", location_id))
    }

    /// List price locations by name
    pub async fn list_price_locations(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<PriceLocation>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_locations")
            .fetch_one(&self.db)
            .await?;

        let locations = sqlx::query_as::<_, PriceLocation>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM price_locations
            ORDER BY name ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(locations, pagination, total.max(0) as u64))
    }

    /// Create a price location
    pub async fn create_price_location(&self, input: PriceLocationInput) -> AppResult<PriceLocation> {
        input.validate()?;

        let location = sqlx::query_as::<_, PriceLocation>(
            r#"
            INSERT INTO price_locations (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(location_id = %location.id, "Price location created");

        Ok(location)
    }

    /// Rename a price location
    pub async fn update_price_location(
        &self,
        location_id: Uuid,
        input: PriceLocationInput,
    ) -> AppResult<PriceLocation> {
        input.validate()?;

        sqlx::query_as::<_, PriceLocation>(
            r#"
            UPDATE price_locations
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Location", location_id))
    }

    /// Delete a price location that no price mapping references
    pub async fn delete_price_location(&self, location_id: Uuid) -> AppResult<()> {
        self.get_price_location(location_id).await?;

        let mapping_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_mappings WHERE location_id = $1")
                .bind(location_id)
                .fetch_one(&self.db)
                .await?;

        if mapping_count > 0 {
            return Err(AppError::DependencyConflict {
                resource: "price_location".to_string(),
                dependents: mapping_count,
                message: format!(
                    "Cannot delete location: {} price mappings reference it",
                    mapping_count
                ),
            });
        }

        sqlx::query("DELETE FROM price_locations WHERE id = $1")
            .bind(location_id)
            .execute(&self.db)
            .await?;

        tracing::info!(location_id = %location_id, "Price location deleted");

        Ok(())
    }

    // ========================================================================
    // Full locations
    // ========================================================================

    /// Get a full location by ID
    pub async fn get_location(&self, location_id: Uuid) -> AppResult<Location> {
        let query = format!("SELECT {} FROM locations WHERE id = $1", LOCATION_COLUMNS);
        sqlx::query_as::<_, Location>(&query)
            .bind(location_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Location", location_id))
    }

    /// List full locations ordered by region, city and name
    pub async fn list_locations(&self, pagination: &Pagination) -> AppResult<PaginatedResponse<Location>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.db)
            .await?;

        let query = format!(
            r#"
            SELECT {}
            FROM locations
            ORDER BY region ASC NULLS LAST, city ASC NULLS LAST, name ASC NULLS LAST
            LIMIT $1 OFFSET $2
            "#,
            LOCATION_COLUMNS
        );
        let locations = sqlx::query_as::<_, Location>(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.db)
            .await?;

        Ok(PaginatedResponse::new(locations, pagination, total.max(0) as u64))
    }

    /// Create a full location
    pub async fn create_location(&self, input: CreateLocationInput) -> AppResult<Location> {
        input.validate()?;

        let query = format!(
            r#"
            INSERT INTO locations (name, region, city, district, population_tier, income_band)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        );
        let location = sqlx::query_as::<_, Location>(&query)
            .bind(input.name.trim())
            .bind(clean_optional(input.region))
            .bind(clean_optional(input.city))
            .bind(clean_optional(input.district))
            .bind(clean_optional(input.population_tier))
            .bind(clean_optional(input.income_band))
            .fetch_one(&self.db)
            .await?;

        tracing::info!(location_id = %location.id, "Location created");

        Ok(location)
    }

    /// Update a full location; absent fields keep their value
    pub async fn update_location(
        &self,
        location_id: Uuid,
        input: UpdateLocationInput,
    ) -> AppResult<Location> {
        input.validate()?;

        let existing = self.get_location(location_id).await?;

        let name = input.name.as_deref().and_then(clean_name).or(existing.name);
        let region = keep_or_replace(input.region, existing.region);
        let city = keep_or_replace(input.city, existing.city);
        let district = keep_or_replace(input.district, existing.district);
        let population_tier = keep_or_replace(input.population_tier, existing.population_tier);
        let income_band = keep_or_replace(input.income_band, existing.income_band);

        let query = format!(
            r#"
            UPDATE locations
            SET name = $1, region = $2, city = $3, district = $4,
                population_tier = $5, income_band = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        );
        let location = sqlx::query_as::<_, Location>(&query)
            .bind(&name)
            .bind(&region)
            .bind(&city)
            .bind(&district)
            .bind(&population_tier)
            .bind(&income_band)
            .bind(location_id)
            .fetch_one(&self.db)
            .await?;

        Ok(location)
    }

    /// Delete a full location
    pub async fn delete_location(&self, location_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(location_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Location", location_id));
        }

        tracing::info!(location_id = %location_id, "Location deleted");

        Ok(())
    }
}

/// A provided field replaces the stored one; blank input clears it
fn keep_or_replace(input: Option<String>, existing: Option<String>) -> Option<String> {
    match input {
        Some(value) => clean_optional(Some(value)),
        None => existing,
    }
}
