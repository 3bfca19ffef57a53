//! Vendor service

use shared::{clean_name, clean_optional, CreateVendorInput, PaginatedResponse, Pagination, UpdateVendorInput, Vendor};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Vendor service for managing retailers and suppliers
#[derive(Clone)]
pub struct VendorService {
    db: PgPool,
}

impl VendorService {
    /// Create a new VendorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a vendor by ID
    pub async fn get_vendor(&self, vendor_id: Uuid) -> AppResult<Vendor> {
        sqlx::query_as::<_, Vendor>(
            "SELECT id, name, logo_url, created_at, updated_at FROM vendors WHERE id = $1",
        )
        .bind(vendor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Vendor", vendor_id))
    }

    /// List vendors by name
    pub async fn list_vendors(&self, pagination: &Pagination) -> AppResult<PaginatedResponse<Vendor>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.db)
            .await?;

        let vendors = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, name, logo_url, created_at, updated_at
            FROM vendors
            ORDER BY name ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(vendors, pagination, total.max(0) as u64))
    }

    /// Create a new vendor
    pub async fn create_vendor(&self, input: CreateVendorInput) -> AppResult<Vendor> {
        input.validate()?;

        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (name, logo_url)
            VALUES ($1, $2)
            RETURNING id, name, logo_url, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(clean_optional(input.logo_url))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(vendor_id = %vendor.id, "Vendor created");

        Ok(vendor)
    }

    /// Update a vendor
    pub async fn update_vendor(&self, vendor_id: Uuid, input: UpdateVendorInput) -> AppResult<Vendor> {
        input.validate()?;

        let existing = self.get_vendor(vendor_id).await?;

        let name = input.name.as_deref().and_then(clean_name).unwrap_or(existing.name);
        let logo_url = if input.logo_url.is_some() {
            clean_optional(input.logo_url)
        } else {
            existing.logo_url
        };

        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            UPDATE vendors
            SET name = $1, logo_url = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, logo_url, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&logo_url)
        .bind(vendor_id)
        .fetch_one(&self.db)
        .await?;

        Ok(vendor)
    }

    /// Delete a vendor that no price mapping references
    pub async fn delete_vendor(&self, vendor_id: Uuid) -> AppResult<()> {
        self.get_vendor(vendor_id).await?;

        let mapping_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_mappings WHERE vendor_id = $1")
                .bind(vendor_id)
                .fetch_one(&self.db)
                .await?;

        if mapping_count > 0 {
            return Err(AppError::DependencyConflict {
                resource: "vendor".to_string(),
                dependents: mapping_count,
                message: format!("Cannot delete vendor: {} price mappings reference it", mapping_count),
            });
        }

        sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(vendor_id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::restricted_delete(e, "vendor", "Cannot delete vendor: price mappings reference it"))?;

        tracing::info!(vendor_id = %vendor_id, "Vendor deleted");

        Ok(())
    }
}
