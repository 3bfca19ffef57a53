//! Bulk price import
//!
//! Reconciles every row of an uploaded spreadsheet against the catalog and
//! upserts the valid ones through the same engine as the single-record
//! endpoint. A bad row is reported and skipped; it never aborts the batch.

use std::path::PathBuf;

use shared::{normalize_currency, validate_price, ImportReport, UpsertOutcome};
use uuid::Uuid;

use super::pricing::{PriceDraft, PricingService};
use crate::error::{AppError, AppResult};
use crate::import::{read_first_sheet, RowError, SheetRow, REQUIRED_COLUMNS};
use crate::store::{CatalogRepository, PriceMappingRepository};

/// Summary message of every completed import
pub const IMPORT_COMPLETED: &str = "Bulk import completed";

/// Row-by-row importer on top of the upsert engine
pub struct ImportService<R> {
    pricing: PricingService<R>,
    max_reported_errors: usize,
}

impl<R> ImportService<R>
where
    R: CatalogRepository + PriceMappingRepository,
{
    /// Create a new ImportService instance
    pub fn new(pricing: PricingService<R>, max_reported_errors: usize) -> Self {
        Self {
            pricing,
            max_reported_errors,
        }
    }

    /// Read the first sheet of the file and import its rows.
    ///
    /// Only an unreadable file fails the call; row problems end up in the
    /// report.
    pub async fn import_file(&self, path: PathBuf) -> AppResult<ImportReport> {
        let rows = tokio::task::spawn_blocking(move || read_first_sheet(&path))
            .await
            .map_err(|e| AppError::Internal(format!("Spreadsheet reader failed: {}", e)))?
            .map_err(|e| AppError::Import(e.to_string()))?;

        tracing::debug!(rows = rows.len(), "Spreadsheet parsed");

        Ok(self.import_rows(&rows).await)
    }

    /// Import rows in order, one upsert per valid row
    pub async fn import_rows(&self, rows: &[SheetRow]) -> ImportReport {
        let mut report = ImportReport {
            message: IMPORT_COMPLETED.to_string(),
            ..Default::default()
        };

        for row in rows {
            match self.import_row(row).await {
                Ok(_) => report.success_count += 1,
                Err(e) => {
                    tracing::debug!(row = row.number, error = %e, "Import row rejected");
                    report.error_count += 1;
                    if report.errors.len() < self.max_reported_errors {
                        report.errors.push(e.describe(row.number));
                    }
                }
            }
        }

        tracing::info!(
            success_count = report.success_count,
            error_count = report.error_count,
            "Bulk import completed"
        );

        report
    }

    async fn import_row(&self, row: &SheetRow) -> Result<UpsertOutcome, RowError> {
        if REQUIRED_COLUMNS.iter().any(|column| row.get(column).is_falsy()) {
            return Err(RowError::MissingFields);
        }

        let price = row
            .get("price")
            .as_decimal()
            .map_err(|e| RowError::Malformed(e.to_string()))?
            .ok_or(RowError::MissingFields)?;
        validate_price(price).map_err(|e| RowError::Malformed(e.to_string()))?;

        // A zero struck price means "none", like any other empty cell
        let struck_price = row
            .get("struck_price")
            .as_decimal()
            .map_err(|e| RowError::Malformed(e.to_string()))?
            .filter(|struck| !struck.is_zero());
        if matches!(struck_price, Some(struck) if struck >= price) {
            return Err(RowError::StruckPriceNotLower);
        }

        let currency = normalize_currency(
            row.get("currency").as_text().as_deref(),
            self.pricing.default_currency(),
        )
        .map_err(|e| RowError::Malformed(e.to_string()))?;

        let sku_id = parse_id(row, "sku_id")?;
        let vendor_id = parse_id(row, "vendor_id")?;
        let location_id = parse_id(row, "location_id")?;

        let repo = self.pricing.repo();
        let sku = repo
            .find_sku(sku_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| RowError::NotFound {
                entity: "SKU",
                id: sku_id.to_string(),
            })?;

        if !repo.vendor_exists(vendor_id).await.map_err(store_error)? {
            return Err(RowError::NotFound {
                entity: "Vendor",
                id: vendor_id.to_string(),
            });
        }

        if !repo.price_location_exists(location_id).await.map_err(store_error)? {
            return Err(RowError::NotFound {
                entity: "Location",
                id: location_id.to_string(),
            });
        }

        let draft = PriceDraft {
            key: shared::PriceKey {
                sku_id,
                vendor_id,
                location_id,
            },
            price,
            struck_price,
            is_discounted: row.get("is_discounted").as_bool().unwrap_or(false),
            currency,
        };

        self.pricing.apply(&sku, draft).await.map_err(apply_error)
    }
}

fn parse_id(row: &SheetRow, column: &'static str) -> Result<Uuid, RowError> {
    let value = row.get(column).as_text().unwrap_or_default();
    Uuid::parse_str(&value).map_err(|_| RowError::InvalidId { column, value })
}

fn store_error(err: AppError) -> RowError {
    RowError::Store(err.to_string())
}

// A price the SKU cannot carry (unit price out of range) is the row's fault
fn apply_error(err: AppError) -> RowError {
    match err {
        AppError::Validation { message, .. } => RowError::Malformed(message),
        other => store_error(other),
    }
}
