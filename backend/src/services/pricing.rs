//! Price-mapping upsert engine
//!
//! Validates a price for a (sku, vendor, location) triple, derives its unit
//! price from the SKU's unit value and stores it as the single mapping for
//! that triple.

use rust_decimal::Decimal;
use shared::{
    compute_unit_price, normalize_currency, validate_price_pair, PriceKey, PriceMappingWrite,
    PricingError, Sku, UpsertOutcome, UpsertPriceMappingInput,
};

use crate::error::{AppError, AppResult};
use crate::store::{CatalogRepository, PriceMappingRepository};

/// A price that has passed validation and is ready to be applied to a SKU
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDraft {
    pub key: PriceKey,
    pub price: Decimal,
    pub struck_price: Option<Decimal>,
    pub is_discounted: bool,
    pub currency: String,
}

impl PriceDraft {
    /// Attach the unit price derived from the SKU's unit value
    pub fn into_write(self, sku: &Sku) -> Result<PriceMappingWrite, PricingError> {
        Ok(PriceMappingWrite {
            unit_price: compute_unit_price(self.price, &sku.unit_value)?,
            key: self.key,
            price: self.price,
            struck_price: self.struck_price,
            is_discounted: self.is_discounted,
            currency: self.currency,
        })
    }
}

/// Upsert engine over any catalog/price store
#[derive(Clone)]
pub struct PricingService<R> {
    repo: R,
    default_currency: String,
}

impl<R> PricingService<R>
where
    R: CatalogRepository + PriceMappingRepository,
{
    /// Create a new PricingService instance
    pub fn new(repo: R, default_currency: impl Into<String>) -> Self {
        Self {
            repo,
            default_currency: default_currency.into(),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Create or update the price mapping for the input's triple.
    ///
    /// Every check runs before the write; the first failure is returned and
    /// nothing is stored.
    pub async fn upsert(&self, input: UpsertPriceMappingInput) -> AppResult<UpsertOutcome> {
        validate_price_pair(input.price, input.struck_price)?;
        let currency = normalize_currency(input.currency.as_deref(), &self.default_currency)?;
        let key = input.key();

        let sku = self
            .repo
            .find_sku(key.sku_id)
            .await?
            .ok_or_else(|| AppError::not_found("SKU", key.sku_id))?;

        if !self.repo.vendor_exists(key.vendor_id).await? {
            return Err(AppError::not_found("Vendor", key.vendor_id));
        }

        if !self.repo.price_location_exists(key.location_id).await? {
            return Err(AppError::not_found("Location", key.location_id));
        }

        let draft = PriceDraft {
            key,
            price: input.price,
            struck_price: input.struck_price,
            is_discounted: input.is_discounted.unwrap_or(false),
            currency,
        };

        self.apply(&sku, draft).await
    }

    /// Derive the unit price and write the mapping.
    ///
    /// Callers must have validated the draft and resolved the SKU, vendor
    /// and location already.
    pub async fn apply(&self, sku: &Sku, draft: PriceDraft) -> AppResult<UpsertOutcome> {
        let write = draft.into_write(sku)?;
        let outcome = self.repo.upsert_price_mapping(&write).await?;

        tracing::info!(
            price_mapping_id = %outcome.id,
            sku_id = %write.key.sku_id,
            vendor_id = %write.key.vendor_id,
            location_id = %write.key.location_id,
            action = ?outcome.action,
            "Price mapping upserted"
        );

        Ok(outcome)
    }
}
