//! Price mapping models
//!
//! A price mapping is the price one vendor charges for one SKU at one
//! location. There is at most one mapping per (sku, vendor, location).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnitKind;

/// Stored price mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PriceMapping {
    pub id: Uuid,
    pub sku_id: Uuid,
    pub vendor_id: Uuid,
    pub location_id: Uuid,
    pub price: Decimal,
    /// Secondary displayed price, always lower than `price`
    pub struck_price: Option<Decimal>,
    pub is_discounted: bool,
    /// `price` divided by the SKU's unit magnitude
    pub unit_price: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The identifying triple of a price mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceKey {
    pub sku_id: Uuid,
    pub vendor_id: Uuid,
    pub location_id: Uuid,
}

/// Request body for creating or updating a single price mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertPriceMappingInput {
    pub sku_id: Uuid,
    pub vendor_id: Uuid,
    pub location_id: Uuid,
    pub price: Decimal,
    pub struck_price: Option<Decimal>,
    pub is_discounted: Option<bool>,
    pub currency: Option<String>,
}

impl UpsertPriceMappingInput {
    pub fn key(&self) -> PriceKey {
        PriceKey {
            sku_id: self.sku_id,
            vendor_id: self.vendor_id,
            location_id: self.location_id,
        }
    }
}

/// Fully validated values handed to the store for one upsert
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMappingWrite {
    pub key: PriceKey,
    pub price: Decimal,
    pub struck_price: Option<Decimal>,
    pub is_discounted: bool,
    pub unit_price: Decimal,
    pub currency: String,
}

/// Whether an upsert inserted a new record or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertAction {
    Created,
    Updated,
}

impl UpsertAction {
    pub fn message(&self) -> &'static str {
        match self {
            UpsertAction::Created => "Price mapping created successfully",
            UpsertAction::Updated => "Price mapping updated successfully",
        }
    }
}

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub id: Uuid,
    pub action: UpsertAction,
}

/// Response body for the single upsert endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertResponse {
    pub id: Uuid,
    pub message: String,
}

impl From<UpsertOutcome> for UpsertResponse {
    fn from(outcome: UpsertOutcome) -> Self {
        Self {
            id: outcome.id,
            message: outcome.action.message().to_string(),
        }
    }
}

/// Price mapping formatted for display and external consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceMappingView {
    pub id: Uuid,
    pub sku_id: Uuid,
    pub sku_name: String,
    pub brand: Option<String>,
    pub unit: UnitKind,
    pub unit_value: String,
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub location_id: Uuid,
    pub location_name: String,
    pub price: Decimal,
    pub struck_price: Option<Decimal>,
    pub is_discounted: bool,
    pub unit_price: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for listing price mappings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceMappingFilter {
    pub sku_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
}
