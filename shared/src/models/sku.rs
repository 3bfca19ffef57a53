//! SKU (product definition) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_non_negative, validate_not_blank, validate_vat_percentage};

/// Kind of unit a SKU is sold by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "unit_kind", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Gram,
    Kilogram,
    Millilitre,
    Litre,
    Piece,
    Pack,
    Dozen,
    Other,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Gram => "gram",
            UnitKind::Kilogram => "kilogram",
            UnitKind::Millilitre => "millilitre",
            UnitKind::Litre => "litre",
            UnitKind::Piece => "piece",
            UnitKind::Pack => "pack",
            UnitKind::Dozen => "dozen",
            UnitKind::Other => "other",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trackable product definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sku {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub unit: UnitKind,
    /// Free-text magnitude and unit, e.g. "500 g"
    pub unit_value: String,
    pub category_id: Option<Uuid>,
    pub buying_price: Decimal,
    /// VAT percentage included in `buying_price`
    pub buying_vat: Decimal,
    /// Derived from `buying_price` and `buying_vat`, never set directly
    pub buying_price_without_vat: Decimal,
    pub selling_price: Decimal,
    /// Merchandising tag, informational only
    pub kvi_label: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// SKU with its category name joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SkuDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub sku: Sku,
    pub category_name: Option<String>,
}

/// Input for creating a SKU
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSkuInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 120))]
    pub brand: Option<String>,
    pub unit: UnitKind,
    #[validate(length(max = 60), custom = "validate_not_blank")]
    pub unit_value: String,
    pub category_id: Option<Uuid>,
    #[validate(custom = "validate_non_negative")]
    pub buying_price: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_vat_percentage")]
    pub buying_vat: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub selling_price: Decimal,
    #[validate(length(max = 60))]
    pub kvi_label: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Input for updating a SKU; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSkuInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(length(max = 120))]
    pub brand: Option<String>,
    pub unit: Option<UnitKind>,
    #[validate(length(max = 60), custom = "validate_not_blank")]
    pub unit_value: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(custom = "validate_non_negative")]
    pub buying_price: Option<Decimal>,
    #[validate(custom = "validate_vat_percentage")]
    pub buying_vat: Option<Decimal>,
    #[validate(custom = "validate_non_negative")]
    pub selling_price: Option<Decimal>,
    #[validate(length(max = 60))]
    pub kvi_label: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Filters for listing SKUs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkuFilter {
    pub category_id: Option<Uuid>,
    /// Case-insensitive match on name or brand
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CreateSkuInput {
        CreateSkuInput {
            name: "Whole Milk".to_string(),
            brand: Some("Dairy Co".to_string()),
            unit: UnitKind::Millilitre,
            unit_value: "1000 ml".to_string(),
            category_id: None,
            buying_price: Decimal::new(120, 2),
            buying_vat: Decimal::from(20),
            selling_price: Decimal::new(199, 2),
            kvi_label: None,
            image_url: None,
        }
    }

    #[test]
    fn test_create_sku_input_valid() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_create_sku_input_rejects_blank_name() {
        let input = CreateSkuInput {
            name: "  ".to_string(),
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_sku_input_rejects_vat_over_100() {
        let input = CreateSkuInput {
            buying_vat: Decimal::from(150),
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_unit_kind_serialization() {
        let json = serde_json::to_string(&UnitKind::Kilogram).unwrap();
        assert_eq!(json, "\"kilogram\"");
        let kind: UnitKind = serde_json::from_str("\"millilitre\"").unwrap();
        assert_eq!(kind, UnitKind::Millilitre);
    }

    #[test]
    fn test_update_input_defaults_empty() {
        let input: UpdateSkuInput = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_none());
        assert!(input.validate().is_ok());
    }
}
