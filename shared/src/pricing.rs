//! Pricing rules shared by the upsert engine, the bulk importer and the UI
//!
//! All monetary arithmetic is done on [`Decimal`]. Nothing in here touches
//! storage, so the same rules run on the server and in the browser.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Decimal places kept on a derived unit price
pub const UNIT_PRICE_SCALE: u32 = 6;

/// Decimal places kept on a derived net (VAT-free) buying price
pub const NET_PRICE_SCALE: u32 = 4;

/// Largest price the store accepts (`NUMERIC(14, 4)`)
pub const MAX_PRICE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 4);

/// Largest unit price the store accepts (`NUMERIC(20, 6)`)
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_661_992_959, 1_808_227_885, 5, false, 6);

// ASCII digits only
static UNIT_MAGNITUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(\.[0-9]+)?").expect("unit magnitude pattern is valid"));

/// Pricing rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Price must be greater than zero")]
    NonPositivePrice,

    #[error("Struck price must be lower than price")]
    StruckPriceNotLower,

    #[error("Price must not exceed {}", MAX_PRICE)]
    PriceOutOfRange,

    #[error("Unit price for {price} per \"{unit_value}\" is out of range")]
    UnitPriceOutOfRange { price: Decimal, unit_value: String },

    #[error("Malformed number: {0}")]
    MalformedNumber(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
}

/// Extract the numeric magnitude from a free-text unit value.
///
/// Takes the first integer or decimal token ("2 x 500 g" gives 2). When no
/// token is present, or the token is zero, the magnitude is 1 so that a
/// unit price can always be derived.
pub fn extract_unit_value(text: &str) -> Decimal {
    UNIT_MAGNITUDE
        .find(text)
        .and_then(|m| Decimal::from_str(m.as_str()).ok())
        .filter(|magnitude| !magnitude.is_zero())
        .unwrap_or(Decimal::ONE)
}

/// Price per unit of magnitude, e.g. 20.00 for "500 g" gives 0.04.
///
/// Fails when the quotient does not fit a stored unit price, which happens
/// for large prices on fractional magnitudes such as "0.0001 g".
pub fn compute_unit_price(price: Decimal, unit_value: &str) -> Result<Decimal, PricingError> {
    price
        .checked_div(extract_unit_value(unit_value))
        .map(|unit_price| unit_price.round_dp(UNIT_PRICE_SCALE))
        .filter(|unit_price| unit_price.abs() <= MAX_UNIT_PRICE)
        .ok_or_else(|| PricingError::UnitPriceOutOfRange {
            price,
            unit_value: unit_value.to_string(),
        })
}

/// Strip VAT from a gross buying price.
///
/// A VAT of zero (or less) leaves the price untouched.
pub fn buying_price_without_vat(buying_price: Decimal, buying_vat: Decimal) -> Decimal {
    if buying_vat > Decimal::ZERO {
        let divisor = Decimal::ONE + buying_vat / Decimal::ONE_HUNDRED;
        (buying_price / divisor).round_dp(NET_PRICE_SCALE)
    } else {
        buying_price
    }
}

/// A price must be positive, storable, and any struck price strictly below it
pub fn validate_price_pair(price: Decimal, struck_price: Option<Decimal>) -> Result<(), PricingError> {
    validate_price(price)?;
    validate_struck_price(price, struck_price)
}

/// A price must be positive and fit the stored precision
pub fn validate_price(price: Decimal) -> Result<(), PricingError> {
    if price <= Decimal::ZERO {
        return Err(PricingError::NonPositivePrice);
    }
    if price > MAX_PRICE {
        return Err(PricingError::PriceOutOfRange);
    }
    Ok(())
}

/// Struck price, when given, must be strictly lower than the price
pub fn validate_struck_price(price: Decimal, struck_price: Option<Decimal>) -> Result<(), PricingError> {
    match struck_price {
        Some(struck) if struck >= price => Err(PricingError::StruckPriceNotLower),
        _ => Ok(()),
    }
}

/// Parse a human-entered decimal.
///
/// Either `.` or `,` may be the decimal point, but not both in one value:
/// "12,50" and "12.50" are accepted, "1,234.50" is rejected. Surrounding
/// whitespace is ignored.
pub fn parse_decimal_text(text: &str) -> Result<Decimal, PricingError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PricingError::MalformedNumber(text.to_string()));
    }

    let has_comma = trimmed.contains(',');
    if has_comma && trimmed.contains('.') {
        return Err(PricingError::MalformedNumber(text.to_string()));
    }

    let normalized = if has_comma {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| PricingError::MalformedNumber(text.to_string()))
}

/// Uppercase a currency code, falling back to `default` when absent or blank
pub fn normalize_currency(currency: Option<&str>, default: &str) -> Result<String, PricingError> {
    let code = match currency.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => default.trim(),
    };

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PricingError::InvalidCurrency(code.to_string()));
    }

    Ok(code.to_ascii_uppercase())
}
