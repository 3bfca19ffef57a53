//! WebAssembly module for the Price Tracker admin UI
//!
//! Provides client-side previews for:
//! - Unit price derivation from a SKU's unit value
//! - Net buying price from gross price and VAT
//! - Struck price and currency checks before submitting a price

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn parse_amount(text: &str) -> Result<Decimal, String> {
    parse_decimal_text(text).map_err(|e| e.to_string())
}

fn parse_optional_amount(text: &str) -> Result<Option<Decimal>, String> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_amount(text).map(Some)
    }
}

/// Magnitude the server will divide prices by, e.g. "500" for "500 g"
#[wasm_bindgen]
pub fn unit_value_magnitude(unit_value: &str) -> String {
    extract_unit_value(unit_value).to_string()
}

/// Unit price for `price` on a SKU with the given unit value
#[wasm_bindgen]
pub fn preview_unit_price(price: &str, unit_value: &str) -> Result<String, JsValue> {
    let price = parse_amount(price).map_err(|e| JsValue::from_str(&e))?;
    let unit_price = compute_unit_price(price, unit_value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(unit_price.normalize().to_string())
}

/// Buying price with VAT removed, as stored on the SKU
#[wasm_bindgen]
pub fn preview_net_buying_price(buying_price: &str, buying_vat: &str) -> Result<String, JsValue> {
    let price = parse_amount(buying_price).map_err(|e| JsValue::from_str(&e))?;
    let vat = parse_optional_amount(buying_vat)
        .map_err(|e| JsValue::from_str(&e))?
        .unwrap_or(Decimal::ZERO);
    Ok(buying_price_without_vat(price, vat).normalize().to_string())
}

/// Whether a struck price may be submitted alongside `price`.
///
/// A blank struck price is always fine; an unparsable one never is.
#[wasm_bindgen]
pub fn is_struck_price_valid(price: &str, struck_price: &str) -> bool {
    match (parse_amount(price), parse_optional_amount(struck_price)) {
        (Ok(price), Ok(struck)) => validate_struck_price(price, struck).is_ok(),
        _ => false,
    }
}

/// Uppercased currency code, the default when blank, or nothing when invalid
#[wasm_bindgen]
pub fn normalize_currency_code(currency: &str, default_currency: &str) -> Option<String> {
    normalize_currency(Some(currency), default_currency).ok()
}

/// Full preview of a price form as a plain JS object:
/// `{ valid, unitPrice?, error? }`
#[wasm_bindgen]
pub fn preview_price(price: &str, struck_price: &str, unit_value: &str) -> Result<js_sys::Object, JsValue> {
    let preview = js_sys::Object::new();

    let checked = parse_amount(price).and_then(|price| {
        let struck = parse_optional_amount(struck_price)?;
        validate_price_pair(price, struck).map_err(|e| e.to_string())?;
        compute_unit_price(price, unit_value).map_err(|e| e.to_string())
    });

    match checked {
        Ok(unit_price) => {
            let unit_price = unit_price.normalize().to_string();
            js_sys::Reflect::set(&preview, &"valid".into(), &JsValue::TRUE)?;
            js_sys::Reflect::set(&preview, &"unitPrice".into(), &JsValue::from_str(&unit_price))?;
        }
        Err(message) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Price preview: {}", message)));
            js_sys::Reflect::set(&preview, &"valid".into(), &JsValue::FALSE)?;
            js_sys::Reflect::set(&preview, &"error".into(), &JsValue::from_str(&message))?;
        }
    }

    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_value_magnitude() {
        assert_eq!(unit_value_magnitude("500 g"), "500");
        assert_eq!(unit_value_magnitude("1.5 L"), "1.5");
        assert_eq!(unit_value_magnitude("each"), "1");
    }

    #[test]
    fn test_preview_unit_price() {
        assert_eq!(preview_unit_price("20.00", "500 g").unwrap(), "0.04");
        assert_eq!(preview_unit_price("18,00", "500 g").unwrap(), "0.036");
    }

    #[test]
    fn test_unit_price_overflow_fails() {
        let unit_price = compute_unit_price(MAX_PRICE, "0.0001 g");
        assert!(unit_price.is_err());
        assert!(!is_struck_price_valid("99999999999", "10"));
    }

    #[test]
    fn test_preview_net_buying_price() {
        assert_eq!(preview_net_buying_price("100", "25").unwrap(), "80");
        assert_eq!(preview_net_buying_price("50", "").unwrap(), "50");
    }

    #[test]
    fn test_struck_price_validity() {
        assert!(is_struck_price_valid("20", ""));
        assert!(is_struck_price_valid("20", "15"));
        assert!(!is_struck_price_valid("20", "20"));
        assert!(!is_struck_price_valid("20", "abc"));
        assert!(!is_struck_price_valid("", "10"));
    }

    #[test]
    fn test_normalize_currency_code() {
        assert_eq!(normalize_currency_code("eur", "USD").as_deref(), Some("EUR"));
        assert_eq!(normalize_currency_code(" ", "USD").as_deref(), Some("USD"));
        assert_eq!(normalize_currency_code("euro", "USD"), None);
    }

    #[test]
    fn test_parse_optional_amount() {
        assert_eq!(parse_optional_amount("  ").unwrap(), None);
        assert_eq!(parse_optional_amount("1,5").unwrap(), Some(Decimal::new(15, 1)));
        assert!(parse_optional_amount("1,000.5").is_err());
    }
}
