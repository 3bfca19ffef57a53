//! Spreadsheet intake for bulk price imports

pub mod spreadsheet;
pub mod upload;

use thiserror::Error;

pub use spreadsheet::{is_supported_file, read_first_sheet, CellValue, SheetRow, SpreadsheetError};
pub use upload::TempUpload;

/// Columns every import row must fill in
pub const REQUIRED_COLUMNS: [&str; 4] = ["sku_id", "vendor_id", "location_id", "price"];

/// Why a single import row was rejected.
///
/// Row errors are reported back to the user and never fail the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Missing required fields (sku_id, vendor_id, location_id, price)")]
    MissingFields,

    #[error("Struck price must be lower than price")]
    StruckPriceNotLower,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid {column}: {value}")]
    InvalidId { column: &'static str, value: String },

    #[error("{0}")]
    Malformed(String),

    #[error("{0}")]
    Store(String),
}

impl RowError {
    /// User-facing line for the import report
    pub fn describe(&self, row: usize) -> String {
        format!("Row {}: {}", row, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_messages() {
        assert_eq!(
            RowError::MissingFields.describe(2),
            "Row 2: Missing required fields (sku_id, vendor_id, location_id, price)"
        );
        assert_eq!(
            RowError::StruckPriceNotLower.describe(7),
            "Row 7: Struck price must be lower than price"
        );
        assert_eq!(
            RowError::NotFound { entity: "Vendor", id: "abc".to_string() }.describe(3),
            "Row 3: Vendor not found: abc"
        );
        assert_eq!(
            RowError::InvalidId { column: "sku_id", value: "xyz".to_string() }.describe(4),
            "Row 4: Invalid sku_id: xyz"
        );
    }
}
