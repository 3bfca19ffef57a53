//! Bulk import report models

use serde::{Deserialize, Serialize};

/// Outcome of a bulk price import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub message: String,
    pub success_count: usize,
    pub error_count: usize,
    /// First few row errors; later ones are counted but not listed
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Total rows the report accounts for
    pub fn rows_processed(&self) -> usize {
        self.success_count + self.error_count
    }
}
