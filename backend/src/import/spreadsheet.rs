//! Spreadsheet reader for bulk price imports
//!
//! Reads the first worksheet of an Excel/OpenDocument workbook, or a CSV
//! file, into header-keyed rows. Each row keeps its physical row number so
//! that errors can point at the line the user sees in their spreadsheet.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use shared::{parse_decimal_text, PricingError};
use thiserror::Error;

/// File extensions read through the workbook reader
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reasons a whole file cannot be read
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Unsupported file type: {0}. Supported: xlsx, xlsm, xlsb, xls, ods, csv")]
    UnsupportedFormat(String),

    #[error("Workbook has no worksheets")]
    NoSheets,

    #[error("Could not read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A single cell, reduced to the shapes the importer cares about
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Empty cells, blank text and numeric zero all count as "not provided"
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
            CellValue::Bool(b) => !b,
        }
    }

    /// Trimmed text form of the cell; whole numbers print without a fraction
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    /// Decimal value of the cell; `Ok(None)` when the cell is blank
    pub fn as_decimal(&self) -> Result<Option<Decimal>, PricingError> {
        match self {
            CellValue::Empty => Ok(None),
            CellValue::Text(s) if s.trim().is_empty() => Ok(None),
            CellValue::Text(s) => parse_decimal_text(s).map(Some),
            CellValue::Number(n) => Decimal::from_f64(*n)
                .map(Some)
                .ok_or_else(|| PricingError::MalformedNumber(n.to_string())),
            CellValue::Bool(b) => Err(PricingError::MalformedNumber(b.to_string())),
        }
    }

    /// Boolean reading of the cell; blank cells are `None`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Empty => None,
            CellValue::Bool(b) => Some(*b),
            CellValue::Number(n) => Some(*n != 0.0),
            CellValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" => None,
                "true" | "yes" | "y" | "1" => Some(true),
                _ => Some(false),
            },
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One data row of the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based physical row number; the header is row 1
    pub number: usize,
    pub cells: HashMap<String, CellValue>,
}

impl SheetRow {
    pub fn new(number: usize, cells: HashMap<String, CellValue>) -> Self {
        Self { number, cells }
    }

    /// Cell under `column` (normalized header name), empty when absent
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    fn is_blank(&self) -> bool {
        self.cells.values().all(|cell| match cell {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        })
    }
}

/// "SKU ID", "sku-id" and "sku_id" all name the same column
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Read the first sheet of the file at `path` into rows keyed by header.
///
/// Completely blank rows are skipped and do not count as input.
pub fn read_first_sheet(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if extension == "csv" {
        read_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path)
    } else {
        Err(SpreadsheetError::UnsupportedFormat(extension))
    }
}

/// Whether a filename has an extension the reader understands
pub fn is_supported_file(filename: &str) -> bool {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    extension == "csv" || WORKBOOK_EXTENSIONS.contains(&extension.as_str())
}

fn read_workbook(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoSheets)??;

    // The range starts at the first used cell, not necessarily A1
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| normalize_header(&cell.to_string()))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let sheet_rows = rows
        .enumerate()
        .map(|(index, cells)| {
            let values = headers
                .iter()
                .zip(cells.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.clone(), CellValue::from(cell)))
                .collect();
            // +1 for 1-based numbering, +1 for the header row
            SheetRow::new(first_row + index + 2, values)
        })
        .filter(|row| !row.is_blank())
        .collect();

    Ok(sheet_rows)
}

fn read_csv(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    // Exports are not always UTF-8; undecodable bytes become U+FFFD so a
    // stray Latin-1 character only affects its own cell
    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|header| normalize_header(&String::from_utf8_lossy(header)))
        .collect();

    let mut sheet_rows = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        let number = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        let values = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| {
                let value = String::from_utf8_lossy(value);
                let cell = if value.trim().is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(value.trim().to_string())
                };
                (header.clone(), cell)
            })
            .collect();

        let row = SheetRow::new(number, values);
        if !row.is_blank() {
            sheet_rows.push(row);
        }
    }

    Ok(sheet_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" SKU ID "), "sku_id");
        assert_eq!(normalize_header("Struck-Price"), "struck_price");
        assert_eq!(normalize_header("price"), "price");
    }

    #[test]
    fn test_read_csv_rows_keep_physical_numbers() {
        let file = write_csv(
            "SKU ID,Vendor ID,Location ID,Price\n\
             a,b,c,20.00\n\
             d,e,f,18\n",
        );

        let rows = read_first_sheet(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].number, 3);
        assert_eq!(rows[0].get("sku_id"), &CellValue::Text("a".to_string()));
        assert_eq!(rows[1].get("price").as_decimal().unwrap(), Some(Decimal::from(18)));
        assert_eq!(rows[0].get("currency"), &CellValue::Empty);
    }

    #[test]
    fn test_read_csv_skips_blank_rows() {
        let file = write_csv("sku_id,price\nx,1\n,\ny,2\n");
        let rows = read_first_sheet(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].number, 4);
    }

    #[test]
    fn test_read_csv_tolerates_non_utf8_cells() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"sku_id,price,note\nx,1,ok\ny,2,caf\xe9\n").unwrap();
        file.flush().unwrap();

        let rows = read_first_sheet(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].number, 3);
        assert_eq!(rows[1].get("sku_id"), &CellValue::Text("y".to_string()));
        assert_eq!(
            rows[1].get("note"),
            &CellValue::Text("caf\u{FFFD}".to_string())
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            read_first_sheet(file.path()),
            Err(SpreadsheetError::UnsupportedFormat(ext)) if ext == "txt"
        ));
        assert!(!is_supported_file("prices.txt"));
        assert!(is_supported_file("Prices.XLSX"));
    }

    #[test]
    fn test_unreadable_workbook() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        assert!(matches!(
            read_first_sheet(file.path()),
            Err(SpreadsheetError::Workbook(_))
        ));
    }

    #[test]
    fn test_cell_falsy() {
        assert!(CellValue::Empty.is_falsy());
        assert!(CellValue::Text("  ".to_string()).is_falsy());
        assert!(CellValue::Number(0.0).is_falsy());
        assert!(!CellValue::Number(12.5).is_falsy());
        assert!(!CellValue::Text("0".to_string()).is_falsy());
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(CellValue::Number(42.0).as_text().as_deref(), Some("42"));
        assert_eq!(CellValue::Text(" abc ".to_string()).as_text().as_deref(), Some("abc"));
        assert_eq!(CellValue::Text("   ".to_string()).as_text(), None);
    }

    #[test]
    fn test_cell_as_decimal() {
        assert_eq!(
            CellValue::Number(19.99).as_decimal().unwrap(),
            Some(Decimal::from_str("19.99").unwrap())
        );
        assert_eq!(
            CellValue::Text("12,50".to_string()).as_decimal().unwrap(),
            Some(Decimal::from_str("12.50").unwrap())
        );
        assert_eq!(CellValue::Empty.as_decimal().unwrap(), None);
        assert!(CellValue::Text("twelve".to_string()).as_decimal().is_err());
    }

    #[test]
    fn test_cell_as_bool() {
        assert_eq!(CellValue::Bool(true).as_bool(), Some(true));
        assert_eq!(CellValue::Text("Yes".to_string()).as_bool(), Some(true));
        assert_eq!(CellValue::Text("no".to_string()).as_bool(), Some(false));
        assert_eq!(CellValue::Number(1.0).as_bool(), Some(true));
        assert_eq!(CellValue::Empty.as_bool(), None);
    }
}
