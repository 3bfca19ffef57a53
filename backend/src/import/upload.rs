//! Transient storage for uploaded spreadsheets

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::spreadsheet::SpreadsheetError;

/// An uploaded file on disk.
///
/// The file is removed when the guard is dropped, whatever the outcome of
/// the import.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
    original_name: String,
}

impl TempUpload {
    /// Write `bytes` to a new temp file that keeps the extension of
    /// `original_name`, inside `dir` or the OS temp dir.
    pub fn write(dir: Option<&Path>, original_name: &str, bytes: &[u8]) -> Result<Self, SpreadsheetError> {
        let suffix = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();

        let mut builder = tempfile::Builder::new();
        builder.prefix("price-import-").suffix(&suffix);

        let mut file = match dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };

        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            file,
            original_name: original_name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Owned copy of the path, for handing to a blocking task
    pub fn path_buf(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let upload = TempUpload::write(Some(dir.path()), "Prices.XLSX", b"data").unwrap();
        assert_eq!(upload.path().extension().and_then(|e| e.to_str()), Some("xlsx"));
        assert!(upload.path().starts_with(dir.path()));
        assert_eq!(upload.original_name(), "Prices.XLSX");
        assert_eq!(std::fs::read(upload.path()).unwrap(), b"data");
    }

    #[test]
    fn test_upload_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let upload = TempUpload::write(Some(dir.path()), "prices.csv", b"sku_id\n").unwrap();
        let path = upload.path_buf();
        assert!(path.exists());

        drop(upload);
        assert!(!path.exists());
    }

    #[test]
    fn test_upload_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads");
        let upload = TempUpload::write(Some(&nested), "prices.csv", b"").unwrap();
        assert!(upload.path().starts_with(&nested));
    }
}
