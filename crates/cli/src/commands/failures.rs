//! Failures file: a JSON array of invoices written by `run` and read by `resend`.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use contracts::Invoice;

use crate::error::{CliError, Result};

/// Write `invoices` as a pretty JSON array, creating parent directories
pub fn write_failures(path: &Path, invoices: &[Invoice]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| file_error(path, e))?;
    }
    let json = serde_json::to_string_pretty(invoices).map_err(|e| file_error(path, e))?;
    fs::write(path, json).map_err(|e| file_error(path, e))
}

/// Read a failures file; every entry is validated as an invoice
pub fn read_failures(path: &Path) -> Result<Vec<Invoice>> {
    let content = fs::read_to_string(path).map_err(|e| file_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| file_error(path, e))
}

fn file_error(path: &Path, e: impl Display) -> CliError {
    CliError::failures_file(path.display().to_string(), e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Decimal;
    use tempfile::tempdir;

    #[test]
    fn test_failures_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("failed.json");
        let invoices = vec![
            Invoice::new("A", Decimal::from(50)).unwrap(),
            Invoice::new("C", Decimal::new(9950, 2)).unwrap(),
        ];

        write_failures(&path, &invoices).unwrap();
        assert_eq!(read_failures(&path).unwrap(), invoices);
    }

    #[test]
    fn test_invalid_entry_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("failed.json");
        fs::write(&path, r#"[{"customer": "", "amount": "5"}]"#).unwrap();

        let err = read_failures(&path).unwrap_err();
        assert!(matches!(err, CliError::FailuresFile { .. }), "got: {err}");
    }

    #[test]
    fn test_missing_file() {
        let err = read_failures(Path::new("/nonexistent/failed.json")).unwrap_err();
        assert!(err.to_string().contains("failed.json"));
    }
}
