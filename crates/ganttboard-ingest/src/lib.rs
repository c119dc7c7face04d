//! # ganttboard-ingest
//!
//! Spreadsheet ingestion for ganttboard: turns an input file into a
//! [`RawTable`] (header row + scalar cells) without interpreting any of it.
//! Column resolution and date coercion happen downstream in
//! `ganttboard-core`; this crate only cares about getting cells out of the
//! file faithfully.
//!
//! Supported formats:
//! - XLSX/XLSM/XLS/ODS via calamine (first worksheet, first row is the header)
//! - CSV via the csv crate
//!
//! ## Example
//!
//! ```rust,no_run
//! use ganttboard_ingest::load_table;
//!
//! let table = load_table(std::path::Path::new("data.xlsx"))?;
//! println!("{} rows, columns: {:?}", table.len(), table.columns());
//! # Ok::<(), ganttboard_ingest::IngestError>(())
//! ```

mod csv;
mod xlsx;

use std::path::Path;

use ganttboard_core::RawTable;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input has no header row")]
    EmptyTable,
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Excel workbook and friends (.xlsx, .xlsm, .xls, .ods)
    Workbook,
    /// Delimited text (.csv, or anything else)
    Csv,
}

/// Detect the input format from the file extension.
pub fn detect_format(path: &Path) -> FileFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("xlsx" | "xlsm" | "xls" | "ods") => FileFormat::Workbook,
        _ => FileFormat::Csv,
    }
}

/// Load the input file into a [`RawTable`] (auto-detects format).
///
/// A missing file is reported as [`IngestError::NotFound`] before any
/// parsing is attempted; a file with no header row is [`IngestError::EmptyTable`].
pub fn load_table(path: &Path) -> Result<RawTable, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }

    let table = match detect_format(path) {
        FileFormat::Workbook => xlsx::read(path)?,
        FileFormat::Csv => csv::read(path)?,
    };

    tracing::debug!(
        rows = table.len(),
        columns = table.columns().len(),
        path = %path.display(),
        "table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_format_workbook_extensions() {
        assert_eq!(detect_format(Path::new("data.xlsx")), FileFormat::Workbook);
        assert_eq!(detect_format(Path::new("data.XLSX")), FileFormat::Workbook);
        assert_eq!(detect_format(Path::new("data.ods")), FileFormat::Workbook);
    }

    #[test]
    fn detect_format_defaults_to_csv() {
        assert_eq!(detect_format(Path::new("data.csv")), FileFormat::Csv);
        assert_eq!(detect_format(Path::new("data.txt")), FileFormat::Csv);
        assert_eq!(detect_format(Path::new("data")), FileFormat::Csv);
    }

    #[test]
    fn missing_file_fails_before_parsing() {
        let err = load_table(Path::new("/nonexistent/data.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
    }
}
