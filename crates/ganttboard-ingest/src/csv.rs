//! CSV import.
//!
//! All cells come out as text; the normalizer's permissive date parsing is
//! responsible for recognizing date-like and numeric strings.

use std::path::Path;

use ganttboard_core::{CellValue, RawTable};

use crate::IngestError;

pub(crate) fn read(path: &Path) -> Result<RawTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if columns.is_empty() {
        return Err(IngestError::EmptyTable);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(convert_field).collect());
    }

    Ok(RawTable::new(columns, rows))
}

fn convert_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}
