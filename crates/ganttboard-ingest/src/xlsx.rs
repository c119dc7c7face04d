//! Excel workbook import via calamine.
//!
//! Only the first worksheet is read. Cell values remain as calamine
//! extracted them; date cells are converted through calamine's date support
//! so the normalizer sees native dates rather than raw serials where the
//! workbook provides them.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use ganttboard_core::{CellValue, RawTable};

use crate::IngestError;

pub(crate) fn read(path: &Path) -> Result<RawTable, IngestError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::EmptyTable)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(IngestError::EmptyTable)?;

    let columns: Vec<String> = header.iter().map(header_text).collect();
    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(RawTable::new(columns, data))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        // ISO datetime/duration strings pass through as text; the
        // normalizer's permissive parser handles the date ones.
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_scalar_cells() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::String("Fase 1".into())),
            CellValue::Text("Fase 1".into())
        );
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(convert_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn iso_datetime_stays_text() {
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-10T00:00:00".into())),
            CellValue::Text("2024-01-10T00:00:00".into())
        );
    }

    #[test]
    fn header_cells_render_as_text() {
        assert_eq!(header_text(&Data::String("Inicio".into())), "Inicio");
        assert_eq!(header_text(&Data::Empty), "");
        assert_eq!(header_text(&Data::Float(2024.0)), "2024");
    }
}
