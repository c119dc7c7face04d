//! Record normalization and date coercion.
//!
//! Given a complete [`ColumnMapping`], this module projects each raw row
//! onto the six canonical fields and coerces `Start`/`End` into calendar
//! dates. Parsing is permissive and failure is not an error: a value that
//! cannot be read as a date becomes "no date", and the row-filtering stage
//! treats that as an exclusion predicate. Rows are also excluded when the
//! end date precedes the start date.
//!
//! Exclusions are never surfaced per row; they are counted in
//! [`ExclusionStats`] so the shell can report "N rows excluded".

use chrono::NaiveDate;

use crate::schema::{ColumnMapping, SchemaError};
use crate::{CanonicalField, CellValue, RawTable, Record};

// ============================================================================
// Date Coercion
// ============================================================================

/// Text date formats accepted, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
];

/// Datetime formats accepted; the time component is discarded.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];

/// Excel's day-serial epoch (serial 1 = 1900-01-01, with the historical
/// off-by-two for the phantom 1900 leap day).
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch")
}

/// Coerce a cell into a calendar date, permissively.
///
/// - Native date cells pass through.
/// - Numbers are read as Excel day serials.
/// - Text is tried against common date and datetime formats.
///
/// Returns `None` for anything unreadable; never errors.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Number(n) => parse_serial(*n),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

fn parse_serial(serial: f64) -> Option<NaiveDate> {
    // 2958465 is serial for 9999-12-31, the end of Excel's date range.
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    excel_epoch().checked_add_days(chrono::Days::new(serial.trunc() as u64))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    // Numeric text is treated like a numeric cell (day serial).
    if let Ok(n) = text.parse::<f64>() {
        return parse_serial(n);
    }
    None
}

// ============================================================================
// Normalization
// ============================================================================

/// Why rows were dropped during normalization, as counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExclusionStats {
    /// Rows where `Start` or `End` could not be read as a date
    pub unparseable_dates: usize,
    /// Rows where `End` preceded `Start`
    pub inverted_range: usize,
}

impl ExclusionStats {
    pub fn total(&self) -> usize {
        self.unparseable_dates + self.inverted_range
    }
}

/// The normalized record set plus its exclusion counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normalized {
    /// Retained records, in input order
    pub records: Vec<Record>,
    /// Rows dropped, by cause
    pub excluded: ExclusionStats,
}

/// Project a raw table onto the canonical schema.
///
/// Requires a complete mapping; an incomplete one fails with
/// [`SchemaError::Unresolved`] before any row is touched. Row-level problems
/// never fail: invalid rows are dropped and counted.
pub fn normalize(table: &RawTable, mapping: &ColumnMapping) -> Result<Normalized, SchemaError> {
    mapping.require_complete()?;

    // Safe to unwrap after require_complete.
    let index_of = |field: CanonicalField| mapping.get(field).expect("complete mapping").index;
    let phase_col = index_of(CanonicalField::Phase);
    let activity_col = index_of(CanonicalField::Activity);
    let start_col = index_of(CanonicalField::Start);
    let end_col = index_of(CanonicalField::End);
    let owner_col = index_of(CanonicalField::Owner);
    let status_col = index_of(CanonicalField::Status);

    let mut normalized = Normalized::default();

    for row in 0..table.len() {
        let start = parse_date(table.cell(row, start_col));
        let end = parse_date(table.cell(row, end_col));

        let (Some(start), Some(end)) = (start, end) else {
            normalized.excluded.unparseable_dates += 1;
            continue;
        };
        if end < start {
            normalized.excluded.inverted_range += 1;
            continue;
        }

        normalized.records.push(Record {
            phase: table.cell(row, phase_col).display(),
            activity: table.cell(row, activity_col).display(),
            start,
            end,
            owner: table.cell(row, owner_col).display(),
            status: table.cell(row, status_col).display(),
        });
    }

    if normalized.excluded.total() > 0 {
        tracing::warn!(
            unparseable = normalized.excluded.unparseable_dates,
            inverted = normalized.excluded.inverted_range,
            "rows excluded during normalization"
        );
    }

    Ok(normalized)
}

// ============================================================================
// Tests
// ============================================================================
