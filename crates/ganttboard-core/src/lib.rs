//! # ganttboard-core
//!
//! Canonical schema and record pipeline for the ganttboard dashboard.
//!
//! This crate provides:
//! - Domain types: `RawTable`, `CellValue`, `Record`, `CanonicalField`
//! - Schema resolution: alias-based column mapping (`schema` module)
//! - Record normalization and date coercion (`normalize` module)
//! - Categorical filtering and summary metrics (`filter` module)
//!
//! The pipeline is a sequence of pure transformations:
//!
//! ```text
//! RawTable -> ColumnMapping -> Normalized -> FilterSelection::apply -> Summary
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ganttboard_core::{CellValue, RawTable};
//! use ganttboard_core::schema::ColumnMapping;
//! use ganttboard_core::normalize::normalize;
//! use ganttboard_core::filter::{FilterSelection, Summary};
//!
//! let table = RawTable::new(
//!     vec!["Etapa".into(), "Tarea".into(), "Inicio".into(),
//!          "Fin".into(), "Encargado".into(), "Estado".into()],
//!     vec![vec![
//!         CellValue::Text("Diseño".into()),
//!         CellValue::Text("Wireframes".into()),
//!         CellValue::Text("2024-01-08".into()),
//!         CellValue::Text("2024-01-19".into()),
//!         CellValue::Text("Ana".into()),
//!         CellValue::Text("En curso".into()),
//!     ]],
//! );
//!
//! let mapping = ColumnMapping::resolve(table.columns());
//! assert!(mapping.missing().is_empty());
//!
//! let normalized = normalize(&table, &mapping).unwrap();
//! let selection = FilterSelection::from_records(&normalized.records);
//! let filtered = selection.apply(&normalized.records);
//! assert_eq!(Summary::of(&filtered).activities, 1);
//! ```

pub mod filter;
pub mod normalize;
pub mod schema;

pub use filter::{FilterSelection, Summary};
pub use normalize::{normalize, parse_date, ExclusionStats, Normalized};
pub use schema::{normalize_column, ColumnMapping, SchemaDiagnostics, SchemaError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Canonical Fields
// ============================================================================

/// One of the six standardized output columns every dashboard record carries.
///
/// Each field owns a priority-ordered list of accepted column-name aliases
/// (Spanish/English mixed, matching the spreadsheets this tool is fed) and a
/// display label used in diagnostics and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    /// Project phase the activity belongs to
    Phase,
    /// Activity (task) name
    Activity,
    /// Start date
    Start,
    /// End date
    End,
    /// Person responsible
    Owner,
    /// Progress status
    Status,
}

impl CanonicalField {
    /// All canonical fields, in output column order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Phase,
        CanonicalField::Activity,
        CanonicalField::Start,
        CanonicalField::End,
        CanonicalField::Owner,
        CanonicalField::Status,
    ];

    /// Stable identifier for serialization and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Phase => "phase",
            CanonicalField::Activity => "activity",
            CanonicalField::Start => "start",
            CanonicalField::End => "end",
            CanonicalField::Owner => "owner",
            CanonicalField::Status => "status",
        }
    }

    /// Display label, as shown in diagnostics and missing-column errors.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::Phase => "Fase",
            CanonicalField::Activity => "Actividad",
            CanonicalField::Start => "Inicio",
            CanonicalField::End => "Fin",
            CanonicalField::Owner => "Responsable",
            CanonicalField::Status => "Estado",
        }
    }

    /// Accepted column-name aliases, highest priority first.
    ///
    /// Matching is exact (post-normalization); the first alias present in
    /// the input wins regardless of the order columns appear in the file.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Phase => &["fase", "etapa", "phase"],
            CanonicalField::Activity => {
                &["actividad", "tarea", "task", "nombre", "actividad/tarea"]
            }
            CanonicalField::Start => {
                &["inicio", "fecha inicio", "start", "start date", "fecha_inicio"]
            }
            CanonicalField::End => &[
                "fin",
                "fecha fin",
                "end",
                "end date",
                "fecha_fin",
                "termino",
                "término",
                "final",
            ],
            CanonicalField::Owner => &["responsable", "owner", "asignado", "encargado"],
            CanonicalField::Status => &["estado", "status", "situacion", "situación"],
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Raw Input
// ============================================================================

/// A single scalar cell from the input spreadsheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Blank cell
    Empty,
    /// Free text
    Text(String),
    /// Numeric value (integers widen to f64)
    Number(f64),
    /// Native date cell
    Date(NaiveDate),
    /// Boolean cell
    Bool(bool),
}

impl CellValue {
    /// Render the cell as display text for the categorical fields.
    ///
    /// Numbers drop a trailing `.0` so an Excel cell holding `3` does not
    /// surface as the category `"3.0"`.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// True for blank cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// The raw spreadsheet contents: free-form column names plus rows of cells.
///
/// Produced once by ingestion and immutable afterwards; every later stage is
/// a pure function over it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Column names exactly as they appeared in the header row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, column index), treating ragged rows as blank-padded.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

// ============================================================================
// Normalized Output
// ============================================================================

/// A row reduced to the six canonical fields with valid, consistent dates.
///
/// Invariant: `end >= start`. Rows that cannot satisfy this are dropped
/// during normalization and never become a `Record`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub phase: String,
    pub activity: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub owner: String,
    pub status: String,
}

impl Record {
    /// Inclusive duration of the activity in calendar days.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

// ============================================================================
// Tests
// ============================================================================
