//! Text table renderer for the canonical columns.

use ganttboard_core::{CanonicalField, Record};

use crate::{RenderError, Renderer};

/// Aligned text table of the six canonical columns.
#[derive(Clone, Debug, Default)]
pub struct TableRenderer {
    /// Column separator
    pub separator: &'static str,
}

impl TableRenderer {
    pub fn new() -> Self {
        Self { separator: "  " }
    }

    fn cells(record: &Record) -> [String; 6] {
        [
            record.phase.clone(),
            record.activity.clone(),
            record.start.format("%Y-%m-%d").to_string(),
            record.end.format("%Y-%m-%d").to_string(),
            record.owner.clone(),
            record.status.clone(),
        ]
    }

    fn pad(text: &str, width: usize) -> String {
        let fill = width.saturating_sub(text.chars().count());
        format!("{}{}", text, " ".repeat(fill))
    }
}

impl Renderer for TableRenderer {
    type Output = String;

    fn render(&self, records: &[Record]) -> Result<String, RenderError> {
        if records.is_empty() {
            return Err(RenderError::EmptyRecordSet);
        }

        let headers: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.label()).collect();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        let rows: Vec<[String; 6]> = records.iter().map(Self::cells).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let sep = if self.separator.is_empty() {
            "  "
        } else {
            self.separator
        };

        let mut out = String::new();
        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| Self::pad(h, *w))
            .collect();
        out.push_str(header_line.join(sep).trim_end());
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        out.push_str(&rule.join(sep));
        out.push('\n');

        for row in &rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| Self::pad(cell, *w))
                .collect();
            out.push_str(line.join(sep).trim_end());
            out.push('\n');
        }
        Ok(out)
    }
}
