//! Unicode timeline renderer.
//!
//! Draws one bar row per activity, scaled so the full date span of the
//! record set fits the configured chart width. The same proportional
//! mapping an SVG Gantt uses (days to pixels) applies here with character
//! cells as the unit.
//!
//! ## Example Output
//!
//! ```text
//! Actividad                │2024-01-08                        2024-02-02│
//! ─────────────────────────┼──────────────────────────────────────────────
//! Entrevistas              │████████                                     │
//! Wireframes               │          ██████████████                     │
//! Prototipo                │                        █████████████████████│
//! ```

use chrono::NaiveDate;
use ganttboard_core::filter::date_span;
use ganttboard_core::Record;

use crate::{RenderError, Renderer};

/// Unicode timeline renderer configuration
#[derive(Clone, Debug)]
pub struct TimelineRenderer {
    /// Width of the chart area (excluding labels) in character cells
    pub chart_width: usize,
    /// Width of the activity label column
    pub label_width: usize,
    /// Character used for bars
    pub bar_char: char,
    /// Whether to draw the date axis header
    pub show_axis: bool,
}

impl Default for TimelineRenderer {
    fn default() -> Self {
        Self {
            chart_width: 60,
            label_width: 24,
            bar_char: '█',
            show_axis: true,
        }
    }
}

impl TimelineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn width(mut self, width: usize) -> Self {
        self.chart_width = width.max(10);
        self
    }

    /// Configure label column width
    pub fn label_width(mut self, width: usize) -> Self {
        self.label_width = width.max(4);
        self
    }

    /// Disable the date axis header
    pub fn no_axis(mut self) -> Self {
        self.show_axis = false;
        self
    }

    /// Character cells per day for the given span.
    fn cells_per_day(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = ((end - start).num_days() + 1).max(1) as f64;
        self.chart_width as f64 / days
    }

    /// Convert a date to a column offset inside the chart area.
    fn date_to_col(&self, date: NaiveDate, span_start: NaiveDate, cells_per_day: f64) -> usize {
        let days = (date - span_start).num_days() as f64;
        ((days * cells_per_day).floor() as usize).min(self.chart_width.saturating_sub(1))
    }

    fn pad_label(&self, text: &str) -> String {
        let truncated: String = text.chars().take(self.label_width).collect();
        let fill = self.label_width - truncated.chars().count();
        format!("{}{}", truncated, " ".repeat(fill))
    }

    fn axis_line(&self, span_start: NaiveDate, span_end: NaiveDate) -> String {
        let start_label = span_start.format("%Y-%m-%d").to_string();
        let end_label = span_end.format("%Y-%m-%d").to_string();
        let gap = self
            .chart_width
            .saturating_sub(start_label.len() + end_label.len());
        format!(
            "{}│{}{}{}│",
            self.pad_label("Actividad"),
            start_label,
            " ".repeat(gap),
            end_label
        )
    }

    fn bar_line(
        &self,
        record: &Record,
        span_start: NaiveDate,
        cells_per_day: f64,
    ) -> String {
        let from = self.date_to_col(record.start, span_start, cells_per_day);
        let to = self.date_to_col(record.end, span_start, cells_per_day);
        // Every retained activity spans at least one day, so it always gets
        // at least one cell.
        let len = to - from + 1;
        let tail = self.chart_width - from - len;

        format!(
            "{}│{}{}{}│",
            self.pad_label(&record.activity),
            " ".repeat(from),
            self.bar_char.to_string().repeat(len),
            " ".repeat(tail)
        )
    }
}

impl Renderer for TimelineRenderer {
    type Output = String;

    fn render(&self, records: &[Record]) -> Result<String, RenderError> {
        let (span_start, span_end) = date_span(records).ok_or(RenderError::EmptyRecordSet)?;
        let cells_per_day = self.cells_per_day(span_start, span_end);

        let mut out = String::new();
        if self.show_axis {
            out.push_str(&self.axis_line(span_start, span_end));
            out.push('\n');
            out.push_str(&"─".repeat(self.label_width));
            out.push('┼');
            out.push_str(&"─".repeat(self.chart_width + 1));
            out.push('\n');
        }
        for record in records {
            out.push_str(&self.bar_line(record, span_start, cells_per_day));
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(activity: &str, start: NaiveDate, end: NaiveDate) -> Record {
        Record {
            phase: "F1".into(),
            activity: activity.into(),
            start,
            end,
            owner: "Ana".into(),
            status: "En curso".into(),
        }
    }

    #[test]
    fn empty_set_is_an_error() {
        let result = TimelineRenderer::new().render(&[]);
        assert!(matches!(result, Err(RenderError::EmptyRecordSet)));
    }

    #[test]
    fn full_span_record_fills_the_chart() {
        // Ten days across ten cells: one cell per day.
        let records = vec![record("todo", date(2024, 1, 1), date(2024, 1, 10))];
        let out = TimelineRenderer::new()
            .width(10)
            .label_width(4)
            .no_axis()
            .render(&records)
            .unwrap();
        assert_eq!(out, "todo│██████████│\n");
    }

    #[test]
    fn bars_are_positioned_proportionally() {
        let records = vec![
            record("a", date(2024, 1, 1), date(2024, 1, 2)),
            record("b", date(2024, 1, 9), date(2024, 1, 10)),
        ];
        let out = TimelineRenderer::new()
            .width(10)
            .label_width(4)
            .no_axis()
            .render(&records)
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "a   │██        │");
        assert_eq!(lines[1], "b   │        ██│");
    }

    #[test]
    fn single_day_activity_gets_one_cell() {
        let records = vec![
            record("span", date(2024, 1, 1), date(2024, 1, 10)),
            record("hito", date(2024, 1, 5), date(2024, 1, 5)),
        ];
        let out = TimelineRenderer::new()
            .width(10)
            .label_width(4)
            .no_axis()
            .render(&records)
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "hito│    █     │");
    }

    #[test]
    fn long_labels_are_truncated() {
        let records = vec![record(
            "una actividad con nombre muy largo",
            date(2024, 1, 1),
            date(2024, 1, 2),
        )];
        let out = TimelineRenderer::new()
            .width(10)
            .label_width(8)
            .no_axis()
            .render(&records)
            .unwrap();
        assert!(out.starts_with("una acti│"));
    }

    #[test]
    fn axis_shows_span_boundaries() {
        let records = vec![record("a", date(2024, 1, 8), date(2024, 2, 2))];
        let out = TimelineRenderer::new().render(&records).unwrap();
        let first = out.lines().next().unwrap();
        assert!(first.contains("2024-01-08"));
        assert!(first.contains("2024-02-02"));
    }
}
