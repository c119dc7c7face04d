//! Categorical filtering and summary metrics.
//!
//! A [`FilterSelection`] holds the accepted values for the three filterable
//! dimensions (Phase, Owner, Status). Applying it is a pure, order-preserving
//! projection over the normalized record set, cheap enough to re-run on
//! every interaction; nothing is re-parsed or re-resolved.
//!
//! An empty result is a valid outcome, not an error: "no data under the
//! current filters" is recoverable by widening the selection, unlike the
//! terminal no-data cases upstream.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::Record;

// ============================================================================
// Filter Selection
// ============================================================================

/// The accepted values per filterable dimension.
///
/// A record is retained only if its phase, owner, and status each belong to
/// the corresponding set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub phases: BTreeSet<String>,
    pub owners: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
}

impl FilterSelection {
    /// The default selection: every value observed in the data, i.e. no
    /// filtering at all.
    pub fn from_records(records: &[Record]) -> Self {
        let mut selection = Self::default();
        for record in records {
            selection.phases.insert(record.phase.clone());
            selection.owners.insert(record.owner.clone());
            selection.statuses.insert(record.status.clone());
        }
        selection
    }

    /// Replace the accepted phases.
    pub fn with_phases(mut self, phases: impl IntoIterator<Item = String>) -> Self {
        self.phases = phases.into_iter().collect();
        self
    }

    /// Replace the accepted owners.
    pub fn with_owners(mut self, owners: impl IntoIterator<Item = String>) -> Self {
        self.owners = owners.into_iter().collect();
        self
    }

    /// Replace the accepted statuses.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = String>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Set-intersect two selections dimension-wise.
    ///
    /// `b.apply(&a.apply(records))` equals `a.intersect(&b).apply(records)`.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            phases: self.phases.intersection(&other.phases).cloned().collect(),
            owners: self.owners.intersection(&other.owners).cloned().collect(),
            statuses: self
                .statuses
                .intersection(&other.statuses)
                .cloned()
                .collect(),
        }
    }

    /// True if the record passes all three dimensions.
    pub fn accepts(&self, record: &Record) -> bool {
        self.phases.contains(&record.phase)
            && self.owners.contains(&record.owner)
            && self.statuses.contains(&record.status)
    }

    /// Project the record set down to the accepted records, preserving
    /// input order.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.accepts(r))
            .cloned()
            .collect()
    }
}

/// Sort records ascending by start date (stable, so input order breaks ties).
pub fn sort_by_start(records: &mut [Record]) {
    records.sort_by_key(|r| r.start);
}

// ============================================================================
// Summary Metrics
// ============================================================================

/// Headline counts for the currently filtered set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total retained records
    pub activities: usize,
    /// Distinct phases among them
    pub phases: usize,
    /// Distinct owners among them
    pub owners: usize,
}

impl Summary {
    pub fn of(records: &[Record]) -> Self {
        let phases: BTreeSet<&str> = records.iter().map(|r| r.phase.as_str()).collect();
        let owners: BTreeSet<&str> = records.iter().map(|r| r.owner.as_str()).collect();
        Self {
            activities: records.len(),
            phases: phases.len(),
            owners: owners.len(),
        }
    }
}

/// Overall date span of a record set, if it is non-empty.
pub fn date_span(records: &[Record]) -> Option<(NaiveDate, NaiveDate)> {
    let first = records.first()?;
    let mut span = (first.start, first.end);
    for record in records {
        span.0 = span.0.min(record.start);
        span.1 = span.1.max(record.end);
    }
    Some(span)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(phase: &str, activity: &str, owner: &str, status: &str, day: u32) -> Record {
        Record {
            phase: phase.into(),
            activity: activity.into(),
            start: date(2024, 1, day),
            end: date(2024, 2, day),
            owner: owner.into(),
            status: status.into(),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("F1", "A", "Ana", "En curso", 10),
            record("F1", "B", "Luis", "Pendiente", 5),
            record("F2", "C", "Ana", "Hecho", 20),
        ]
    }

    #[test]
    fn default_selection_is_identity() {
        let records = sample();
        let selection = FilterSelection::from_records(&records);
        assert_eq!(selection.apply(&records), records);
    }

    #[test]
    fn filtering_preserves_input_order() {
        let records = sample();
        let selection =
            FilterSelection::from_records(&records).with_owners(vec!["Ana".to_string()]);
        let filtered = selection.apply(&records);
        let names: Vec<_> = filtered.iter().map(|r| r.activity.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn all_three_dimensions_must_accept() {
        let records = sample();
        let selection = FilterSelection::from_records(&records)
            .with_phases(vec!["F1".to_string()])
            .with_statuses(vec!["Hecho".to_string()]);
        // "Hecho" only occurs in F2, so the intersection is empty.
        assert!(selection.apply(&records).is_empty());
    }

    #[test]
    fn empty_result_is_valid_not_error() {
        let records = sample();
        let selection =
            FilterSelection::from_records(&records).with_statuses(vec!["Done".to_string()]);
        let filtered = selection.apply(&records);
        assert!(filtered.is_empty());
        assert_eq!(Summary::of(&filtered), Summary::default());
    }

    #[test]
    fn sequential_filters_equal_intersection() {
        let records = sample();
        let all = FilterSelection::from_records(&records);
        let s1 = all
            .clone()
            .with_owners(vec!["Ana".to_string(), "Luis".to_string()]);
        let s2 = all.with_owners(vec!["Ana".to_string()]);

        let sequential = s2.apply(&s1.apply(&records));
        let intersected = s1.intersect(&s2).apply(&records);
        assert_eq!(sequential, intersected);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let selection = FilterSelection::from_records(&records).with_phases(vec!["F1".to_string()]);
        let once = selection.apply(&records);
        let twice = selection.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn sort_by_start_is_ascending_and_stable() {
        let mut records = sample();
        sort_by_start(&mut records);
        let names: Vec<_> = records.iter().map(|r| r.activity.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn summary_counts_distinct_values() {
        let records = sample();
        let summary = Summary::of(&records);
        assert_eq!(summary.activities, 3);
        assert_eq!(summary.phases, 2);
        assert_eq!(summary.owners, 2);
    }

    #[test]
    fn date_span_covers_all_records() {
        let records = sample();
        let (start, end) = date_span(&records).unwrap();
        assert_eq!(start, date(2024, 1, 5));
        assert_eq!(end, date(2024, 2, 20));
        assert_eq!(date_span(&[]), None);
    }
}
