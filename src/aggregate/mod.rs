//! Aggregation engine - credit-weighted averages over course snapshots
//!
//! Pure functions over a materialized slice of [`CourseRecord`]s. The
//! engine never fetches, never mutates its input, and holds no state
//! across calls: callers resolve records from the store first, then
//! hand the same snapshot to as many aggregation calls as they like.
//!
//! ## Averaging policy
//!
//! Every average in this module is the credit-weighted mean
//! `sum(grade * credit) / sum(credit)`. A snapshot with zero total
//! credit (empty, or all-zero-credit) averages to `0.0` rather than
//! faulting: an empty course list is a normal state, not an error.
//!
//! ## Example
//!
//! ```rust
//! use gradebook::aggregate;
//! use gradebook::course::{CourseRecord, Semester};
//!
//! let records = vec![
//!     CourseRecord::new("a", "Algorithms", 80, 2.0, 2024, Semester::A),
//!     CourseRecord::new("b", "Databases", 100, 1.0, 2024, Semester::B),
//! ];
//!
//! let avg = aggregate::weighted_average(&records);
//! assert!((avg - 260.0 / 3.0).abs() < 1e-9);
//! ```

mod simulate;

pub use simulate::{simulate_grade_change, AggregateShift, Dimension};

use std::collections::{BTreeMap, HashSet};

use crate::course::{CourseRecord, Semester};

/// Group key for `(year, semester)` partitions.
///
/// Ordering is ascending year, then semester rank (A < B < C), so a
/// `BTreeMap` keyed by `GroupKey` iterates in the canonical
/// presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    year: i32,
    semester: Semester,
}

impl GroupKey {
    /// Create a group key.
    #[must_use]
    pub const fn new(year: i32, semester: Semester) -> Self {
        Self { year, semester }
    }

    /// Get the academic year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Get the semester.
    #[must_use]
    pub const fn semester(self) -> Semester {
        self.semester
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.year, self.semester)
    }
}

/// Credit-weighted average over a snapshot.
///
/// Returns `0.0` when the total credit is zero (empty input or
/// all-zero-credit input); callers never observe a division fault.
#[must_use]
pub fn weighted_average(records: &[CourseRecord]) -> f64 {
    weighted_average_of(records.iter())
}

fn weighted_average_of<'a>(records: impl IntoIterator<Item = &'a CourseRecord>) -> f64 {
    let mut weighted = 0.0;
    let mut total_credit = 0.0;
    for record in records {
        weighted += f64::from(record.grade()) * record.credit();
        total_credit += record.credit();
    }
    if total_credit <= 0.0 {
        return 0.0;
    }
    weighted / total_credit
}

/// Partition a snapshot by academic year.
///
/// Every record lands in exactly one partition; iteration order of the
/// returned map is ascending year.
#[must_use]
pub fn group_by_year(records: &[CourseRecord]) -> BTreeMap<i32, Vec<&CourseRecord>> {
    let mut groups: BTreeMap<i32, Vec<&CourseRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.year()).or_default().push(record);
    }
    groups
}

/// Partition a snapshot by `(year, semester)`.
///
/// Every record lands in exactly one partition; iteration order of the
/// returned map is ascending year, then semester rank.
#[must_use]
pub fn group_by_semester(records: &[CourseRecord]) -> BTreeMap<GroupKey, Vec<&CourseRecord>> {
    let mut groups: BTreeMap<GroupKey, Vec<&CourseRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(GroupKey::new(record.year(), record.semester()))
            .or_default()
            .push(record);
    }
    groups
}

/// Weighted average per academic year, in ascending year order.
#[must_use]
pub fn averages_by_year(records: &[CourseRecord]) -> BTreeMap<i32, f64> {
    group_by_year(records)
        .into_iter()
        .map(|(year, members)| (year, weighted_average_of(members.into_iter())))
        .collect()
}

/// Weighted average per `(year, semester)` group, in canonical order.
#[must_use]
pub fn averages_by_semester(records: &[CourseRecord]) -> BTreeMap<GroupKey, f64> {
    group_by_semester(records)
        .into_iter()
        .map(|(key, members)| (key, weighted_average_of(members.into_iter())))
        .collect()
}

/// Weighted average over the records whose name is in `names`.
///
/// Returns `None` when the selection is empty or matches nothing - a
/// distinct "no selection computed" signal, so callers can tell a
/// skipped computation apart from a genuine zero average.
#[must_use]
pub fn selected_average(records: &[CourseRecord], names: &HashSet<String>) -> Option<f64> {
    if names.is_empty() {
        return None;
    }
    let selected: Vec<&CourseRecord> = records
        .iter()
        .filter(|record| names.contains(record.name()))
        .collect();
    if selected.is_empty() {
        return None;
    }
    Some(weighted_average_of(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CourseRecord> {
        vec![
            CourseRecord::new("id-1", "Algorithms", 90, 2.0, 2024, Semester::A),
            CourseRecord::new("id-2", "Databases", 70, 2.0, 2024, Semester::B),
            CourseRecord::new("id-3", "Compilers", 85, 4.0, 2025, Semester::A),
        ]
    }

    #[test]
    fn test_weighted_average_formula() {
        let records = vec![
            CourseRecord::new("a", "X", 80, 2.0, 2024, Semester::A),
            CourseRecord::new("b", "Y", 100, 1.0, 2024, Semester::A),
        ];
        let avg = weighted_average(&records);
        assert!((avg - 260.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_empty_is_zero() {
        assert!(weighted_average(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighted_average_zero_credit_is_zero() {
        let records = vec![
            CourseRecord::new("a", "X", 80, 0.0, 2024, Semester::A),
            CourseRecord::new("b", "Y", 100, 0.0, 2024, Semester::A),
        ];
        assert!(weighted_average(&records).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_by_year_partitions() {
        let records = sample();
        let groups = group_by_year(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&2024].len(), 2);
        assert_eq!(groups[&2025].len(), 1);
    }

    #[test]
    fn test_group_averages_same_year_two_semesters() {
        // Same year, semesters A and B, credits 2 and 2, grades 90 and 70.
        let records = vec![
            CourseRecord::new("a", "X", 90, 2.0, 2024, Semester::A),
            CourseRecord::new("b", "Y", 70, 2.0, 2024, Semester::B),
        ];
        let by_year = averages_by_year(&records);
        assert!((by_year[&2024] - 80.0).abs() < 1e-9);

        let by_semester = averages_by_semester(&records);
        assert!((by_semester[&GroupKey::new(2024, Semester::A)] - 90.0).abs() < 1e-9);
        assert!((by_semester[&GroupKey::new(2024, Semester::B)] - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_semester_groups_iterate_in_canonical_order() {
        let records = vec![
            CourseRecord::new("a", "X", 90, 2.0, 2025, Semester::A),
            CourseRecord::new("b", "Y", 70, 2.0, 2024, Semester::C),
            CourseRecord::new("c", "Z", 80, 2.0, 2024, Semester::A),
        ];
        let keys: Vec<GroupKey> = group_by_semester(&records).into_keys().collect();
        assert_eq!(
            keys,
            vec![
                GroupKey::new(2024, Semester::A),
                GroupKey::new(2024, Semester::C),
                GroupKey::new(2025, Semester::A),
            ]
        );
    }

    #[test]
    fn test_selected_average_filters_by_name() {
        let records = sample();
        let names: HashSet<String> = ["Algorithms", "Compilers"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let avg = selected_average(&records, &names).unwrap();
        // (90*2 + 85*4) / 6
        assert!((avg - 520.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_selected_average_no_match_is_distinct_from_zero() {
        let records = sample();
        let names: HashSet<String> = std::iter::once("unknown name".to_string()).collect();
        assert_eq!(selected_average(&records, &names), None);
    }

    #[test]
    fn test_selected_average_empty_selection() {
        let records = sample();
        assert_eq!(selected_average(&records, &HashSet::new()), None);
    }

    #[test]
    fn test_group_key_display() {
        let key = GroupKey::new(2024, Semester::B);
        assert_eq!(key.to_string(), "2024 Semester B");
    }
}
