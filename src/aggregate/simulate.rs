//! What-if grade simulation
//!
//! Computes how a hypothetical grade change would move the overall,
//! semester, and year averages, without persisting anything. The input
//! snapshot is borrowed read-only; the modified state lives in a copy
//! owned by this module for the duration of the call.

use serde::{Deserialize, Serialize};

use super::{weighted_average, weighted_average_of};
use crate::course::{CourseRecord, Semester, MAX_GRADE};
use crate::{Error, Result};

/// Aggregate dimension a simulated change is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Dimension {
    /// Every course in the snapshot.
    Overall,
    /// The target's `(year, semester)` group.
    Semester {
        /// Academic year of the target record
        year: i32,
        /// Semester of the target record
        semester: Semester,
    },
    /// The target's year group.
    Year {
        /// Academic year of the target record
        year: i32,
    },
}

/// Before/after movement of one aggregate dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateShift {
    dimension: Dimension,
    before: f64,
    after: f64,
    delta: f64,
}

impl AggregateShift {
    fn new(dimension: Dimension, before: f64, after: f64) -> Self {
        Self {
            dimension,
            before,
            after,
            delta: after - before,
        }
    }

    /// Get the dimension this shift applies to.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Get the average before the simulated change.
    #[must_use]
    pub const fn before(&self) -> f64 {
        self.before
    }

    /// Get the average after the simulated change.
    #[must_use]
    pub const fn after(&self) -> f64 {
        self.after
    }

    /// Get `after - before`.
    #[must_use]
    pub const fn delta(&self) -> f64 {
        self.delta
    }
}

/// Simulate replacing one record's grade and report the moved averages.
///
/// Baselines are computed from the unmodified snapshot, then
/// recomputed on a copy where the record matching `target_id` carries
/// `new_grade`; the caller's snapshot is never mutated. Dimensions
/// whose delta is zero are omitted - a zero-impact change carries no
/// information worth surfacing - and the year dimension is omitted
/// when the year group contains exactly the semester group's records,
/// where it would repeat the semester triple.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if `target_id` matches no record
/// in the snapshot and [`Error::InvalidGrade`] if `new_grade` is above
/// 100. The grade is never clamped.
pub fn simulate_grade_change(
    records: &[CourseRecord],
    target_id: &str,
    new_grade: u8,
) -> Result<Vec<AggregateShift>> {
    if new_grade > MAX_GRADE {
        return Err(Error::InvalidGrade(new_grade));
    }
    let target = records
        .iter()
        .find(|record| record.id() == target_id)
        .ok_or_else(|| Error::RecordNotFound(target_id.to_string()))?;
    let year = target.year();
    let semester = target.semester();

    let modified: Vec<CourseRecord> = records
        .iter()
        .map(|record| {
            if record.id() == target_id {
                record.with_grade(new_grade)
            } else {
                record.clone()
            }
        })
        .collect();

    let mut shifts = Vec::with_capacity(3);
    push_nonzero(
        &mut shifts,
        Dimension::Overall,
        weighted_average(records),
        weighted_average(&modified),
    );
    push_nonzero(
        &mut shifts,
        Dimension::Semester { year, semester },
        weighted_average_of(in_semester(records, year, semester)),
        weighted_average_of(in_semester(&modified, year, semester)),
    );
    if in_year(records, year).count() != in_semester(records, year, semester).count() {
        push_nonzero(
            &mut shifts,
            Dimension::Year { year },
            weighted_average_of(in_year(records, year)),
            weighted_average_of(in_year(&modified, year)),
        );
    }
    Ok(shifts)
}

fn in_semester(
    snapshot: &[CourseRecord],
    year: i32,
    semester: Semester,
) -> impl Iterator<Item = &CourseRecord> {
    snapshot
        .iter()
        .filter(move |r| r.year() == year && r.semester() == semester)
}

fn in_year(snapshot: &[CourseRecord], year: i32) -> impl Iterator<Item = &CourseRecord> {
    snapshot.iter().filter(move |r| r.year() == year)
}

fn push_nonzero(shifts: &mut Vec<AggregateShift>, dimension: Dimension, before: f64, after: f64) {
    let shift = AggregateShift::new(dimension, before, after);
    if shift.delta().abs() >= f64::EPSILON {
        shifts.push(shift);
    }
}
