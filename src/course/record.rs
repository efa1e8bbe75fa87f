//! Course Record - one course entry with grade, credit, year, semester

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upper bound of the closed grade range.
pub const MAX_GRADE: u8 = 100;

/// Academic semester within a year.
///
/// The variant order is the semester rank (A < B < C). Consumers that
/// need a sorted view must order by this rank, not by the wire label:
/// the labels only happen to sort correctly today, and relying on
/// string comparison would break the moment a label changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    /// First semester of the academic year.
    #[serde(rename = "Semester A")]
    A,
    /// Second semester of the academic year.
    #[serde(rename = "Semester B")]
    B,
    /// Summer semester.
    #[serde(rename = "Semester C")]
    C,
}

impl Semester {
    /// Numeric rank used for canonical ordering (A=0, B=1, C=2).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// Wire label, as serialized in record payloads.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Semester A",
            Self::B => "Semester B",
            Self::C => "Semester C",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Course Record represents one stored course.
///
/// Immutable snapshot of a course's attributes. The `id` is assigned by
/// the store on creation and never changes; all other fields are
/// replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseRecord {
    id: String,
    name: String,
    grade: u8,
    credit: f64,
    year: i32,
    semester: Semester,
}

impl CourseRecord {
    /// Create a new course record.
    ///
    /// # Arguments
    ///
    /// * `id` - Opaque identifier assigned by the store
    /// * `name` - Course name
    /// * `grade` - Grade in [0, 100]
    /// * `credit` - Non-negative credit weight
    /// * `year` - Academic year
    /// * `semester` - Semester within the year
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        grade: u8,
        credit: f64,
        year: i32,
        semester: Semester,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade,
            credit,
            year,
            semester,
        }
    }

    /// Attach a store-assigned id to a validated draft.
    #[must_use]
    pub fn from_draft(id: impl Into<String>, draft: CourseDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            grade: draft.grade,
            credit: draft.credit,
            year: draft.year,
            semester: draft.semester,
        }
    }

    /// Get the record id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the course name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the grade.
    #[must_use]
    pub const fn grade(&self) -> u8 {
        self.grade
    }

    /// Get the credit weight.
    #[must_use]
    pub const fn credit(&self) -> f64 {
        self.credit
    }

    /// Get the academic year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Get the semester.
    #[must_use]
    pub const fn semester(&self) -> Semester {
        self.semester
    }

    /// Copy of this record with the grade replaced.
    ///
    /// Used by the simulation engine to build a modified snapshot
    /// without touching the caller's data.
    #[must_use]
    pub fn with_grade(&self, grade: u8) -> Self {
        Self {
            grade,
            ..self.clone()
        }
    }
}

/// Course Draft - an id-less course submission.
///
/// This is the shape external input arrives in. Validation happens
/// here, at the boundary; the aggregation engine assumes records it
/// receives already satisfy the field invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseDraft {
    name: String,
    grade: u8,
    credit: f64,
    year: i32,
    semester: Semester,
}

impl CourseDraft {
    /// Create a new draft.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        grade: u8,
        credit: f64,
        year: i32,
        semester: Semester,
    ) -> Self {
        Self {
            name: name.into(),
            grade,
            credit,
            year,
            semester,
        }
    }

    /// Get the course name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] for an empty name or a
    /// negative/non-finite credit, and [`Error::InvalidGrade`] for a
    /// grade above 100. Grades are never clamped: a silently clamped
    /// value would hide a caller-side validation bug.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord("name must not be empty".to_string()));
        }
        if self.grade > MAX_GRADE {
            return Err(Error::InvalidGrade(self.grade));
        }
        if !self.credit.is_finite() || self.credit < 0.0 {
            return Err(Error::InvalidRecord(format!(
                "credit must be a non-negative finite number, got {}",
                self.credit
            )));
        }
        Ok(())
    }
}
