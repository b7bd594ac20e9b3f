//! Course record model.
//!
//! A course record represents one completed or in-progress enrollment as
//! exported by the academic-records system. Records reach this crate already
//! parsed and filtered (see `intake`) — the engine and GPA calculator never
//! see a failing for-credit attempt or a malformed row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A canonical course identifier: department subject plus course number.
///
/// Numbers are 3–4 digit strings. Legacy 3-digit numbers map to canonical
/// 4-digit equivalents via [`CourseRecord::cross_listed_as`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseCode {
    /// Department code, e.g. "CIS".
    pub subject: String,
    /// Course number, e.g. "1100" or legacy "110".
    pub number: String,
}

impl CourseCode {
    /// Creates a course code.
    pub fn new(subject: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            number: number.into(),
        }
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)
    }
}

/// How the enrollment was graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradingKind {
    /// Pass/fail election. A failing grade under this kind still counts
    /// toward GPA (see the GPA calculator's inclusion rules).
    PassFail,
    /// Standard letter grading.
    ForCredit,
}

/// One completed or in-progress enrollment.
///
/// # Grade codes
/// `grade` holds either a letter grade with optional +/- or one of the
/// special codes: TR (transfer), I (incomplete), GR (grade-replaced),
/// NR (not reported), P (pass). In-progress records carry an empty grade
/// and `completed == false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Department code, e.g. "CIS".
    pub subject: String,
    /// Course number string, 3–4 digits.
    pub number: String,
    /// Course title as exported.
    pub title: String,
    /// Canonical 4-digit equivalent when the record carries a legacy number.
    pub cross_listed_as: Option<CourseCode>,
    /// Credit units, positive (0.5, 1.0, 1.5, ...).
    pub credit_units: f64,
    /// Grading basis.
    pub grading: GradingKind,
    /// Letter grade or special code; empty for in-progress records.
    pub grade: String,
    /// Term code: year * 100 + semester (10 = spring, 20 = summer, 30 = fall).
    /// Monotonically comparable across terms.
    pub term: u32,
    /// Catalog attribute tags (e.g. "EUSS", "EUTE"), duplicates collapsed.
    pub attributes: BTreeSet<String>,
    /// Whether the enrollment has a final outcome. `false` = in progress.
    pub completed: bool,
}

impl CourseRecord {
    /// Creates a completed 1.0-CU for-credit record. Remaining fields via
    /// the `with_*` builders.
    pub fn new(subject: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            number: number.into(),
            title: String::new(),
            cross_listed_as: None,
            credit_units: 1.0,
            grading: GradingKind::ForCredit,
            grade: String::new(),
            term: 0,
            attributes: BTreeSet::new(),
            completed: true,
        }
    }

    /// Sets the course title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the cross-listed canonical code.
    pub fn with_cross_listing(mut self, code: CourseCode) -> Self {
        self.cross_listed_as = Some(code);
        self
    }

    /// Sets the credit units.
    pub fn with_credit_units(mut self, cu: f64) -> Self {
        self.credit_units = cu;
        self
    }

    /// Sets the grading basis.
    pub fn with_grading(mut self, grading: GradingKind) -> Self {
        self.grading = grading;
        self
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Sets the term code.
    pub fn with_term(mut self, term: u32) -> Self {
        self.term = term;
        self
    }

    /// Adds an attribute tag.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.insert(attribute.into());
        self
    }

    /// Marks the record in progress (no final grade yet).
    pub fn in_progress(mut self) -> Self {
        self.completed = false;
        self.grade = String::new();
        self
    }

    /// Canonical identifier, `"SUBJECT NUMBER"`.
    pub fn code(&self) -> CourseCode {
        CourseCode::new(self.subject.clone(), self.number.clone())
    }

    /// Whether this record answers to `code`, either directly or through
    /// its cross-listed alternate.
    pub fn matches_code(&self, code: &CourseCode) -> bool {
        (self.subject == code.subject && self.number == code.number)
            || self.cross_listed_as.as_ref() == Some(code)
    }

    /// Whether this record carries the given attribute tag.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

/// Parses a raw semicolon-delimited attribute blob.
///
/// The export lists attributes as `ATTRIBUTE=XXXX` tokens separated by
/// semicolons, interleaved with unrelated tokens. Every token carrying the
/// `ATTRIBUTE=` prefix contributes its value; duplicates collapse.
pub fn parse_attribute_blob(blob: &str) -> BTreeSet<String> {
    blob.split(';')
        .filter_map(|token| token.trim().strip_prefix("ATTRIBUTE="))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
