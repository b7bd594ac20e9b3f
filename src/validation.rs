//! Input integrity checks.
//!
//! Inspects a normalized record set for known data problems before
//! evaluation. Findings are warnings, not failures — evaluation always
//! proceeds. Detects:
//! - Mutual-exclusion violations between equivalence-paired courses
//! - Completed records carrying grades the scale does not know

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::models::{CourseCode, CourseRecord};

/// A non-fatal data-integrity finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityWarning {
    /// Finding category.
    pub kind: IntegrityWarningKind,
    /// The course the finding is about.
    pub course: CourseCode,
    /// Human-readable description.
    pub message: String,
}

/// Categories of integrity findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityWarningKind {
    /// Both halves of a mutually exclusive course pair appear completed.
    MutualExclusion,
    /// A completed record's grade is neither on the scale nor an excluded
    /// code — likely parser drift.
    UnknownGrade,
}

impl IntegrityWarning {
    fn new(kind: IntegrityWarningKind, course: CourseCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            course,
            message: message.into(),
        }
    }
}

/// Checks a record set against the catalog's integrity rules.
///
/// Returns all findings; also emits each through `tracing::warn!`.
pub fn check_integrity(courses: &[CourseRecord], catalog: &Catalog) -> Vec<IntegrityWarning> {
    let mut warnings = Vec::new();

    for eq in &catalog.equivalences {
        let has_primary = courses
            .iter()
            .any(|r| r.completed && r.matches_code(&eq.code));
        let has_exclusive = courses
            .iter()
            .any(|r| r.completed && r.matches_code(&eq.exclusive_with));
        if has_primary && has_exclusive {
            warnings.push(IntegrityWarning::new(
                IntegrityWarningKind::MutualExclusion,
                eq.code.clone(),
                format!(
                    "{} and {} are mutually exclusive but both appear completed",
                    eq.code, eq.exclusive_with
                ),
            ));
        }
    }

    for record in courses {
        if record.completed && !catalog.grades.is_known(&record.grade) {
            warnings.push(IntegrityWarning::new(
                IntegrityWarningKind::UnknownGrade,
                record.code(),
                format!("{} has unrecognized grade '{}'", record.code(), record.grade),
            ));
        }
    }

    for warning in &warnings {
        warn!(course = %warning.course, "{}", warning.message);
    }

    warnings
}
