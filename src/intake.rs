//! Record construction and filtering.
//!
//! Sits between the audit-export parser and the evaluation core. Raw rows
//! are normalized into [`CourseRecord`]s here, and rows that should never
//! reach evaluation are dropped — business-rule filtering, not failure.
//! Downstream code may therefore assume every record it sees is either a
//! completed attempt (a pass, or an explicitly retained pass/fail F) or an
//! in-progress enrollment.

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{parse_attribute_blob, CourseCode, CourseRecord, GradingKind};

/// Grades whose completed rows never become records (failing or
/// non-counting outcomes). A pass/fail F is the one exception — it still
/// counts toward GPA.
const DROPPED_GRADES: [&str; 3] = ["F", "I", "NS"];

/// One row as produced by the audit-export parser, before normalization.
#[derive(Debug, Clone)]
pub struct RawCourseRow {
    /// Department code.
    pub subject: String,
    /// Course number string.
    pub number: String,
    /// Course title.
    pub title: String,
    /// Canonical 4-digit equivalent for legacy 3-digit rows.
    pub cross_listed_as: Option<CourseCode>,
    /// Credit units.
    pub credit_units: f64,
    /// Grading basis as exported.
    pub grading: GradingKind,
    /// Grade or special code; empty when in progress.
    pub grade: String,
    /// Term code (year * 100 + semester).
    pub term: u32,
    /// Raw semicolon-delimited attribute blob.
    pub attribute_blob: String,
    /// Whether the row has a final outcome.
    pub completed: bool,
}

impl RawCourseRow {
    /// Creates a completed for-credit row. Remaining fields default empty.
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
            attribute_blob: String::new(),
            completed: true,
        }
    }
}

/// Normalizes one raw row into a course record, or drops it.
///
/// Steps, in order:
/// 1. Pass/fail elections from the catalog's exception terms are
///    reclassified as for-credit (those terms' election carried for-credit
///    semantics).
/// 2. Completed rows graded F, I, or NS are dropped — unless the F was
///    earned under (still-)pass/fail grading, which is retained.
///    In-progress rows are always retained.
/// 3. The attribute blob is parsed; duplicates collapse.
/// 4. A catalog equivalence entry adds its implied attribute (known data
///    gap in the export).
pub fn normalize(raw: RawCourseRow, catalog: &Catalog) -> Option<CourseRecord> {
    let grading = if raw.grading == GradingKind::PassFail
        && catalog.pass_fail_exception_terms.contains(&raw.term)
    {
        GradingKind::ForCredit
    } else {
        raw.grading
    };

    if raw.completed
        && DROPPED_GRADES.contains(&raw.grade.as_str())
        && !(raw.grade == "F" && grading == GradingKind::PassFail)
    {
        debug!(
            subject = %raw.subject,
            number = %raw.number,
            grade = %raw.grade,
            "dropping non-counting row"
        );
        return None;
    }

    let mut record = CourseRecord {
        subject: raw.subject,
        number: raw.number,
        title: raw.title,
        cross_listed_as: raw.cross_listed_as,
        credit_units: raw.credit_units,
        grading,
        grade: raw.grade,
        term: raw.term,
        attributes: parse_attribute_blob(&raw.attribute_blob),
        completed: raw.completed,
    };

    if let Some(eq) = catalog.equivalence_for(&record) {
        record.attributes.insert(eq.implied_attribute.clone());
    }

    Some(record)
}

/// Normalizes a batch of rows, preserving input order of the retained ones.
pub fn normalize_all(rows: Vec<RawCourseRow>, catalog: &Catalog) -> Vec<CourseRecord> {
    rows.into_iter()
        .filter_map(|row| normalize(row, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(subject: &str, number: &str, grade: &str) -> RawCourseRow {
        let mut row = RawCourseRow::new(subject, number);
        row.grade = grade.to_string();
        row.term = 202330;
        row
    }

    #[test]
    fn test_passing_row_retained() {
        let record = normalize(raw("CIS", "1100", "A"), &Catalog::default()).unwrap();
        assert_eq!(record.grade, "A");
        assert_eq!(record.grading, GradingKind::ForCredit);
    }

    #[test]
    fn test_failing_for_credit_dropped() {
        assert!(normalize(raw("CIS", "1100", "F"), &Catalog::default()).is_none());
        assert!(normalize(raw("CIS", "1100", "I"), &Catalog::default()).is_none());
        assert!(normalize(raw("CIS", "1100", "NS"), &Catalog::default()).is_none());
    }

    #[test]
    fn test_pass_fail_f_retained() {
        let mut row = raw("CIS", "1100", "F");
        row.grading = GradingKind::PassFail;
        let record = normalize(row, &Catalog::default()).unwrap();
        assert_eq!(record.grade, "F");
        assert_eq!(record.grading, GradingKind::PassFail);
    }

    #[test]
    fn test_exception_term_reclassifies_pass_fail() {
        let mut row = raw("CIS", "1100", "P");
        row.grading = GradingKind::PassFail;
        row.term = 202010;
        let record = normalize(row, &Catalog::default()).unwrap();
        assert_eq!(record.grading, GradingKind::ForCredit);
    }

    #[test]
    fn test_exception_term_f_dropped() {
        // Reclassification runs first, so a pass/fail F from an exception
        // term is a for-credit F and is dropped.
        let mut row = raw("CIS", "1100", "F");
        row.grading = GradingKind::PassFail;
        row.term = 202030;
        assert!(normalize(row, &Catalog::default()).is_none());
    }

    #[test]
    fn test_in_progress_retained() {
        let mut row = raw("CIS", "1100", "");
        row.completed = false;
        let record = normalize(row, &Catalog::default()).unwrap();
        assert!(!record.completed);
    }

    #[test]
    fn test_attribute_blob_parsed() {
        let mut row = raw("PSYC", "0001", "B+");
        row.attribute_blob = "ATTRIBUTE=EUSS; COURSE LEVEL=UG; ATTRIBUTE=EUSS".to_string();
        let record = normalize(row, &Catalog::default()).unwrap();
        assert_eq!(record.attributes.len(), 1);
        assert!(record.has_attribute("EUSS"));
    }

    #[test]
    fn test_equivalence_attribute_injected() {
        let record = normalize(raw("EAS", "0091", "B"), &Catalog::default()).unwrap();
        assert!(record.has_attribute("EUNS"));
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let rows = vec![
            raw("CIS", "1100", "A"),
            raw("CIS", "1200", "F"), // dropped
            raw("CIS", "1600", "B"),
        ];
        let records = normalize_all(rows, &Catalog::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number, "1100");
        assert_eq!(records[1].number, "1600");
    }
}
