//! Degree-audit evaluation core.
//!
//! Evaluates whether a student's coursework satisfies a degree program's
//! checklist, and computes category-scoped grade-point averages. The
//! checklist content, the free-text audit-export parser, and any UI are
//! external collaborators — this crate consumes their contracts and
//! returns a structured [`models::AuditReport`].
//!
//! # Modules
//!
//! - **`models`**: Domain types — `CourseRecord`, `Requirement`,
//!   `Checklist`, `DecisionList`, `RequirementOutcome`, `AuditReport`
//! - **`catalog`**: Classification tables as data (grade scale, subject
//!   categories, attribute policy, equivalences)
//! - **`intake`**: Raw-row normalization and business-rule filtering
//! - **`engine`**: Greedy order-sensitive course-to-requirement allocation
//! - **`gpa`**: Credit-weighted GPA figures with exclusion rules
//! - **`validation`**: Non-fatal input integrity checks
//!
//! # Evaluation model
//!
//! A run is a single bounded pass: requirements in checklist order, each
//! scanning the unclaimed course pool. Allocation is greedy with no
//! backtracking — checklist order encodes priority, so an earlier slot may
//! deliberately starve a later one. Everything is synchronous, pure, and
//! deterministic; no inputs are mutated.

pub mod catalog;
pub mod engine;
pub mod gpa;
pub mod intake;
pub mod models;
pub mod validation;

use catalog::Catalog;
use engine::AuditEngine;
use gpa::GpaSummary;
use models::{AuditReport, Checklist, CourseRecord, DecisionList};

/// Runs a complete audit: integrity checks, requirement allocation, and
/// GPA calculation over the same record set.
///
/// # Example
/// ```
/// use degree_audit::{audit, catalog::Catalog};
/// use degree_audit::models::{Checklist, CourseCode, CourseRecord, DecisionList, Requirement};
///
/// let checklist = Checklist::new("40cu CSCI")
///     .with_requirement(Requirement::course("Intro to CS", CourseCode::new("CIS", "1100")));
/// let courses = vec![CourseRecord::new("CIS", "1100").with_grade("A")];
///
/// let report = audit(&checklist, &courses, &DecisionList::default(), &Catalog::default());
/// assert!(report.all_satisfied());
/// ```
pub fn audit(
    checklist: &Checklist,
    courses: &[CourseRecord],
    decisions: &DecisionList,
    catalog: &Catalog,
) -> AuditReport {
    let warnings = validation::check_integrity(courses, catalog);
    let outcomes = AuditEngine::new()
        .with_attribute_policy(catalog.attributes.clone())
        .evaluate(checklist, courses, decisions);
    let gpa = GpaSummary::calculate(courses, &catalog.grades, &catalog.subjects);

    AuditReport {
        outcomes,
        gpa,
        warnings,
    }
}
