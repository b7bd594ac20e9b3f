//! Degree-audit domain models.
//!
//! Core data types for one audit run: what the student took
//! ([`CourseRecord`]), what the program demands ([`Checklist`],
//! [`Requirement`]), manual tech-elective rulings ([`DecisionList`]), and
//! what the engine concludes ([`RequirementOutcome`], [`AuditReport`]).
//!
//! All types are serde round-trippable: checklists and decision lists are
//! external configuration data, and reports are handed to arbitrary
//! presentation layers.

mod course;
mod decision;
mod outcome;
mod requirement;

pub use course::{parse_attribute_blob, CourseCode, CourseRecord, GradingKind};
pub use decision::{DecisionEntry, DecisionList, DecisionStatus};
pub use outcome::{ApplyStatus, AuditReport, RequirementOutcome};
pub use requirement::{Checklist, EligibilityContext, EligibilityRule, Requirement};
