//! Evaluation outcome model.
//!
//! Outcomes are the solution side of an audit run: one entry per checklist
//! slot, in checklist order, recording how far the slot was filled and by
//! which records.

use serde::{Deserialize, Serialize};

use super::{CourseRecord, Requirement};
use crate::gpa::GpaSummary;
use crate::validation::IntegrityWarning;

/// How far a requirement slot was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyStatus {
    /// Credit-unit target fully met.
    Satisfied,
    /// Some credit applied, target not reached.
    PartiallySatisfied,
    /// No eligible record claimed.
    Unsatisfied,
}

/// Outcome for one checklist slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementOutcome {
    /// The slot this outcome answers, as defined in the checklist.
    pub requirement: Requirement,
    /// Fill classification.
    pub status: ApplyStatus,
    /// Records credited to the slot, in claim order (scan order, not input
    /// order).
    pub courses_applied: Vec<CourseRecord>,
    /// Credit units still needed after the scan. Zero or negative when
    /// satisfied; a final claim may overshoot by at most its own units.
    pub remaining_cus: f64,
}

impl RequirementOutcome {
    /// Total credit units claimed for the slot.
    pub fn applied_cus(&self) -> f64 {
        self.courses_applied.iter().map(|r| r.credit_units).sum()
    }
}

/// The complete result of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Per-slot outcomes, matching checklist order.
    pub outcomes: Vec<RequirementOutcome>,
    /// Category-scoped GPA figures.
    pub gpa: GpaSummary,
    /// Non-fatal data-integrity findings.
    pub warnings: Vec<IntegrityWarning>,
}

impl AuditReport {
    /// Whether every checklist slot is satisfied.
    pub fn all_satisfied(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.status == ApplyStatus::Satisfied)
    }

    /// Outcome for the slot with the given label, if present.
    pub fn outcome_for(&self, label: &str) -> Option<&RequirementOutcome> {
        self.outcomes.iter().find(|o| o.requirement.label == label)
    }
}
