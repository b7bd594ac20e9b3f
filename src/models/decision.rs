//! Tech-elective decision list.
//!
//! Some courses carry attribute data too thin to tell whether they qualify
//! for the tech-elective pool. The decision list records manual rulings,
//! keyed by canonical course code. It is consulted only as an additional
//! eligibility source — absence means plain ineligibility, never an error.

use serde::{Deserialize, Serialize};

use super::{CourseCode, CourseRecord};

/// Ruling on a course's tech-elective eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Counts toward the tech-elective pool.
    Yes,
    /// Ruled out.
    No,
    /// Undecided; treated as not approving.
    Maybe,
}

/// One manual ruling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    /// Canonical 4-digit course code.
    pub code: CourseCode,
    /// The ruling.
    pub status: DecisionStatus,
    /// Course title, for human review of the list.
    pub title: String,
}

impl DecisionEntry {
    /// Creates an entry.
    pub fn new(code: CourseCode, status: DecisionStatus, title: impl Into<String>) -> Self {
        Self {
            code,
            status,
            title: title.into(),
        }
    }
}

/// The full decision list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionList {
    /// Rulings, unordered.
    pub entries: Vec<DecisionEntry>,
}

impl DecisionList {
    /// Builder: appends an entry.
    pub fn with_entry(mut self, entry: DecisionEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Looks up the ruling for a canonical code.
    pub fn status_for(&self, code: &CourseCode) -> Option<DecisionStatus> {
        self.entries
            .iter()
            .find(|entry| &entry.code == code)
            .map(|entry| entry.status)
    }

    /// Whether the list approves `record` for the tech-elective pool.
    ///
    /// The list is keyed by canonical 4-digit codes, so a legacy record is
    /// matched under both its own code and its cross-listed alternate.
    pub fn approves(&self, record: &CourseRecord) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.status == DecisionStatus::Yes && record.matches_code(&entry.code))
    }
}
