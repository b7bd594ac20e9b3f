//! Degree requirement model.
//!
//! A requirement is one slot in a degree program's checklist: a credit-unit
//! target plus an eligibility rule deciding which course records may fill it.
//! The variant set is closed — the academic catalog defines exactly these
//! four shapes, so a tagged enum replaces open-ended subclassing.

use serde::{Deserialize, Serialize};

use super::{CourseCode, CourseRecord, DecisionList};

/// Eligibility rule for a requirement slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityRule {
    /// Exactly one course, matched by subject + number or the record's
    /// cross-listed alternate.
    Course { code: CourseCode },

    /// Any course from a fixed list (choice-of-N slots, e.g. "one of
    /// CIS 4710 / CIS 5710").
    AnyOf { codes: Vec<CourseCode> },

    /// Any course carrying the given catalog attribute tag.
    Attribute { attribute: String },

    /// The tech-elective pool: courses carrying the catalog's tech-elective
    /// attribute, or approved by a decision-list "yes" entry.
    TechElective,
}

/// Lookup context for eligibility checks that reach beyond the record itself.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityContext<'a> {
    /// Attribute tag marking catalog-approved tech electives.
    pub tech_elective_attribute: &'a str,
    /// Manual tech-elective decisions.
    pub decisions: &'a DecisionList,
}

impl EligibilityRule {
    /// Whether `record` may fill a slot governed by this rule.
    pub fn matches(&self, record: &CourseRecord, ctx: &EligibilityContext<'_>) -> bool {
        match self {
            Self::Course { code } => record.matches_code(code),
            Self::AnyOf { codes } => codes.iter().any(|code| record.matches_code(code)),
            Self::Attribute { attribute } => record.has_attribute(attribute),
            Self::TechElective => {
                record.has_attribute(ctx.tech_elective_attribute)
                    || ctx.decisions.approves(record)
            }
        }
    }
}

/// One slot in a degree checklist.
///
/// `label` is the stable identity used in outcomes (e.g. "SS/H/TBS #3");
/// `required_cus` is the credit-unit target, 1.0 for a single-course slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Stable output label.
    pub label: String,
    /// Credit units needed to satisfy the slot.
    pub required_cus: f64,
    /// Which records may fill the slot.
    pub rule: EligibilityRule,
}

impl Requirement {
    /// Creates a 1.0-CU exact-course slot.
    pub fn course(label: impl Into<String>, code: CourseCode) -> Self {
        Self {
            label: label.into(),
            required_cus: 1.0,
            rule: EligibilityRule::Course { code },
        }
    }

    /// Creates a 1.0-CU choice-of-N slot.
    pub fn any_of(label: impl Into<String>, codes: Vec<CourseCode>) -> Self {
        Self {
            label: label.into(),
            required_cus: 1.0,
            rule: EligibilityRule::AnyOf { codes },
        }
    }

    /// Creates a 1.0-CU attribute-matched slot.
    pub fn attribute(label: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required_cus: 1.0,
            rule: EligibilityRule::Attribute {
                attribute: attribute.into(),
            },
        }
    }

    /// Creates the tech-elective pool with the given credit-unit target.
    pub fn tech_elective(label: impl Into<String>, required_cus: f64) -> Self {
        Self {
            label: label.into(),
            required_cus,
            rule: EligibilityRule::TechElective,
        }
    }

    /// Overrides the credit-unit target.
    pub fn with_required_cus(mut self, cus: f64) -> Self {
        self.required_cus = cus;
        self
    }
}

/// An ordered degree checklist.
///
/// Order is a design parameter: specific/major slots come first, elective
/// pools later, and the engine breaks allocation ties by this order. The
/// concrete per-program content is external configuration, loaded from
/// serialized form rather than engineered here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checklist {
    /// Degree program identifier, e.g. "40cu CSCI".
    pub program: String,
    /// Requirement slots in evaluation order.
    pub requirements: Vec<Requirement>,
}

impl Checklist {
    /// Creates an empty checklist for a program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            requirements: Vec::new(),
        }
    }

    /// Appends a requirement slot.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the checklist has no slots.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
