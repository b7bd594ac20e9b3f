//! Requirement-satisfaction engine.
//!
//! Allocates course records to checklist slots under ordering and
//! eligibility constraints.
//!
//! # Algorithm
//!
//! 1. Process requirements strictly in checklist order.
//! 2. For each requirement, repeatedly scan the unclaimed pool in input
//!    order, claiming one eligible record at a time, until the slot's
//!    credit-unit need is met or no eligible record remains.
//! 3. For the tech-elective pool, prefer eligible records that do not also
//!    qualify for SS/H/TBS slots; claim a qualifying one only when nothing
//!    else is left.
//! 4. Classify each slot: Satisfied, PartiallySatisfied, or Unsatisfied.
//!
//! Allocation is greedy and never backtracks: an earlier slot's claim is
//! final even if a later slot starves for it. Checklist order encodes real
//! priority (major slots before general-education and elective slots), so
//! order is the primary tie-break and the tech-elective preference is only
//! a secondary guard for dual-eligible records that survive past the
//! SS/H/TBS slots unclaimed.
//!
//! # Complexity
//! O(n * m) scans worst case, n = requirements, m = courses.

use crate::catalog::AttributePolicy;
use crate::models::{
    ApplyStatus, Checklist, CourseRecord, DecisionList, EligibilityContext, EligibilityRule,
    Requirement, RequirementOutcome,
};

/// The course-to-requirement allocation engine.
///
/// Side-effect-free: claims are tracked in an internal allocation table and
/// returned in the outcomes, never written back onto the inputs, so
/// evaluating the same inputs twice gives identical results with no fresh
/// copies needed.
///
/// # Example
/// ```
/// use degree_audit::engine::AuditEngine;
/// use degree_audit::models::{Checklist, CourseCode, CourseRecord, DecisionList, Requirement};
///
/// let checklist = Checklist::new("40cu CSCI")
///     .with_requirement(Requirement::course("Intro to CS", CourseCode::new("CIS", "1100")));
/// let courses = vec![CourseRecord::new("CIS", "1100").with_grade("A")];
///
/// let outcomes = AuditEngine::new().evaluate(&checklist, &courses, &DecisionList::default());
/// assert_eq!(outcomes.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AuditEngine {
    attributes: AttributePolicy,
    epsilon: f64,
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditEngine {
    /// Creates an engine with the default attribute policy.
    pub fn new() -> Self {
        Self {
            attributes: AttributePolicy::default(),
            epsilon: 1e-9,
        }
    }

    /// Sets the attribute policy (SS/H/TBS set, tech-elective tag).
    pub fn with_attribute_policy(mut self, attributes: AttributePolicy) -> Self {
        self.attributes = attributes;
        self
    }

    /// Evaluates a checklist against the course pool.
    ///
    /// Returns one outcome per requirement, in checklist order. Each
    /// outcome's `courses_applied` preserves claim order. Empty course
    /// pool → all slots Unsatisfied; empty checklist → empty vec.
    pub fn evaluate(
        &self,
        checklist: &Checklist,
        courses: &[CourseRecord],
        decisions: &DecisionList,
    ) -> Vec<RequirementOutcome> {
        let ctx = EligibilityContext {
            tech_elective_attribute: &self.attributes.tech_elective,
            decisions,
        };

        // Allocation table: which requirement (by checklist position) has
        // claimed each course. Set at most once per run.
        let mut claimed_by: Vec<Option<usize>> = vec![None; courses.len()];

        checklist
            .requirements
            .iter()
            .enumerate()
            .map(|(slot, requirement)| {
                self.fill_slot(slot, requirement, courses, &mut claimed_by, &ctx)
            })
            .collect()
    }

    /// Scans the unclaimed pool for one slot until its need is met.
    fn fill_slot(
        &self,
        slot: usize,
        requirement: &Requirement,
        courses: &[CourseRecord],
        claimed_by: &mut [Option<usize>],
        ctx: &EligibilityContext<'_>,
    ) -> RequirementOutcome {
        let mut remaining = requirement.required_cus;
        let mut applied = Vec::new();

        while remaining > self.epsilon {
            let Some(idx) = self.next_eligible(requirement, courses, claimed_by, ctx) else {
                break;
            };
            claimed_by[idx] = Some(slot);
            remaining -= courses[idx].credit_units;
            applied.push(courses[idx].clone());
        }

        let status = if remaining <= self.epsilon {
            ApplyStatus::Satisfied
        } else if applied.is_empty() {
            ApplyStatus::Unsatisfied
        } else {
            ApplyStatus::PartiallySatisfied
        };

        RequirementOutcome {
            requirement: requirement.clone(),
            status,
            courses_applied: applied,
            remaining_cus: remaining,
        }
    }

    /// Index of the next unclaimed eligible record, honoring the
    /// tech-elective preference for non-SS/H/TBS-qualifying records.
    fn next_eligible(
        &self,
        requirement: &Requirement,
        courses: &[CourseRecord],
        claimed_by: &[Option<usize>],
        ctx: &EligibilityContext<'_>,
    ) -> Option<usize> {
        if matches!(requirement.rule, EligibilityRule::TechElective) {
            let preferred = self.scan(requirement, courses, claimed_by, ctx, |record| {
                !self.attributes.qualifies_ss_h_tbs(record)
            });
            if preferred.is_some() {
                return preferred;
            }
        }
        self.scan(requirement, courses, claimed_by, ctx, |_| true)
    }

    /// First unclaimed record in input order matching the rule and `accept`.
    fn scan(
        &self,
        requirement: &Requirement,
        courses: &[CourseRecord],
        claimed_by: &[Option<usize>],
        ctx: &EligibilityContext<'_>,
        accept: impl Fn(&CourseRecord) -> bool,
    ) -> Option<usize> {
        courses.iter().enumerate().position(|(idx, record)| {
            claimed_by[idx].is_none() && requirement.rule.matches(record, ctx) && accept(record)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseCode, DecisionEntry, DecisionStatus};

    fn engine() -> AuditEngine {
        AuditEngine::new()
    }

    fn no_decisions() -> DecisionList {
        DecisionList::default()
    }

    fn ss_course(subject: &str, number: &str) -> CourseRecord {
        CourseRecord::new(subject, number).with_grade("A").with_attribute("EUSS")
    }

    fn te_course(subject: &str, number: &str) -> CourseRecord {
        CourseRecord::new(subject, number).with_grade("A").with_attribute("EUTE")
    }

    #[test]
    fn test_exact_course_satisfied() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::course("Intro to CS", CourseCode::new("CIS", "1100")));
        let courses = vec![CourseRecord::new("CIS", "1100").with_grade("A")];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
        assert_eq!(outcomes[0].courses_applied.len(), 1);
        assert!(outcomes[0].remaining_cus <= 0.0);
    }

    #[test]
    fn test_exact_course_via_cross_listing() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::course("Discrete Math", CourseCode::new("CIS", "1600")));
        let courses = vec![CourseRecord::new("CIS", "160")
            .with_grade("B")
            .with_cross_listing(CourseCode::new("CIS", "1600"))];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
    }

    #[test]
    fn test_exclusive_consumption() {
        // One EUSS course, two EUSS slots: only the first slot gets it.
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::attribute("SS/H/TBS #1", "EUSS"))
            .with_requirement(Requirement::attribute("SS/H/TBS #2", "EUSS"));
        let courses = vec![ss_course("PSYC", "0001")];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
        assert_eq!(outcomes[1].status, ApplyStatus::Unsatisfied);
        assert!(outcomes[1].courses_applied.is_empty());
    }

    #[test]
    fn test_checklist_order_precedence() {
        // Dual-eligible course (EUSS + tech-elective "yes" ruling): the
        // earlier SS/H/TBS slot wins; the pool does not re-list it.
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::attribute("SS/H/TBS #1", "EUSS"))
            .with_requirement(Requirement::tech_elective("Tech electives", 1.0));
        let dual = ss_course("STSC", "1880").with_attribute("EUTE");
        let decisions = DecisionList::default().with_entry(DecisionEntry::new(
            CourseCode::new("STSC", "1880"),
            DecisionStatus::Yes,
            "Technology and Society",
        ));

        let outcomes = engine().evaluate(&checklist, &[dual], &decisions);
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
        assert_eq!(outcomes[0].courses_applied[0].code().to_string(), "STSC 1880");
        assert_eq!(outcomes[1].status, ApplyStatus::Unsatisfied);
        assert!(outcomes[1].courses_applied.is_empty());
    }

    #[test]
    fn test_tech_elective_prefers_non_ss_qualifying() {
        // Dual-eligible record listed first, plain tech elective second.
        // The pool needs 1.0 CU and must take the plain one.
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::tech_elective("Tech electives", 1.0));
        let dual = te_course("STSC", "1880").with_attribute("EUSS");
        let plain = te_course("ESE", "2240");

        let outcomes = engine().evaluate(&checklist, &[dual, plain], &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
        assert_eq!(outcomes[0].courses_applied[0].code().to_string(), "ESE 2240");
    }

    #[test]
    fn test_tech_elective_falls_back_to_qualifying() {
        // Only a dual-eligible record remains: the pool claims it.
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::tech_elective("Tech electives", 1.0));
        let dual = te_course("STSC", "1880").with_attribute("EUSS");

        let outcomes = engine().evaluate(&checklist, &[dual], &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
        assert_eq!(outcomes[0].courses_applied[0].code().to_string(), "STSC 1880");
    }

    #[test]
    fn test_tech_elective_by_decision_only() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::tech_elective("Tech electives", 1.0));
        let courses = vec![CourseRecord::new("FNCE", "1010").with_grade("A")];
        let decisions = DecisionList::default().with_entry(DecisionEntry::new(
            CourseCode::new("FNCE", "1010"),
            DecisionStatus::Yes,
            "Corporate Finance",
        ));

        let outcomes = engine().evaluate(&checklist, &courses, &decisions);
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
    }

    #[test]
    fn test_partial_fulfillment() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::tech_elective("Tech electives", 2.0));
        let courses = vec![te_course("ESE", "2240")];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::PartiallySatisfied);
        assert!((outcomes[0].remaining_cus - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overshoot_bounded_by_last_claim() {
        // 1.0-CU slot filled by a 1.5-CU course: satisfied, overshoot is
        // exactly the last record's units.
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::attribute("Lab science", "EUNS"));
        let courses = vec![CourseRecord::new("PHYS", "0150")
            .with_grade("B")
            .with_credit_units(1.5)
            .with_attribute("EUNS")];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
        assert!((outcomes[0].remaining_cus + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pool_fills_in_claim_order() {
        // Preference phase claims plain electives in input order, then the
        // dual-eligible one; courses_applied records that claim order.
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::tech_elective("Tech electives", 3.0));
        let dual = te_course("STSC", "1880").with_attribute("EUSS");
        let plain_a = te_course("ESE", "2240");
        let plain_b = te_course("CIS", "3800");

        let outcomes = engine().evaluate(&checklist, &[dual, plain_a, plain_b], &no_decisions());
        let applied: Vec<String> = outcomes[0]
            .courses_applied
            .iter()
            .map(|r| r.code().to_string())
            .collect();
        assert_eq!(applied, ["ESE 2240", "CIS 3800", "STSC 1880"]);
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
    }

    #[test]
    fn test_any_of_slot() {
        let checklist = Checklist::new("40cu CSCI").with_requirement(Requirement::any_of(
            "Computer Architecture",
            vec![CourseCode::new("CIS", "4710"), CourseCode::new("CIS", "5710")],
        ));
        let courses = vec![CourseRecord::new("CIS", "5710").with_grade("A-")];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(outcomes[0].status, ApplyStatus::Satisfied);
    }

    #[test]
    fn test_empty_course_pool() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::course("Intro to CS", CourseCode::new("CIS", "1100")))
            .with_requirement(Requirement::tech_elective("Tech electives", 4.0));

        let outcomes = engine().evaluate(&checklist, &[], &no_decisions());
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.status == ApplyStatus::Unsatisfied));
    }

    #[test]
    fn test_empty_checklist() {
        let outcomes = engine().evaluate(
            &Checklist::new("empty"),
            &[ss_course("PSYC", "0001")],
            &no_decisions(),
        );
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::attribute("SS/H/TBS #1", "EUSS"))
            .with_requirement(Requirement::tech_elective("Tech electives", 2.0));
        let courses = vec![
            ss_course("PSYC", "0001"),
            te_course("ESE", "2240"),
            te_course("STSC", "1880").with_attribute("EUSS"),
        ];

        let first = engine().evaluate(&checklist, &courses, &no_decisions());
        let second = engine().evaluate(&checklist, &courses, &no_decisions());
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_record_double_counted() {
        let checklist = Checklist::new("40cu CSCI")
            .with_requirement(Requirement::attribute("SS/H/TBS #1", "EUSS"))
            .with_requirement(Requirement::attribute("SS/H/TBS #2", "EUSS"))
            .with_requirement(Requirement::tech_elective("Tech electives", 2.0));
        let courses = vec![
            ss_course("PSYC", "0001").with_attribute("EUTE"),
            ss_course("HIST", "0100"),
            te_course("ESE", "2240"),
        ];

        let outcomes = engine().evaluate(&checklist, &courses, &no_decisions());
        let mut seen = std::collections::BTreeSet::new();
        for outcome in &outcomes {
            for record in &outcome.courses_applied {
                assert!(seen.insert(record.code().to_string()), "double-counted record");
            }
        }
    }
}
