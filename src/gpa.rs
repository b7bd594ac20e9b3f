//! Category-scoped GPA calculation.
//!
//! Computes three weighted averages over the same record set:
//!
//! | Figure | Scope |
//! |--------|-------|
//! | Math/Nat-Sci | Records whose subject is in the math/nat-sci table |
//! | STEM | Records whose subject is in the STEM table (superset) |
//! | Overall | Every graded record |
//!
//! Each figure is Σ(credit units × quality points) / Σ(credit units) over
//! the included records. Independent of requirement allocation — a record
//! contributes whether or not any slot claimed it.
//!
//! # Inclusion rules
//! Records graded TR, I, GR, NR, or P are excluded from every figure
//! regardless of grading kind, as are records whose grade is not on the
//! scale (in-progress records carry an empty grade). A pass/fail F is
//! included, at 0.0 points over its credit units.

use serde::{Deserialize, Serialize};

use crate::catalog::{GradeScale, SubjectCategories};
use crate::models::CourseRecord;

/// Credit-weighted quality-point accumulator for one category.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    points: f64,
    credits: f64,
}

impl Tally {
    fn add(&mut self, credit_units: f64, quality_points: f64) {
        self.points += credit_units * quality_points;
        self.credits += credit_units;
    }

    /// `None` when no credits accumulated — the undefined sentinel, never
    /// a division by zero.
    fn gpa(&self) -> Option<f64> {
        (self.credits > 0.0).then(|| self.points / self.credits)
    }
}

/// The three GPA figures. `None` marks an undefined figure (category had
/// no graded records).
///
/// Values carry full precision; callers compare with tolerance (≈0.01).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GpaSummary {
    /// Math and natural-science GPA.
    pub math_nat_sci: Option<f64>,
    /// STEM GPA.
    pub stem: Option<f64>,
    /// Overall GPA.
    pub overall: Option<f64>,
}

impl GpaSummary {
    /// Computes the three figures from a record set.
    pub fn calculate(
        courses: &[CourseRecord],
        grades: &GradeScale,
        subjects: &SubjectCategories,
    ) -> Self {
        let mut math_nat_sci = Tally::default();
        let mut stem = Tally::default();
        let mut overall = Tally::default();

        for record in courses {
            if grades.is_excluded(&record.grade) {
                continue;
            }
            let Some(points) = grades.quality_points(&record.grade) else {
                continue;
            };

            overall.add(record.credit_units, points);
            if subjects.is_stem(&record.subject) {
                stem.add(record.credit_units, points);
            }
            if subjects.is_math_nat_sci(&record.subject) {
                math_nat_sci.add(record.credit_units, points);
            }
        }

        Self {
            math_nat_sci: math_nat_sci.gpa(),
            stem: stem.gpa(),
            overall: overall.gpa(),
        }
    }
}
