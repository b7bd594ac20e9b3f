//! Catalog classification tables.
//!
//! Everything here is configuration data, not engineered logic: the grade
//! scale, subject categories, attribute meanings, the pass/fail policy
//! exception terms, and known course equivalences. Catalog changes (new
//! subjects, new attributes, new policy terms) touch these tables only —
//! never the engine or the GPA calculator.
//!
//! [`Catalog::default`] carries the standard tables; deployments may load a
//! modified catalog from serialized form instead.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{CourseCode, CourseRecord};

/// Letter-grade quality points plus the codes excluded from GPA entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    /// Letter grade → quality points on the 4.0 scale.
    pub points: BTreeMap<String, f64>,
    /// Grade codes that contribute to no GPA regardless of grading kind.
    pub excluded: BTreeSet<String>,
}

impl GradeScale {
    /// Quality points for a grade, `None` when the grade is not on the
    /// scale (special codes, empty in-progress grades).
    pub fn quality_points(&self, grade: &str) -> Option<f64> {
        self.points.get(grade).copied()
    }

    /// Whether the grade is one of the GPA-excluded codes (TR, I, GR, NR, P).
    pub fn is_excluded(&self, grade: &str) -> bool {
        self.excluded.contains(grade)
    }

    /// Whether the grade is meaningful to this scale at all.
    pub fn is_known(&self, grade: &str) -> bool {
        self.points.contains_key(grade) || self.excluded.contains(grade)
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        let points = [
            ("A+", 4.0),
            ("A", 4.0),
            ("A-", 3.7),
            ("B+", 3.3),
            ("B", 3.0),
            ("B-", 2.7),
            ("C+", 2.3),
            ("C", 2.0),
            ("C-", 1.7),
            ("D+", 1.3),
            ("D", 1.0),
            ("D-", 0.7),
            ("F", 0.0),
        ]
        .into_iter()
        .map(|(g, p)| (g.to_string(), p))
        .collect();

        let excluded = ["TR", "I", "GR", "NR", "P"]
            .into_iter()
            .map(String::from)
            .collect();

        Self { points, excluded }
    }
}

/// Subject-based GPA category membership.
///
/// STEM is a superset of Math/Natural-Science: a subject is STEM if it is
/// in either set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectCategories {
    /// Math and natural-science subjects.
    pub math_nat_sci: BTreeSet<String>,
    /// Additional STEM subjects beyond math/nat-sci.
    pub stem_additional: BTreeSet<String>,
}

impl SubjectCategories {
    /// Whether the subject counts toward the Math/Nat-Sci GPA.
    pub fn is_math_nat_sci(&self, subject: &str) -> bool {
        self.math_nat_sci.contains(subject)
    }

    /// Whether the subject counts toward the STEM GPA.
    pub fn is_stem(&self, subject: &str) -> bool {
        self.math_nat_sci.contains(subject) || self.stem_additional.contains(subject)
    }
}

impl Default for SubjectCategories {
    fn default() -> Self {
        let math_nat_sci = ["ASTR", "BIOL", "CHEM", "MATH", "PHYS", "STAT"]
            .into_iter()
            .map(String::from)
            .collect();
        let stem_additional = ["BE", "CBE", "CIS", "EAS", "ESE", "MEAM", "MSE", "NETS"]
            .into_iter()
            .map(String::from)
            .collect();
        Self {
            math_nat_sci,
            stem_additional,
        }
    }
}

/// Attribute-tag meanings relevant to allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePolicy {
    /// Tags qualifying a course for Social-Science / Humanities /
    /// Tech-in-Society slots.
    pub ss_h_tbs: BTreeSet<String>,
    /// Tag marking catalog-approved tech electives.
    pub tech_elective: String,
}

impl AttributePolicy {
    /// Whether the record qualifies for any SS/H/TBS slot.
    pub fn qualifies_ss_h_tbs(&self, record: &CourseRecord) -> bool {
        record.attributes.iter().any(|a| self.ss_h_tbs.contains(a))
    }
}

impl Default for AttributePolicy {
    fn default() -> Self {
        Self {
            ss_h_tbs: ["EUSS", "EUHS", "EUTB"].into_iter().map(String::from).collect(),
            tech_elective: "EUTE".to_string(),
        }
    }
}

/// A known cross-subject equivalence the audit export fails to tag.
///
/// The named course carries `implied_attribute` even though the source
/// data omits it, and must never appear completed alongside
/// `exclusive_with` in the same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEquivalence {
    /// The under-tagged course.
    pub code: CourseCode,
    /// Attribute the course is known to carry.
    pub implied_attribute: String,
    /// The course it is mutually exclusive with.
    pub exclusive_with: CourseCode,
}

/// The full catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Grade scale and GPA exclusion codes.
    pub grades: GradeScale,
    /// Subject → GPA category tables.
    pub subjects: SubjectCategories,
    /// Attribute-tag meanings.
    pub attributes: AttributePolicy,
    /// Terms whose pass/fail election is reclassified as for-credit
    /// (pandemic-era grading option). Term codes: year * 100 + semester
    /// (10 = spring, 20 = summer, 30 = fall).
    pub pass_fail_exception_terms: BTreeSet<u32>,
    /// Known equivalences with missing attribute data.
    pub equivalences: Vec<CourseEquivalence>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            grades: GradeScale::default(),
            subjects: SubjectCategories::default(),
            attributes: AttributePolicy::default(),
            pass_fail_exception_terms: [202010, 202030, 202110].into_iter().collect(),
            equivalences: vec![CourseEquivalence {
                code: CourseCode::new("EAS", "0091"),
                implied_attribute: "EUNS".to_string(),
                exclusive_with: CourseCode::new("CHEM", "1012"),
            }],
        }
    }
}

impl Catalog {
    /// The equivalence entry matching `record`, if any.
    pub fn equivalence_for(&self, record: &CourseRecord) -> Option<&CourseEquivalence> {
        self.equivalences
            .iter()
            .find(|eq| record.matches_code(&eq.code))
    }
}
