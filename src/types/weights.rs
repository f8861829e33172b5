use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weights for each soft-constraint term in the objective (SPEC_FULL.md §4.3).
///
/// All weights default to 0 (term not posted) except `regular_class_continuity_bonus`,
/// which may legitimately be negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintWeights {
    #[serde(default)]
    pub max_two_students_bonus: f64,
    #[serde(default)]
    pub single_student_penalty: f64,
    #[serde(default)]
    pub same_grade_bonus: f64,
    #[serde(default)]
    pub regular_class_continuity_bonus: f64,
    #[serde(default)]
    pub teacher_gap_penalty: f64,
    #[serde(default)]
    pub student_gap_penalty: f64,
    #[serde(default)]
    pub shortage_penalty: f64,
}

impl Default for ConstraintWeights {
    fn default() -> Self {
        Self {
            max_two_students_bonus: 0.0,
            single_student_penalty: 0.0,
            same_grade_bonus: 0.0,
            regular_class_continuity_bonus: 0.0,
            teacher_gap_penalty: 0.0,
            student_gap_penalty: 0.0,
            shortage_penalty: 0.0,
        }
    }
}

impl ConstraintWeights {
    /// Build weights from a loosely-keyed map, ignoring unknown keys and
    /// defaulting missing ones to 0. Returns the names of any ignored keys
    /// so the caller can log a warning.
    ///
    /// Recognized keys are the camelCase names from SPEC_FULL.md §6's
    /// `constraint_weights` contract (matching `original_source/solver_cp_sat.py`'s
    /// `constraint_weights.get("maxTwoStudentsBonus")` and siblings), not the
    /// Rust field names.
    pub fn from_map(map: &HashMap<String, f64>) -> (Self, Vec<String>) {
        let mut weights = Self::default();
        let mut unknown = Vec::new();

        for (key, value) in map {
            match key.as_str() {
                "maxTwoStudentsBonus" => weights.max_two_students_bonus = *value,
                "singleStudentPenalty" => weights.single_student_penalty = *value,
                "sameGradeBonus" => weights.same_grade_bonus = *value,
                "regularClassContinuityBonus" => weights.regular_class_continuity_bonus = *value,
                "teacherGapPenalty" => weights.teacher_gap_penalty = *value,
                "studentGapPenalty" => weights.student_gap_penalty = *value,
                "shortagePenalty" => weights.shortage_penalty = *value,
                other => unknown.push(other.to_string()),
            }
        }

        (weights, unknown)
    }
}
