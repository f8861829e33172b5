use crate::types::{DecisionKey, ScheduleInput};
use std::collections::{BTreeSet, HashSet};

/// The eligible decision-key set `X` (SPEC_FULL.md §4.1): every
/// `(teacher, student, subject, timeslot)` combination that could possibly
/// become a decision variable. Built once, before any variable exists, so
/// the model never wastes a variable on an infeasible key.
#[derive(Debug, Default)]
pub struct Eligibility {
    pub keys: BTreeSet<DecisionKey>,
}

impl Eligibility {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Intersect teacher qualification, teacher/student availability, student
/// demand, campaign membership, and recurring-class occupancy.
///
/// A key `(t, s, subj, ts)` survives iff all five filters in §4.1 pass. This
/// is the only pruning step before variable creation.
pub fn build_eligibility(input: &ScheduleInput) -> Eligibility {
    let blocked: HashSet<(crate::types::TeacherId, crate::types::TimeSlotId)> = input
        .regular_classes
        .iter()
        .map(|rc| (rc.teacher_id.clone(), rc.timeslot_id.clone()))
        .collect();

    let target_timeslots: HashSet<crate::types::TimeSlotId> = input
        .target_timeslots()
        .into_iter()
        .map(|ts| ts.id.clone())
        .collect();

    let mut keys = BTreeSet::new();

    for teacher in &input.teachers {
        for ts_id in &teacher.available_timeslots {
            if !target_timeslots.contains(ts_id) {
                continue;
            }
            if blocked.contains(&(teacher.id.clone(), ts_id.clone())) {
                continue;
            }
            for subject_id in &teacher.teachable_subjects {
                for student in &input.students {
                    if !student.requires(subject_id) {
                        continue;
                    }
                    if !student.is_available(ts_id) {
                        continue;
                    }
                    keys.insert(DecisionKey {
                        teacher_id: teacher.id.clone(),
                        student_id: student.id.clone(),
                        subject_id: subject_id.clone(),
                        timeslot_id: ts_id.clone(),
                    });
                }
            }
        }
    }

    log::info!("eligibility: {} decision keys from {} teachers, {} students", keys.len(), input.teachers.len(), input.students.len());

    Eligibility { keys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use chrono::NaiveDate;

    fn ts(id: &str, day: u32) -> TimeSlot {
        TimeSlot {
            id: TimeSlotId(id.to_string()),
            date: NaiveDate::from_ymd_opt(2026, 7, day).unwrap(),
            period_index: 1,
            campaign_id: CampaignId("camp".to_string()),
            period_label: None,
        }
    }

    fn input_with(teachers: Vec<Teacher>, students: Vec<Student>, regular_classes: Vec<RegularClass>) -> ScheduleInput {
        ScheduleInput {
            subjects: vec![Subject {
                id: SubjectId("M".to_string()),
                name: "Math".to_string(),
                category: None,
            }],
            teachers,
            students,
            timeslots: vec![ts("TS1", 1), ts("TS2", 1)],
            campaigns: vec![Campaign {
                id: CampaignId("camp".to_string()),
                name: "Summer".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                description: String::new(),
            }],
            regular_classes,
            weights: ConstraintWeights::default(),
            campaign_id: CampaignId("camp".to_string()),
        }
    }

    #[test]
    fn matches_trivial_pair() {
        let teacher = Teacher {
            id: TeacherId("T1".to_string()),
            name: "T1".to_string(),
            min_classes: 1,
            desired_shift_count: 0,
            teachable_subjects: vec![SubjectId("M".to_string())],
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        };
        let mut requirements = std::collections::HashMap::new();
        requirements.insert(SubjectId("M".to_string()), 1);
        let student = Student {
            id: StudentId("S1".to_string()),
            name: "S1".to_string(),
            grade: "G1".to_string(),
            gap_preference: GapPreference::GapAllowed,
            requirements,
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        };

        let input = input_with(vec![teacher], vec![student], vec![]);
        let elig = build_eligibility(&input);

        assert_eq!(elig.len(), 1);
        let key = elig.keys.iter().next().unwrap();
        assert_eq!(key.teacher_id, TeacherId("T1".to_string()));
        assert_eq!(key.timeslot_id, TimeSlotId("TS1".to_string()));
    }

    #[test]
    fn recurring_class_blocks_key() {
        let teacher = Teacher {
            id: TeacherId("T1".to_string()),
            name: "T1".to_string(),
            min_classes: 1,
            desired_shift_count: 0,
            teachable_subjects: vec![SubjectId("M".to_string())],
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        };
        let mut requirements = std::collections::HashMap::new();
        requirements.insert(SubjectId("M".to_string()), 1);
        let student = Student {
            id: StudentId("S1".to_string()),
            name: "S1".to_string(),
            grade: "G1".to_string(),
            gap_preference: GapPreference::GapAllowed,
            requirements,
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        };
        let rc = RegularClass {
            id: RegularClassId("RC1".to_string()),
            teacher_id: TeacherId("T1".to_string()),
            subject_id: SubjectId("M".to_string()),
            timeslot_id: TimeSlotId("TS1".to_string()),
            enrolled_student_ids: vec![],
        };

        let input = input_with(vec![teacher], vec![student], vec![rc]);
        let elig = build_eligibility(&input);

        assert!(elig.is_empty());
    }
}
