use chrono::NaiveDate;
use proptest::prelude::*;
use shift_scheduler::scheduler::generate_schedule;
use shift_scheduler::types::*;
use shift_scheduler::validator::{check_demand_accounting, check_student_overlap, check_teacher_capacity, check_eligibility_closure};
use std::collections::HashMap;

/// Build a small roster from proptest-generated availability bitmasks.
/// `teacher_avail[t]` and `student_avail[s]` are bitmasks over `n_timeslots`
/// timeslots (bit i set => available at timeslot i); `student_req[s]` is
/// this student's demand for the one subject in the roster.
fn build_input(
    n_teachers: usize,
    n_students: usize,
    n_timeslots: usize,
    teacher_avail: &[u8],
    student_avail: &[u8],
    student_req: &[u32],
) -> ScheduleInput {
    let campaign_id = CampaignId("camp".to_string());
    let subject_id = SubjectId("M".to_string());

    let timeslots: Vec<TimeSlot> = (0..n_timeslots)
        .map(|i| TimeSlot {
            id: TimeSlotId(format!("ts{i}")),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            period_index: i as u32 + 1,
            campaign_id: campaign_id.clone(),
            period_label: None,
        })
        .collect();

    let teachers: Vec<Teacher> = (0..n_teachers)
        .map(|t| {
            let mask = teacher_avail[t];
            let available: Vec<TimeSlotId> =
                (0..n_timeslots).filter(|i| mask & (1 << i) != 0).map(|i| TimeSlotId(format!("ts{i}"))).collect();
            Teacher {
                id: TeacherId(format!("t{t}")),
                name: format!("T{t}"),
                min_classes: 0,
                desired_shift_count: 0,
                teachable_subjects: vec![subject_id.clone()],
                available_timeslots: available,
            }
        })
        .collect();

    let students: Vec<Student> = (0..n_students)
        .map(|s| {
            let mask = student_avail[s];
            let available: Vec<TimeSlotId> =
                (0..n_timeslots).filter(|i| mask & (1 << i) != 0).map(|i| TimeSlotId(format!("ts{i}"))).collect();
            let mut requirements = HashMap::new();
            requirements.insert(subject_id.clone(), student_req[s]);
            Student {
                id: StudentId(format!("s{s}")),
                name: format!("S{s}"),
                grade: "G1".to_string(),
                gap_preference: GapPreference::GapAllowed,
                requirements,
                available_timeslots: available,
            }
        })
        .collect();

    ScheduleInput {
        subjects: vec![Subject { id: subject_id, name: "Math".to_string(), category: None }],
        teachers,
        students,
        timeslots,
        campaigns: vec![Campaign {
            id: campaign_id.clone(),
            name: "Campaign".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            description: String::new(),
        }],
        regular_classes: vec![],
        weights: ConstraintWeights::default(),
        campaign_id,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Properties 1-4 of SPEC_FULL.md §8 hold on every solved output of a
    /// small randomly-generated roster, regardless of availability pattern.
    #[test]
    fn invariants_hold_on_random_small_rosters(
        n_teachers in 1usize..=3,
        n_students in 1usize..=4,
        n_timeslots in 1usize..=4,
        teacher_avail in prop::collection::vec(0u8..16, 3),
        student_avail in prop::collection::vec(0u8..16, 4),
        student_req in prop::collection::vec(0u32..=2, 4),
    ) {
        let input = build_input(
            n_teachers,
            n_students,
            n_timeslots,
            &teacher_avail[..n_teachers],
            &student_avail[..n_students],
            &student_req[..n_students],
        );

        let schedule = generate_schedule(&input, true).unwrap();

        prop_assert!(check_demand_accounting(&schedule, &input).is_empty());
        prop_assert!(check_student_overlap(&schedule).is_empty());
        prop_assert!(check_teacher_capacity(&schedule).is_empty());
        prop_assert!(check_eligibility_closure(&schedule, &input).is_empty());
    }
}
