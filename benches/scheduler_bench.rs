use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use shift_scheduler::scheduler::{eligibility, generate_schedule, model_builder};
use shift_scheduler::types::*;
use std::collections::HashMap;

/// Build a synthetic roster with `n_teachers` teachers and `n_students`
/// students sharing `n_timeslots` timeslots per week, each teacher
/// qualified for every subject and free on every timeslot, so the solver
/// has real pairing and gap-penalty tradeoffs to make.
fn synthetic_input(n_teachers: usize, n_students: usize, n_timeslots: usize) -> ScheduleInput {
    let campaign_id = CampaignId("bench".to_string());
    let subject_id = SubjectId("math".to_string());

    let subjects = vec![Subject { id: subject_id.clone(), name: "Math".to_string(), category: None }];

    let timeslots: Vec<TimeSlot> = (0..n_timeslots)
        .map(|i| TimeSlot {
            id: TimeSlotId(format!("ts{i}")),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap() + chrono::Duration::days((i / 3) as i64),
            period_index: (i % 3) as u32 + 1,
            campaign_id: campaign_id.clone(),
            period_label: None,
        })
        .collect();
    let timeslot_ids: Vec<TimeSlotId> = timeslots.iter().map(|ts| ts.id.clone()).collect();

    let teachers: Vec<Teacher> = (0..n_teachers)
        .map(|i| Teacher {
            id: TeacherId(format!("t{i}")),
            name: format!("Teacher {i}"),
            min_classes: 1,
            desired_shift_count: 4,
            teachable_subjects: vec![subject_id.clone()],
            available_timeslots: timeslot_ids.clone(),
        })
        .collect();

    let students: Vec<Student> = (0..n_students)
        .map(|i| {
            let mut requirements = HashMap::new();
            requirements.insert(subject_id.clone(), 2);
            Student {
                id: StudentId(format!("s{i}")),
                name: format!("Student {i}"),
                grade: format!("G{}", i % 3),
                gap_preference: if i % 2 == 0 { GapPreference::NoGapPreferred } else { GapPreference::GapAllowed },
                requirements,
                available_timeslots: timeslot_ids.clone(),
            }
        })
        .collect();

    let campaigns = vec![Campaign {
        id: campaign_id.clone(),
        name: "Bench Campaign".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        description: String::new(),
    }];

    let mut weights = ConstraintWeights::default();
    weights.max_two_students_bonus = 5.0;
    weights.single_student_penalty = 2.0;
    weights.same_grade_bonus = 3.0;
    weights.teacher_gap_penalty = 1.0;
    weights.student_gap_penalty = 1.0;
    weights.shortage_penalty = 10.0;

    ScheduleInput {
        subjects,
        teachers,
        students,
        timeslots,
        campaigns,
        regular_classes: vec![],
        weights,
        campaign_id,
    }
}

fn bench_eligibility(c: &mut Criterion) {
    let input = synthetic_input(6, 24, 15);
    c.bench_function("eligibility/6t_24s_15ts", |b| b.iter(|| eligibility::build_eligibility(&input)));
}

fn bench_model_build(c: &mut Criterion) {
    let input = synthetic_input(6, 24, 15);
    let eligible = eligibility::build_eligibility(&input);
    c.bench_function("model_build/6t_24s_15ts", |b| b.iter(|| model_builder::build_model(&input, &eligible)));
}

fn bench_full_solve(c: &mut Criterion) {
    let small = synthetic_input(4, 12, 9);
    let medium = synthetic_input(6, 24, 15);

    let mut group = c.benchmark_group("generate_schedule");
    group.sample_size(10);
    group.bench_function("4t_12s_9ts", |b| b.iter(|| generate_schedule(&small, true).unwrap()));
    group.bench_function("6t_24s_15ts", |b| b.iter(|| generate_schedule(&medium, true).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_eligibility, bench_model_build, bench_full_solve);
criterion_main!(benches);
