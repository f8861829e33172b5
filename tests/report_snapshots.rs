use shift_scheduler::reporter::{generate_json_report, generate_markdown_report};
use shift_scheduler::types::*;
use shift_scheduler::validator::validate_schedule;

fn fixed_schedule() -> Schedule {
    Schedule {
        shifts: vec![Shift {
            id: ShiftId("Shift_1".to_string()),
            teacher_id: TeacherId("t1".to_string()),
            subject_id: SubjectId("math".to_string()),
            timeslot_id: TimeSlotId("ts0".to_string()),
            assigned_students: vec![StudentId("s1".to_string())],
        }],
        shortage: vec![ShortageEntry { student_id: StudentId("s2".to_string()), subject_id: SubjectId("math".to_string()), shortage_count: 1 }],
        metadata: ScheduleMetadata {
            generated_at: "2026-07-28T00:00:00+00:00".to_string(),
            algorithm_version: "0.1.0".to_string(),
            score: 87.5,
            solve_time_ms: 42,
        },
    }
}

#[test]
fn schedule_json_rendering_is_stable() {
    let schedule = fixed_schedule();
    let json = generate_json_report(&schedule).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "shifts": [
        {
          "id": "Shift_1",
          "teacher_id": "t1",
          "subject_id": "math",
          "timeslot_id": "ts0",
          "assigned_students": [
            "s1"
          ]
        }
      ],
      "shortage": [
        {
          "student_id": "s2",
          "subject_id": "math",
          "shortage_count": 1
        }
      ],
      "metadata": {
        "generated_at": "2026-07-28T00:00:00+00:00",
        "algorithm_version": "0.1.0",
        "score": 87.5,
        "solve_time_ms": 42
      }
    }
    "#);
}

/// An empty roster with an empty schedule makes every soft-score ratio
/// degenerate to 100% (SPEC_FULL.md's "no max_score, no shortfall" rule),
/// which keeps this rendering fully deterministic without depending on the
/// solver.
#[test]
fn empty_schedule_markdown_rendering_is_stable() {
    let input = ScheduleInput {
        subjects: vec![],
        teachers: vec![],
        students: vec![],
        timeslots: vec![],
        campaigns: vec![],
        regular_classes: vec![],
        weights: ConstraintWeights::default(),
        campaign_id: CampaignId("camp".to_string()),
    };
    let schedule = Schedule {
        shifts: vec![],
        shortage: vec![],
        metadata: ScheduleMetadata {
            generated_at: "2026-07-28T00:00:00+00:00".to_string(),
            algorithm_version: "0.1.0".to_string(),
            score: 0.0,
            solve_time_ms: 0,
        },
    };
    let validation = validate_schedule(&schedule, &input);

    let markdown = generate_markdown_report(&schedule, &input, &validation);

    insta::assert_snapshot!(markdown, @r#"
    # Schedule Report

    Generated: 2026-07-28T00:00:00+00:00
    Algorithm: v0.1.0
    Solve time: 0ms

    ## Summary

    | Metric | Value |
    |--------|-------|
    | Total Shifts | 0 |
    | Total Teachers | 0 |
    | Total Students | 0 |
    | Total Assignments | 0 |
    | Total Shortage | 0 |
    | Students Fully Served | 0 |
    | Teachers With Shifts | 0 |
    | Avg Shifts / Active Teacher | 0.0 |
    | Overall Score | 100.0/100 |

    ## Validation: ✅ PASSED

    ## Soft Constraint Scores

    - **MaxTwoStudentsBonus**: 100.0% (0/0 shifts fully paired)
    - **SingleStudentPenalty**: 100.0% (0/0 shifts left as singletons)
    - **SameGradeBonus**: 100.0% (0/0 paired shifts are same-grade)
    - **RegularClassContinuityBonus**: 100.0% (0/0 continuity opportunities kept)
    - **TeacherGapPenalty**: 100.0% (0/0 teacher-day transitions were gaps)
    - **StudentGapPenalty**: 100.0% (0/0 weighted student-day transitions were gaps)
    - **ShortagePenalty**: 100.0% (0/0 demand units unmet)

    ## Shifts by Subject
    "#);
}
