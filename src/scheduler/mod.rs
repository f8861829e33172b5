pub mod eligibility;
pub mod model_builder;
pub mod projector;
pub mod solver;

use crate::error::Result;
use crate::types::{Schedule, ScheduleInput, ScheduleMetadata};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Solve one campaign end to end: eligibility → model build → solve → project.
///
/// This is the only entry point the CLI and the ambient test suite need;
/// everything else in this module is an implementation detail of one phase.
pub fn generate_schedule(input: &ScheduleInput, quiet: bool) -> Result<Schedule> {
    let start_time = Instant::now();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    progress.set_message("Building eligibility set...");
    progress.set_position(10);
    log::info!("phase: eligibility");
    let eligible = eligibility::build_eligibility(input);

    progress.set_message("Building MILP model...");
    progress.set_position(30);
    log::info!("phase: model build");
    let model = model_builder::build_model(input, &eligible);

    progress.set_message("Solving (HiGHS)...");
    progress.set_position(60);
    log::info!("phase: solve");
    let outcome = solver::solve(model)?;

    progress.set_message("Projecting solution...");
    progress.set_position(90);
    log::info!("phase: project");
    let (shifts, shortage) = projector::project(input, &outcome);

    progress.set_message("Complete!");
    progress.set_position(100);
    progress.finish_with_message("Schedule generated successfully");

    let elapsed = start_time.elapsed();
    log::info!(
        "solve finished in {}ms: {} shifts, {} shortage rows, feasible={}",
        elapsed.as_millis(),
        shifts.len(),
        shortage.len(),
        outcome.feasible
    );

    Ok(Schedule {
        shifts,
        shortage,
        metadata: ScheduleMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            score: 0.0,
            solve_time_ms: elapsed.as_millis() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn timeslot(id: &str, period: u32) -> TimeSlot {
        TimeSlot {
            id: TimeSlotId(id.to_string()),
            date: NaiveDate::from_ymd_opt(2026, 7, 20).unwrap(),
            period_index: period,
            campaign_id: CampaignId("camp".to_string()),
            period_label: None,
        }
    }

    fn base_input() -> ScheduleInput {
        ScheduleInput {
            subjects: vec![Subject {
                id: SubjectId("M".to_string()),
                name: "Math".to_string(),
                category: None,
            }],
            teachers: vec![],
            students: vec![],
            timeslots: vec![timeslot("TS1", 1)],
            campaigns: vec![Campaign {
                id: CampaignId("camp".to_string()),
                name: "Summer".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                description: String::new(),
            }],
            regular_classes: vec![],
            weights: ConstraintWeights::default(),
            campaign_id: CampaignId("camp".to_string()),
        }
    }

    /// E1 - trivial match: one teacher, one student, one shared timeslot.
    #[test]
    fn trivial_match_produces_one_shift() {
        let mut input = base_input();
        input.teachers.push(Teacher {
            id: TeacherId("T1".to_string()),
            name: "T1".to_string(),
            min_classes: 1,
            desired_shift_count: 0,
            teachable_subjects: vec![SubjectId("M".to_string())],
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        });
        let mut requirements = HashMap::new();
        requirements.insert(SubjectId("M".to_string()), 1);
        input.students.push(Student {
            id: StudentId("S1".to_string()),
            name: "S1".to_string(),
            grade: "G1".to_string(),
            gap_preference: GapPreference::GapAllowed,
            requirements,
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        });

        let schedule = generate_schedule(&input, true).unwrap();

        assert_eq!(schedule.shifts.len(), 1);
        assert!(schedule.shortage.is_empty());
        assert_eq!(schedule.shifts[0].assigned_students, vec![StudentId("S1".to_string())]);
    }

    /// E2 - the student is unavailable at the only shared timeslot, so
    /// demand spills into shortage instead of producing an infeasible model.
    #[test]
    fn unavailable_student_spills_to_shortage() {
        let mut input = base_input();
        input.teachers.push(Teacher {
            id: TeacherId("T1".to_string()),
            name: "T1".to_string(),
            min_classes: 1,
            desired_shift_count: 0,
            teachable_subjects: vec![SubjectId("M".to_string())],
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        });
        let mut requirements = HashMap::new();
        requirements.insert(SubjectId("M".to_string()), 1);
        input.students.push(Student {
            id: StudentId("S1".to_string()),
            name: "S1".to_string(),
            grade: "G1".to_string(),
            gap_preference: GapPreference::GapAllowed,
            requirements,
            available_timeslots: vec![],
        });

        let schedule = generate_schedule(&input, true).unwrap();

        assert!(schedule.shifts.is_empty());
        assert_eq!(schedule.total_shortage(), 1);
    }

    /// E4 - pairing two same-grade students into one shift under a pair
    /// bonus and a same-grade bonus.
    #[test]
    fn pair_bonus_fills_shift_with_two_students() {
        let mut input = base_input();
        input.teachers.push(Teacher {
            id: TeacherId("T1".to_string()),
            name: "T1".to_string(),
            min_classes: 0,
            desired_shift_count: 0,
            teachable_subjects: vec![SubjectId("M".to_string())],
            available_timeslots: vec![TimeSlotId("TS1".to_string())],
        });
        for name in ["S1", "S2"] {
            let mut requirements = HashMap::new();
            requirements.insert(SubjectId("M".to_string()), 1);
            input.students.push(Student {
                id: StudentId(name.to_string()),
                name: name.to_string(),
                grade: "G1".to_string(),
                gap_preference: GapPreference::GapAllowed,
                requirements,
                available_timeslots: vec![TimeSlotId("TS1".to_string())],
            });
        }
        input.weights.max_two_students_bonus = 5.0;
        input.weights.same_grade_bonus = 5.0;

        let schedule = generate_schedule(&input, true).unwrap();

        assert_eq!(schedule.shifts.len(), 1);
        assert_eq!(schedule.shifts[0].assigned_students.len(), 2);
    }
}
