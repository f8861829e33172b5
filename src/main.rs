use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use shift_scheduler::parser::{clean_input, load_input_from_dir, validate_campaign_selection};
use shift_scheduler::reporter::{
    generate_reports, generate_student_schedule, generate_teacher_schedule, print_summary, OutputFormat,
};
use shift_scheduler::scheduler::generate_schedule;
use shift_scheduler::types::{CampaignId, StudentId, TeacherId};
use shift_scheduler::validator::validate_schedule;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shift-scheduler")]
#[command(about = "Constraint-based tutoring shift scheduler for seasonal campaigns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demo with sample data
    Demo {
        /// Only save if score improves or matches previous best
        #[arg(long)]
        monotonic: bool,
    },

    /// Generate a schedule from input data
    Schedule {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for schedule files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Campaign ID to solve, overriding config.toml
        #[arg(long)]
        campaign: Option<String>,

        /// Suppress progress output, print JSON summary only
        #[arg(short, long)]
        quiet: bool,

        /// Only save if score improves or matches previous best
        #[arg(long)]
        monotonic: bool,
    },

    /// Validate an existing schedule
    Validate {
        /// Path to schedule.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing input data for validation
        #[arg(short, long)]
        data: PathBuf,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate reports from a schedule
    Report {
        /// Path to schedule.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing input data
        #[arg(short, long)]
        data: PathBuf,

        /// Output format: json, markdown, or text
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Generate schedule for specific student ID
        #[arg(long)]
        student: Option<String>,

        /// Generate schedule for specific teacher ID
        #[arg(long)]
        teacher: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { monotonic } => run_demo(monotonic),
        Commands::Schedule { data, output, format, campaign, quiet, monotonic } => {
            run_schedule(&data, &output, &format, campaign, quiet, monotonic)
        }
        Commands::Validate { schedule, data, verbose } => run_validate(&schedule, &data, verbose),
        Commands::Report { schedule, data, format, student, teacher } => {
            run_report(&schedule, &data, &format, student, teacher)
        }
    }
}

fn run_demo(monotonic: bool) -> Result<()> {
    println!("{}", "Tutoring Shift Scheduler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    let output_path = PathBuf::from("output");

    if !demo_path.join("students.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    let baseline_score = if monotonic { load_baseline_score(&output_path.join("schedule.json")) } else { None };

    if let Some(score) = baseline_score {
        println!("Baseline score: {:.1}/100", score);
    }

    println!("Loading demo data from: {}", demo_path.display());

    let input = load_and_clean(&demo_path, None)?;

    println!(
        "Loaded {} students, {} teachers, {} subjects, {} timeslots",
        input.students.len(),
        input.teachers.len(),
        input.subjects.len(),
        input.timeslots.len()
    );

    println!("\nGenerating schedule...\n");
    let schedule = generate_schedule(&input, false)?;
    let validation = validate_schedule(&schedule, &input);

    let should_save = decide_save(baseline_score, monotonic, validation.total_score, false);

    print_summary(&schedule, &validation);

    if should_save {
        generate_reports(
            &schedule,
            &input,
            &validation,
            &output_path,
            &[OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text],
        )?;
        println!("Reports written to: {}", output_path.display().to_string().green());
    }

    Ok(())
}

fn run_schedule(
    data: &PathBuf,
    output: &PathBuf,
    format: &str,
    campaign: Option<String>,
    quiet: bool,
    monotonic: bool,
) -> Result<()> {
    let input = load_and_clean(data, campaign.map(CampaignId))?;

    let baseline_score = if monotonic { load_baseline_score(&output.join("schedule.json")) } else { None };

    if !quiet {
        if let Some(score) = baseline_score {
            println!("Baseline score: {:.1}/100", score);
        }
        println!(
            "Loaded {} students, {} teachers, {} subjects, {} timeslots",
            input.students.len(),
            input.teachers.len(),
            input.subjects.len(),
            input.timeslots.len()
        );
    }

    let schedule = generate_schedule(&input, quiet)?;
    let validation = validate_schedule(&schedule, &input);

    let should_save = decide_save(baseline_score, monotonic, validation.total_score, quiet);

    if should_save {
        let formats = parse_formats(format);
        generate_reports(&schedule, &input, &validation, output, &formats)?;
    }

    if quiet {
        let summary = shift_scheduler::reporter::generate_json_summary(&schedule)?;
        println!("{}", summary);
    } else {
        print_summary(&schedule, &validation);
        if should_save {
            println!("Reports written to: {}", output.display().to_string().green());
        }
    }

    Ok(())
}

/// Load the roster, clean referentially-broken rows, and validate campaign
/// selection (SPEC_FULL.md §7's configuration-boundary check).
fn load_and_clean(dir: &PathBuf, campaign_override: Option<CampaignId>) -> Result<shift_scheduler::types::ScheduleInput> {
    let input = load_input_from_dir(dir, campaign_override).context("Failed to load input data")?;
    let (input, cleaning) = clean_input(input);
    for warning in &cleaning.warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }
    validate_campaign_selection(&input)?;
    Ok(input)
}

fn decide_save(baseline_score: Option<f64>, monotonic: bool, score: f64, quiet: bool) -> bool {
    match baseline_score {
        Some(baseline) if monotonic => {
            if score >= baseline {
                if !quiet {
                    if score > baseline {
                        println!("{}", format!("✓ Improved: {:.1} → {:.1}", baseline, score).green().bold());
                    } else {
                        println!("{}", format!("= Matched: {:.1}", score).cyan());
                    }
                }
                true
            } else {
                if !quiet {
                    println!(
                        "{}",
                        format!("✗ Regression: {:.1} → {:.1} (not saving)", baseline, score).red().bold()
                    );
                }
                false
            }
        }
        _ => true,
    }
}

/// Load the score from an existing schedule file
fn load_baseline_score(path: &PathBuf) -> Option<f64> {
    if !path.exists() {
        return None;
    }

    let content = std::fs::read_to_string(path).ok()?;
    let schedule: shift_scheduler::types::Schedule = serde_json::from_str(&content).ok()?;
    Some(schedule.metadata.score)
}

fn run_validate(schedule_path: &PathBuf, data: &PathBuf, verbose: bool) -> Result<()> {
    let input = load_and_clean(data, None)?;

    let schedule_json = std::fs::read_to_string(schedule_path)?;
    let schedule: shift_scheduler::types::Schedule = serde_json::from_str(&schedule_json)?;

    let validation = validate_schedule(&schedule, &input);

    if validation.is_valid {
        println!("{}", "✓ Schedule is valid".green().bold());
    } else {
        println!("{}", "✗ Schedule has violations".red().bold());
        for v in &validation.hard_violations {
            println!("  - {}: {}", v.constraint.red(), v.message);
        }
    }

    if verbose {
        println!("\n{}", "Soft Constraint Scores:".bold());
        for score in &validation.soft_scores {
            let pct = if score.max_score > 0.0 { (score.score / score.max_score) * 100.0 } else { 100.0 };
            println!("  {}: {:.1}%", score.constraint, pct);
        }

        println!("\n{}", "Statistics:".bold());
        println!("  Shifts: {}", validation.statistics.total_shifts);
        println!("  Assignments: {}", validation.statistics.total_assignments);
        println!("  Shortage: {}", validation.statistics.total_shortage);
        println!(
            "  Students fully served: {}/{}",
            validation.statistics.students_fully_served, validation.statistics.total_students
        );
    }

    println!("\nOverall Score: {:.1}/100", validation.total_score);

    Ok(())
}

fn run_report(schedule_path: &PathBuf, data: &PathBuf, _format: &str, student: Option<String>, teacher: Option<String>) -> Result<()> {
    let input = load_and_clean(data, None)?;

    let schedule_json = std::fs::read_to_string(schedule_path)?;
    let schedule: shift_scheduler::types::Schedule = serde_json::from_str(&schedule_json)?;

    if let Some(student_id) = student {
        let id = StudentId(student_id);
        match generate_student_schedule(&schedule, &input, &id) {
            Some(report) => println!("{}", report),
            None => println!("Student not found"),
        }
    } else if let Some(teacher_id) = teacher {
        let id = TeacherId(teacher_id);
        match generate_teacher_schedule(&schedule, &input, &id) {
            Some(report) => println!("{}", report),
            None => println!("Teacher not found"),
        }
    } else {
        let validation = validate_schedule(&schedule, &input);
        print_summary(&schedule, &validation);
    }

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let subjects = serde_json::json!([
        {"id": "math2b", "name": "Math 2B"},
        {"id": "eng_read", "name": "English Reading"},
        {"id": "science", "name": "Science"},
    ]);
    std::fs::write(path.join("subjects.json"), serde_json::to_string_pretty(&subjects)?)?;

    let teachers = serde_json::json!([
        {
            "id": "t001", "name": "Ms. Anderson", "min_classes": 2, "desired_shift_count": 6,
            "teachable_subjects": ["math2b", "science"],
            "available_timeslots": ["ts_mon_1", "ts_mon_2", "ts_wed_1", "ts_wed_2", "ts_fri_1"]
        },
        {
            "id": "t002", "name": "Mr. Baker", "min_classes": 2, "desired_shift_count": 6,
            "teachable_subjects": ["eng_read", "math2b"],
            "available_timeslots": ["ts_mon_1", "ts_mon_2", "ts_wed_1", "ts_fri_1", "ts_fri_2"]
        }
    ]);
    std::fs::write(path.join("teachers.json"), serde_json::to_string_pretty(&teachers)?)?;

    let students = serde_json::json!([
        {
            "id": "s001", "name": "Alice Johnson", "grade": "10", "gap_preference": "NoGapPreferred",
            "requirements": {"math2b": 2, "science": 1},
            "available_timeslots": ["ts_mon_1", "ts_mon_2", "ts_wed_1", "ts_wed_2", "ts_fri_1"]
        },
        {
            "id": "s002", "name": "Bob Smith", "grade": "10", "gap_preference": "GapAllowed",
            "requirements": {"math2b": 2, "eng_read": 1},
            "available_timeslots": ["ts_mon_1", "ts_mon_2", "ts_wed_1", "ts_fri_1", "ts_fri_2"]
        },
        {
            "id": "s003", "name": "Carol Davis", "grade": "11", "gap_preference": "NoGapPreferred",
            "requirements": {"eng_read": 1, "science": 1},
            "available_timeslots": ["ts_mon_1", "ts_wed_1", "ts_fri_1", "ts_fri_2"]
        }
    ]);
    std::fs::write(path.join("students.json"), serde_json::to_string_pretty(&students)?)?;

    let timeslots = serde_json::json!([
        {"id": "ts_mon_1", "date": "2026-08-03", "period_index": 1, "campaign_id": "summer2026", "period_label": "9:00am"},
        {"id": "ts_mon_2", "date": "2026-08-03", "period_index": 2, "campaign_id": "summer2026", "period_label": "10:00am"},
        {"id": "ts_wed_1", "date": "2026-08-05", "period_index": 1, "campaign_id": "summer2026", "period_label": "9:00am"},
        {"id": "ts_wed_2", "date": "2026-08-05", "period_index": 2, "campaign_id": "summer2026", "period_label": "10:00am"},
        {"id": "ts_fri_1", "date": "2026-08-07", "period_index": 1, "campaign_id": "summer2026", "period_label": "9:00am"},
        {"id": "ts_fri_2", "date": "2026-08-07", "period_index": 2, "campaign_id": "summer2026", "period_label": "10:00am"}
    ]);
    std::fs::write(path.join("timeslots.json"), serde_json::to_string_pretty(&timeslots)?)?;

    let campaigns = serde_json::json!([
        {"id": "summer2026", "name": "Summer 2026", "start_date": "2026-08-03", "end_date": "2026-08-07", "description": "Summer cram session"}
    ]);
    std::fs::write(path.join("campaigns.json"), serde_json::to_string_pretty(&campaigns)?)?;

    let regular_classes = serde_json::json!([
        {"id": "rc001", "teacher_id": "t001", "subject_id": "math2b", "timeslot_id": "ts_mon_1", "enrolled_student_ids": ["s001"]}
    ]);
    std::fs::write(path.join("regular_classes.json"), serde_json::to_string_pretty(&regular_classes)?)?;

    let config = r#"campaign_id = "summer2026"

[weights]
maxTwoStudentsBonus = 5.0
singleStudentPenalty = 2.0
sameGradeBonus = 3.0
regularClassContinuityBonus = 4.0
teacherGapPenalty = 1.0
studentGapPenalty = 1.0
shortagePenalty = 10.0
"#;
    std::fs::write(path.join("config.toml"), config)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
