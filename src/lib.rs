//! Tutoring Shift Scheduler - constraint-based campaign shift scheduler
//!
//! This library builds a season's worth of tutoring shifts - (teacher,
//! subject, timeslot) triples filled with up to two students - using
//! Integer Linear Programming (ILP) optimization.
//!
//! # Algorithm Overview
//!
//! The scheduler works in 4 phases:
//! 1. **Eligibility**: intersect teacher/student/subject/timeslot constraints
//!    into the set of decision keys that could possibly be assigned
//! 2. **Model Building**: build the MILP - hard constraints H1-H4 and the
//!    weighted soft objective S1-S7, with reification linearized exactly
//! 3. **Solving**: hand the model to HiGHS and read back the solution
//! 4. **Projection**: group the solved decision variables back into shifts
//!    and a shortage report
//!
//! # Example
//!
//! ```no_run
//! use shift_scheduler::parser::load_input_from_dir;
//! use shift_scheduler::scheduler::generate_schedule;
//! use shift_scheduler::validator::validate_schedule;
//! use std::path::Path;
//!
//! let input = load_input_from_dir(Path::new("./data/demo"), None).unwrap();
//! let schedule = generate_schedule(&input, false).unwrap();
//! let validation = validate_schedule(&schedule, &input);
//! println!("Score: {:.1}", validation.total_score);
//! ```

pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, SchedulerError};
