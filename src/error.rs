use thiserror::Error;

/// Domain-specific errors for the scheduler
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    // Configuration errors
    #[error("Campaign '{campaign_id}' not found in roster")]
    CampaignNotFound { campaign_id: String },

    #[error("No timeslots belong to campaign '{campaign_id}'")]
    NoTimeslotsForCampaign { campaign_id: String },

    // Data validation errors
    #[error("Student '{student_id}' requires unknown subject '{subject_id}'")]
    UnknownSubject { student_id: String, subject_id: String },

    #[error("Teacher '{teacher_id}' is not qualified to teach subject '{subject_id}'")]
    UnqualifiedTeacher {
        teacher_id: String,
        subject_id: String,
    },

    #[error("Subject '{subject_id}' has no qualified teachers")]
    NoQualifiedTeacher { subject_id: String },

    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },

    // Solver errors
    #[error("ILP solver failed: {0}")]
    SolverFailed(String),

    #[error("No feasible solution found")]
    Infeasible,

    // Validation errors
    #[error("Schedule violates hard constraint: {0}")]
    HardConstraintViolation(String),
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
