use crate::error::{Result, SchedulerError};
use crate::types::{
    Campaign, CampaignId, ConstraintWeights, RegularClass, ScheduleInput, Student, Subject,
    Teacher, TimeSlot,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The optional `config.toml` next to the roster: which campaign to solve
/// and the weight map for the soft objective (SPEC_FULL.md §6)
#[derive(Debug, Clone, Default, serde::Deserialize)]
struct FileConfig {
    campaign_id: Option<String>,
    #[serde(default)]
    weights: HashMap<String, f64>,
}

/// Load all roster data from a directory, selecting a campaign.
///
/// `campaign_override` takes priority over `config.toml`'s `campaign_id`.
pub fn load_input_from_dir(dir: &Path, campaign_override: Option<CampaignId>) -> Result<ScheduleInput> {
    let subjects = load_subjects(&dir.join("subjects.json"))?;
    let teachers = load_teachers(&dir.join("teachers.json"))?;
    let students = load_students(&dir.join("students.json"))?;
    let timeslots = load_timeslots(&dir.join("timeslots.json"))?;
    let campaigns = load_campaigns(&dir.join("campaigns.json"))?;
    let regular_classes = load_regular_classes(&dir.join("regular_classes.json"))?;

    let config = load_config_or_default(&dir.join("config.toml"));
    let (weights, unknown_keys) = ConstraintWeights::from_map(&config.weights);
    for key in &unknown_keys {
        log::warn!("ignoring unrecognized constraint weight key '{key}'");
    }

    let campaign_id = campaign_override
        .or_else(|| config.campaign_id.map(CampaignId))
        .ok_or_else(|| {
            SchedulerError::CampaignNotFound {
                campaign_id: String::new(),
            }
        })?;

    let _ = &subjects; // subjects are validated but not required to build ScheduleInput directly

    Ok(ScheduleInput {
        subjects,
        teachers,
        students,
        timeslots,
        campaigns,
        regular_classes,
        weights,
        campaign_id,
    })
}

/// Load subjects from JSON file
pub fn load_subjects(path: &Path) -> Result<Vec<Subject>> {
    load_json_file(path)
}

/// Load teachers from JSON file
pub fn load_teachers(path: &Path) -> Result<Vec<Teacher>> {
    load_json_file(path)
}

/// Load students from JSON file
pub fn load_students(path: &Path) -> Result<Vec<Student>> {
    load_json_file(path)
}

/// Load timeslots from JSON file
pub fn load_timeslots(path: &Path) -> Result<Vec<TimeSlot>> {
    load_json_file(path)
}

/// Load campaigns from JSON file
pub fn load_campaigns(path: &Path) -> Result<Vec<Campaign>> {
    load_json_file(path)
}

/// Load regular (recurring) classes from JSON file
pub fn load_regular_classes(path: &Path) -> Result<Vec<RegularClass>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_json_file(path)
}

/// Load config from TOML file, or use defaults
fn load_config_or_default(path: &Path) -> FileConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => FileConfig::default(),
        }
    } else {
        FileConfig::default()
    }
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
