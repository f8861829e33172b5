use super::SubjectId;
use serde::{Deserialize, Serialize};

/// A taught subject, e.g. "Math2B" or "English Reading"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}
