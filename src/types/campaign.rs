use super::CampaignId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bounded scheduling window, e.g. a summer session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}
