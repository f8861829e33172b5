use super::{CampaignId, TimeSlotId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (date, period) slot within a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub date: NaiveDate,
    pub period_index: u32,
    pub campaign_id: CampaignId,
    #[serde(default)]
    pub period_label: Option<String>,
}
