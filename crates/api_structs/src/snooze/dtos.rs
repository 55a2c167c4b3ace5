use serde::{Deserialize, Serialize};
use tally_reminders_domain::{ScheduledSnooze, ID};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSnoozeDTO {
    pub id: ID,
    pub user_id: ID,
    pub fire_at: i64,
    pub message: String,
}

impl ScheduledSnoozeDTO {
    pub fn new(snooze: &ScheduledSnooze) -> Self {
        Self {
            id: snooze.id.clone(),
            user_id: snooze.user_id.clone(),
            fire_at: snooze.fire_at,
            message: snooze.message.clone(),
        }
    }
}
