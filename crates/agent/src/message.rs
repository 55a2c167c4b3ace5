use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tally_reminders_domain::SnoozeRequest;

/// Messages the background agent posts to open foreground instances of the
/// app. Serialized as `{"type": "SCHEDULE_SNOOZE", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForegroundMessage {
    ScheduleSnooze(SnoozeMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnoozeMessage {
    pub user_id: String,
    /// Epoch millis at which the reminder should be shown again
    pub snooze_time: i64,
    pub message: String,
}

impl ForegroundMessage {
    pub fn schedule_snooze(request: &SnoozeRequest) -> Self {
        Self::ScheduleSnooze(SnoozeMessage {
            user_id: request.user_id.clone(),
            snooze_time: request.fire_at.timestamp_millis(),
            message: request.message.clone(),
        })
    }
}

impl SnoozeMessage {
    pub fn into_request(self) -> Option<SnoozeRequest> {
        let fire_at: DateTime<Utc> = Utc.timestamp_millis_opt(self.snooze_time).single()?;
        Some(SnoozeRequest {
            user_id: self.user_id,
            fire_at,
            message: self.message,
        })
    }
}
