use crate::shared::entity::ID;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SNOOZE_MINUTES: i64 = 120;
/// One week
pub const MAX_SNOOZE_MINUTES: i64 = 7 * 24 * 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidSnoozeError {
    #[error("Snooze of {0} minutes is longer than the maximum of {max} minutes", max = MAX_SNOOZE_MINUTES)]
    TooLong(i64),
    #[error("Snooze fire time is out of range")]
    OutOfRange,
}

/// Request to show the reminder again at `fire_at`. Lives on the recipient's
/// device and is consumed once when the replacement notification is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct SnoozeRequest {
    pub user_id: String,
    pub fire_at: DateTime<Utc>,
    pub message: String,
}

impl SnoozeRequest {
    /// Missing or non-positive `minutes` fall back to the default snooze
    pub fn new(
        user_id: &str,
        message: &str,
        now: DateTime<Utc>,
        minutes: Option<i64>,
    ) -> Result<Self, InvalidSnoozeError> {
        let minutes = match minutes {
            Some(m) if m > MAX_SNOOZE_MINUTES => return Err(InvalidSnoozeError::TooLong(m)),
            Some(m) if m > 0 => m,
            _ => DEFAULT_SNOOZE_MINUTES,
        };
        let fire_at = now
            .checked_add_signed(Duration::minutes(minutes))
            .ok_or(InvalidSnoozeError::OutOfRange)?;
        Ok(Self {
            user_id: user_id.to_string(),
            fire_at,
            message: message.to_string(),
        })
    }

    pub fn delay_from(&self, now: DateTime<Utc>) -> std::time::Duration {
        (self.fire_at - now)
            .to_std()
            .unwrap_or_else(|_| std::time::Duration::from_secs(0))
    }
}

/// A snooze handed to the server so it survives the device going away.
/// Delivered by the dispatch tick once `fire_at` has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSnooze {
    pub id: ID,
    pub user_id: ID,
    /// Epoch millis
    pub fire_at: i64,
    pub message: String,
}

impl ScheduledSnooze {
    pub fn new(user_id: ID, fire_at: i64, message: String) -> Self {
        Self {
            id: Default::default(),
            user_id,
            fire_at,
            message,
        }
    }
}
