use crate::dtos::ScheduledSnoozeDTO;
use serde::{Deserialize, Serialize};
use tally_reminders_domain::{ScheduledSnooze, ID};

pub mod schedule_snooze {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub snooze_minutes: Option<i64>,
        #[serde(default)]
        pub message: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub snooze: ScheduledSnoozeDTO,
    }

    impl APIResponse {
        pub fn new(snooze: &ScheduledSnooze) -> Self {
            Self {
                snooze: ScheduledSnoozeDTO::new(snooze),
            }
        }
    }
}
