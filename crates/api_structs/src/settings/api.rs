use crate::dtos::ReminderSettingsDTO;
use serde::{Deserialize, Serialize};
use tally_reminders_domain::{ReminderSettings, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsResponse {
    pub user_id: ID,
    pub settings: ReminderSettingsDTO,
}

impl ReminderSettingsResponse {
    pub fn new(user_id: ID, settings: &ReminderSettings) -> Self {
        Self {
            user_id,
            settings: ReminderSettingsDTO::new(settings),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserPathParams {
    pub user_id: ID,
}

pub mod get_reminder_settings {
    use super::*;

    pub type PathParams = UserPathParams;
    pub type APIResponse = ReminderSettingsResponse;
}

pub mod update_reminder_settings {
    use super::*;

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub enabled: bool,
        pub time: String,
        pub frequency: String,
        #[serde(default)]
        pub custom_days: Option<Vec<u8>>,
        #[serde(default)]
        pub reminder_text: Option<String>,
        #[serde(default)]
        pub timezone: Option<String>,
    }

    pub type APIResponse = ReminderSettingsResponse;
}
