use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_reminders_api_structs::*;
use tally_reminders_domain::ID;

#[derive(Clone)]
pub struct ReminderSettingsClient {
    base: Arc<BaseClient>,
}

pub struct UpdateReminderSettingsInput {
    pub user_id: ID,
    pub enabled: bool,
    /// Local "HH:MM"
    pub time: String,
    pub frequency: String,
    pub custom_days: Option<Vec<u8>>,
    pub reminder_text: Option<String>,
    pub timezone: Option<String>,
}

impl ReminderSettingsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, user_id: ID) -> APIResponse<get_reminder_settings::APIResponse> {
        self.base
            .get(
                format!("user/{}/reminder-settings", user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderSettingsInput,
    ) -> APIResponse<update_reminder_settings::APIResponse> {
        let body = update_reminder_settings::RequestBody {
            enabled: input.enabled,
            time: input.time,
            frequency: input.frequency,
            custom_days: input.custom_days,
            reminder_text: input.reminder_text,
            timezone: input.timezone,
        };
        self.base
            .put(
                body,
                format!("user/{}/reminder-settings", input.user_id),
                StatusCode::OK,
            )
            .await
    }
}
