use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_reminders_api_structs::*;
use tally_reminders_domain::ID;

#[derive(Clone)]
pub struct SnoozeClient {
    base: Arc<BaseClient>,
}

pub struct ScheduleSnoozeInput {
    pub user_id: ID,
    pub snooze_minutes: Option<i64>,
    pub message: Option<String>,
}

impl SnoozeClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn schedule(
        &self,
        input: ScheduleSnoozeInput,
    ) -> APIResponse<schedule_snooze::APIResponse> {
        let body = schedule_snooze::RequestBody {
            snooze_minutes: input.snooze_minutes,
            message: input.message,
        };
        self.base
            .post(
                body,
                format!("user/{}/snooze", input.user_id),
                StatusCode::OK,
            )
            .await
    }
}
