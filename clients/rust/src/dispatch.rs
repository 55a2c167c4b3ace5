use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_reminders_api_structs::*;

#[derive(Clone)]
pub struct DispatchClient {
    base: Arc<BaseClient>,
}

impl DispatchClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers a dispatch tick. `now` is epoch millis and defaults to the
    /// server clock. Requires the SDK to be created with the cron secret.
    pub async fn run_tick(&self, now: Option<i64>) -> APIResponse<run_tick::APIResponse> {
        let body = run_tick::RequestBody { now };
        self.base
            .post(body, "dispatch/tick".into(), StatusCode::OK)
            .await
    }
}
