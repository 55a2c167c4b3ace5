use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_reminders_api_structs::{dtos::SubscriptionDTO, *};
use tally_reminders_domain::{Subscription, ID};

#[derive(Clone)]
pub struct SubscriptionClient {
    base: Arc<BaseClient>,
}

impl SubscriptionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn register(
        &self,
        user_id: ID,
        subscription: &Subscription,
    ) -> APIResponse<register_subscription::APIResponse> {
        let body = register_subscription::RequestBody {
            user_id,
            subscription: SubscriptionDTO::new(subscription),
        };
        self.base
            .post(body, "subscription".into(), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, user_id: ID) -> APIResponse<delete_subscription::APIResponse> {
        self.base
            .delete(format!("subscription/{}", user_id), StatusCode::OK)
            .await
    }
}
