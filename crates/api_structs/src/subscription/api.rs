use crate::dtos::SubscriptionDTO;
use serde::{Deserialize, Serialize};
use tally_reminders_domain::ID;

#[derive(Debug, Deserialize, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub mod register_subscription {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub subscription: SubscriptionDTO,
    }

    pub type APIResponse = SuccessResponse;
}

pub mod delete_subscription {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = SuccessResponse;
}
