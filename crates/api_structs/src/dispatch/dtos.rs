use serde::{Deserialize, Serialize};
use tally_reminders_domain::{DispatchResult, ID};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchFailureDTO {
    pub user_id: ID,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResultDTO {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<DispatchFailureDTO>,
}

impl DispatchResultDTO {
    pub fn new(result: &DispatchResult) -> Self {
        Self {
            attempted: result.attempted,
            succeeded: result.succeeded,
            failed: result.failed,
            failures: result
                .failures
                .iter()
                .map(|f| DispatchFailureDTO {
                    user_id: f.user_id.clone(),
                    reason: f.reason.to_string(),
                })
                .collect(),
        }
    }
}
