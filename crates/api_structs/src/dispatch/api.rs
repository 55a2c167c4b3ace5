use crate::dtos::DispatchResultDTO;
use serde::{Deserialize, Serialize};

pub mod run_tick {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct RequestBody {
        /// Epoch millis to evaluate the tick at, defaults to the server clock
        #[serde(default)]
        pub now: Option<i64>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: DispatchResultDTO,
        pub snoozes: DispatchResultDTO,
    }
}
