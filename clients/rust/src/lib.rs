mod base;
mod dispatch;
mod settings;
mod snooze;
mod status;
mod subscription;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use dispatch::DispatchClient;
use settings::ReminderSettingsClient;
pub use settings::UpdateReminderSettingsInput;
use snooze::SnoozeClient;
pub use snooze::ScheduleSnoozeInput;
use status::StatusClient;
use std::sync::Arc;
use subscription::SubscriptionClient;

pub use tally_reminders_api_structs::dtos::*;
pub use tally_reminders_domain::{Subscription, SubscriptionKeys, ID};

// Domain
pub use tally_reminders_api_structs::dtos::DispatchResultDTO as DispatchResult;
pub use tally_reminders_api_structs::dtos::ReminderSettingsDTO as ReminderSettings;
pub use tally_reminders_api_structs::dtos::ScheduledSnoozeDTO as ScheduledSnooze;

/// Tally Reminders Server SDK
///
/// The SDK contains methods for interacting with the reminders server API.
#[derive(Clone)]
pub struct TallySDK {
    pub dispatch: DispatchClient,
    pub settings: ReminderSettingsClient,
    pub snooze: SnoozeClient,
    pub status: StatusClient,
    pub subscription: SubscriptionClient,
}

impl TallySDK {
    /// `address` includes the api prefix, e.g. `http://localhost:5000/api/v1`
    pub fn new(address: String) -> Self {
        Self::build(BaseClient::new(address))
    }

    /// SDK for the external scheduler that triggers dispatch ticks
    pub fn with_cron_secret<T: Into<String>>(address: String, cron_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_cron_secret(cron_secret.into());
        Self::build(base)
    }

    fn build(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let dispatch = DispatchClient::new(base.clone());
        let settings = ReminderSettingsClient::new(base.clone());
        let snooze = SnoozeClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let subscription = SubscriptionClient::new(base);

        Self {
            dispatch,
            settings,
            snooze,
            status,
            subscription,
        }
    }
}
