mod dispatch;
mod eligibility;
mod payload;
mod settings;
mod shared;
mod snooze;
mod subscription;

pub use dispatch::{DeliveryFailure, DispatchFailure, DispatchResult, TransportError};
pub use eligibility::{is_eligible, local_date, weekday_index, within_window, WINDOW_MINUTES};
pub use payload::{
    NotificationAction, NotificationData, NotificationPayload, ACTION_ADD_TRANSACTION,
    ACTION_DISMISS, ACTION_SNOOZE, ADD_TRANSACTION_URL, DEFAULT_REMINDER_TEXT, MAX_PAYLOAD_BYTES,
    REMINDER_TAG, SNOOZED_TAG,
};
pub use settings::{Frequency, InvalidSettingsError, ReminderSettings, ReminderTime};
pub use shared::entity::{InvalidIDError, ID};
pub use snooze::{
    InvalidSnoozeError, ScheduledSnooze, SnoozeRequest, DEFAULT_SNOOZE_MINUTES, MAX_SNOOZE_MINUTES,
};
pub use subscription::{Recipient, Subscription, SubscriptionKeys};

pub use chrono_tz::Tz;
