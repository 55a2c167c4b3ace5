use chrono::{DateTime, Utc};
use tally_reminders_domain::{NotificationPayload, SnoozeRequest};

/// Everything the host can wake the agent up for
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Inbound push message with its raw body, if any
    Push { data: Option<Vec<u8>> },
    /// The user clicked the notification body (`action` is `None`) or one
    /// of its action buttons
    NotificationClick {
        payload: NotificationPayload,
        action: Option<String>,
    },
    /// The user swiped the notification away
    NotificationClose { payload: NotificationPayload },
    SnoozeElapsed(SnoozeRequest),
    /// Host provided recurring wake up, used as an offline fallback
    PeriodicWake,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutcome {
    Displayed {
        tag: String,
        /// False when the push body was unusable and the default was shown
        from_payload: bool,
    },
    DisplayFailed(String),
    Dismissed,
    AppOpened { url: String },
    /// A foreground instance took ownership of the snooze
    SnoozeDelegated { acks: usize, fire_at: DateTime<Utc> },
    /// No foreground instance answered, the agent armed its own timer
    SnoozeScheduled { fire_at: DateTime<Utc> },
    /// Periodic wake without anything to show
    Idle,
}
