use crate::shared::entity::ID;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REMINDER_TEXT: &str = "Don't forget to log today's transactions!";
pub const REMINDER_TITLE: &str = "Time to track your spending";
pub const SNOOZED_TITLE: &str = "Reminder: log your transactions";
/// Tag of the daily reminder. Same tag notifications replace each other on the device.
pub const REMINDER_TAG: &str = "transaction-reminder";
/// Distinct from `REMINDER_TAG` so a snoozed reminder can coexist with a new one
pub const SNOOZED_TAG: &str = "transaction-reminder-snoozed";
pub const ACTION_ADD_TRANSACTION: &str = "add-transaction";
pub const ACTION_SNOOZE: &str = "snooze";
pub const ACTION_DISMISS: &str = "dismiss";
pub const REMINDER_TYPE: &str = "transaction-reminder";
pub const SNOOZED_TYPE: &str = "snoozed-reminder";
pub const ICON: &str = "/icons/icon-192x192.png";
pub const BADGE: &str = "/icons/badge-72x72.png";
pub const ADD_TRANSACTION_URL: &str = "/dashboard?action=add-transaction";
/// Largest payload accepted by push services
pub const MAX_PAYLOAD_BYTES: usize = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

impl NotificationAction {
    fn new(action: &str, title: &str) -> Self {
        Self {
            action: action.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO-8601
    pub timestamp: String,
    pub user_id: String,
    pub url: String,
}

impl Default for NotificationData {
    fn default() -> Self {
        Self {
            kind: REMINDER_TYPE.into(),
            timestamp: String::new(),
            user_id: String::new(),
            url: ADD_TRANSACTION_URL.into(),
        }
    }
}

/// Payload pushed to the recipient's device. This is a wire contract
/// shared with the background agent, fields are camelCase.
///
/// Missing fields deserialize to the fallback reminder values, so a
/// partial payload still renders a usable notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
    pub data: NotificationData,
}

impl Default for NotificationPayload {
    fn default() -> Self {
        Self {
            title: REMINDER_TITLE.into(),
            body: DEFAULT_REMINDER_TEXT.into(),
            icon: ICON.into(),
            badge: BADGE.into(),
            tag: REMINDER_TAG.into(),
            require_interaction: true,
            actions: reminder_actions(),
            data: Default::default(),
        }
    }
}

fn reminder_actions() -> Vec<NotificationAction> {
    vec![
        NotificationAction::new(ACTION_ADD_TRANSACTION, "Add transaction"),
        NotificationAction::new(ACTION_SNOOZE, "Remind me later"),
        NotificationAction::new(ACTION_DISMISS, "Dismiss"),
    ]
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Blank or missing reminder text falls back to the default
fn reminder_body(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_REMINDER_TEXT.to_string(),
    }
}

impl NotificationPayload {
    /// The daily reminder sent by the dispatcher
    pub fn reminder(user_id: &ID, reminder_text: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            body: reminder_body(reminder_text),
            data: NotificationData {
                timestamp: iso_timestamp(now),
                user_id: user_id.as_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Replacement notification shown when a snooze elapses
    pub fn snoozed(user_id: &str, message: &str, now: DateTime<Utc>) -> Self {
        Self {
            title: SNOOZED_TITLE.into(),
            body: reminder_body(Some(message)),
            tag: SNOOZED_TAG.into(),
            data: NotificationData {
                kind: SNOOZED_TYPE.into(),
                timestamp: iso_timestamp(now),
                user_id: user_id.to_string(),
                url: ADD_TRANSACTION_URL.into(),
            },
            ..Default::default()
        }
    }

    /// Payload displayed when an inbound push cannot be parsed
    pub fn fallback(now: DateTime<Utc>) -> Self {
        let mut payload = Self::default();
        payload.data.timestamp = iso_timestamp(now);
        payload
    }

    /// Parses an inbound push body. Any failure yields the fallback payload,
    /// the caller always gets something to display.
    pub fn parse_or_fallback(bytes: Option<&[u8]>, now: DateTime<Utc>) -> (Self, bool) {
        let parsed = bytes.and_then(|b| serde_json::from_slice::<Self>(b).ok());
        match parsed {
            Some(mut payload) => {
                if payload.body.trim().is_empty() {
                    payload.body = DEFAULT_REMINDER_TEXT.into();
                }
                if payload.data.timestamp.is_empty() {
                    payload.data.timestamp = iso_timestamp(now);
                }
                (payload, true)
            }
            None => (Self::fallback(now), false),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a.action == action)
    }
}
