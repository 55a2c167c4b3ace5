use crate::{event::AgentEvent, keep_alive::KeepAlive, message::ForegroundMessage};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tally_reminders_domain::{NotificationPayload, ReminderSettings, ID};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Unable to show the notification: {0}")]
    Display(String),
    #[error("Unable to open the app: {0}")]
    Navigation(String),
}

/// Settings the device cached the last time it talked to the server
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSettings {
    pub user_id: ID,
    pub settings: ReminderSettings,
}

/// The environment that runs the background agent: a service worker, a
/// mobile background task or a test double.
///
/// The host decides when the agent lives and dies. It may terminate an idle
/// agent at any time, only outstanding `KeepAlive` holds defer that.
#[async_trait::async_trait(?Send)]
pub trait AgentHost {
    fn keep_alive(&self, reason: &'static str) -> KeepAlive;

    fn now(&self) -> DateTime<Utc>;

    async fn show_notification(&self, payload: &NotificationPayload) -> Result<(), HostError>;

    async fn close_notification(&self, tag: &str);

    /// Focuses an open window of the app on `url`, or opens a new one
    async fn open_or_focus(&self, url: &str) -> Result<(), HostError>;

    /// Broadcasts to every open foreground instance and returns how many of
    /// them acknowledged the message
    async fn post_to_foreground(&self, message: &ForegroundMessage) -> usize;

    /// Delivers `event` back to the agent after `delay`. Not durable: the
    /// event is lost if the host terminates the agent in the meantime.
    fn schedule(&self, delay: Duration, event: AgentEvent);

    async fn cached_settings(&self) -> Option<CachedSettings>;
}
