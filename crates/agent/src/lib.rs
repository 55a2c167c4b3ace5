//! Recipient side of the reminders: the background agent that turns push
//! messages into notifications and reacts to what the user does with them.

mod agent;
mod event;
mod host;
mod inbox;
mod keep_alive;
mod message;
mod runtime;

pub use agent::NotificationAgent;
pub use event::{AgentEvent, AgentOutcome};
pub use host::{AgentHost, CachedSettings, HostError};
pub use inbox::{ForegroundSnoozeInbox, InboxError};
pub use keep_alive::{KeepAlive, KeepAliveTracker};
pub use message::{ForegroundMessage, SnoozeMessage};
pub use runtime::{run_event_loop, spawn_timer, TimerQueue};

#[cfg(test)]
mod test_host;
