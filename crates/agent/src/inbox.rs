use crate::message::ForegroundMessage;
use chrono::{DateTime, Utc};
use tally_reminders_domain::SnoozeRequest;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InboxError {
    #[error("Malformed foreground message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Snooze time {0} is out of range")]
    InvalidTime(i64),
}

/// Foreground counterpart of the agent. Acknowledges `SCHEDULE_SNOOZE`
/// messages and owns the accepted requests until they are due.
#[derive(Debug, Default)]
pub struct ForegroundSnoozeInbox {
    pending: Vec<SnoozeRequest>,
}

impl ForegroundSnoozeInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a message. `Ok` is the acknowledgement the agent counts.
    pub fn receive(&mut self, message: ForegroundMessage) -> Result<(), InboxError> {
        match message {
            ForegroundMessage::ScheduleSnooze(msg) => {
                let snooze_time = msg.snooze_time;
                let request = msg
                    .into_request()
                    .ok_or(InboxError::InvalidTime(snooze_time))?;
                self.pending.push(request);
                self.pending.sort_by_key(|r| r.fire_at);
                Ok(())
            }
        }
    }

    pub fn receive_json(&mut self, raw: &str) -> Result<(), InboxError> {
        let message: ForegroundMessage = serde_json::from_str(raw)?;
        self.receive(message)
    }

    pub fn next_fire_at(&self) -> Option<DateTime<Utc>> {
        self.pending.first().map(|r| r.fire_at)
    }

    /// Removes and returns the requests due at `now`, earliest first
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<SnoozeRequest> {
        let split = self.pending.partition_point(|r| r.fire_at <= now);
        self.pending.drain(..split).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
