use crate::{
    AgentEvent, AgentHost, CachedSettings, ForegroundMessage, ForegroundSnoozeInbox, HostError,
    KeepAlive, KeepAliveTracker, TimerQueue,
};
use chrono::{DateTime, Utc};
use std::{cell::RefCell, time::Duration};
use tally_reminders_domain::NotificationPayload;

/// Host double that records every interaction
pub struct TestHost {
    pub now: DateTime<Utc>,
    pub tracker: KeepAliveTracker,
    pub settings: Option<CachedSettings>,
    pub fail_display: bool,
    pub foregrounds: RefCell<Vec<ForegroundSnoozeInbox>>,
    pub shown: RefCell<Vec<NotificationPayload>>,
    /// Number of active holds observed while each notification was shown
    pub holds_during_show: RefCell<Vec<usize>>,
    pub holds_during_post: RefCell<Vec<usize>>,
    pub closed: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<String>>,
    pub scheduled: RefCell<Vec<(Duration, AgentEvent)>>,
    /// When set, scheduled events are also armed as real timers
    pub timers: Option<TimerQueue>,
}

impl TestHost {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            tracker: KeepAliveTracker::new(),
            settings: None,
            fail_display: false,
            foregrounds: RefCell::new(Vec::new()),
            shown: RefCell::new(Vec::new()),
            holds_during_show: RefCell::new(Vec::new()),
            holds_during_post: RefCell::new(Vec::new()),
            closed: RefCell::new(Vec::new()),
            opened: RefCell::new(Vec::new()),
            scheduled: RefCell::new(Vec::new()),
            timers: None,
        }
    }

    pub fn with_timers(mut self, timers: TimerQueue) -> Self {
        self.timers = Some(timers);
        self
    }
}

#[async_trait::async_trait(?Send)]
impl AgentHost for TestHost {
    fn keep_alive(&self, reason: &'static str) -> KeepAlive {
        self.tracker.hold(reason)
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    async fn show_notification(&self, payload: &NotificationPayload) -> Result<(), HostError> {
        self.holds_during_show.borrow_mut().push(self.tracker.active());
        if self.fail_display {
            return Err(HostError::Display("permission denied".into()));
        }
        self.shown.borrow_mut().push(payload.clone());
        Ok(())
    }

    async fn close_notification(&self, tag: &str) {
        self.closed.borrow_mut().push(tag.to_string());
    }

    async fn open_or_focus(&self, url: &str) -> Result<(), HostError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }

    async fn post_to_foreground(&self, message: &ForegroundMessage) -> usize {
        self.holds_during_post.borrow_mut().push(self.tracker.active());
        self.foregrounds
            .borrow_mut()
            .iter_mut()
            .map(|inbox| inbox.receive(message.clone()))
            .filter(Result::is_ok)
            .count()
    }

    fn schedule(&self, delay: Duration, event: AgentEvent) {
        if let Some(timers) = &self.timers {
            timers.schedule(delay, event.clone());
        }
        self.scheduled.borrow_mut().push((delay, event));
    }

    async fn cached_settings(&self) -> Option<CachedSettings> {
        self.settings.clone()
    }
}
