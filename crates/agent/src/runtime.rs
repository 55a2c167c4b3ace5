use crate::{
    agent::NotificationAgent,
    event::{AgentEvent, AgentOutcome},
    host::AgentHost,
};
use std::{cell::RefCell, time::Duration};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::debug;

/// Feeds events to the agent strictly one after another, in the order the
/// host delivered them. Returns once every sender is gone.
pub async fn run_event_loop<H: AgentHost>(
    agent: &mut NotificationAgent<H>,
    mut events: UnboundedReceiver<AgentEvent>,
    outcomes: Option<UnboundedSender<AgentOutcome>>,
) {
    while let Some(event) = events.recv().await {
        let outcome = agent.handle(event).await;
        debug!("Agent event handled: {:?}", outcome);
        if let Some(outcomes) = &outcomes {
            let _ = outcomes.send(outcome);
        }
    }
}

/// In-process delayed delivery of `event`. Nothing is persisted, aborting
/// the task or stopping the runtime loses the event.
pub fn spawn_timer(
    events: UnboundedSender<AgentEvent>,
    delay: Duration,
    event: AgentEvent,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if events.send(event).is_err() {
            debug!("Agent is gone, dropping timer event");
        }
    })
}

/// The timers armed by one agent instance. A host embeds this to implement
/// `AgentHost::schedule` and calls `terminate` when it reclaims the agent.
pub struct TimerQueue {
    events: UnboundedSender<AgentEvent>,
    timers: RefCell<Vec<JoinHandle<()>>>,
}

impl TimerQueue {
    pub fn new(events: UnboundedSender<AgentEvent>) -> Self {
        Self {
            events,
            timers: RefCell::new(Vec::new()),
        }
    }

    pub fn schedule(&self, delay: Duration, event: AgentEvent) {
        let mut timers = self.timers.borrow_mut();
        timers.retain(|t| !t.is_finished());
        timers.push(spawn_timer(self.events.clone(), delay, event));
    }

    pub fn pending(&self) -> usize {
        self.timers.borrow().iter().filter(|t| !t.is_finished()).count()
    }

    /// Drops every armed timer, as happens when the host kills the agent
    pub fn terminate(&self) {
        for timer in self.timers.borrow_mut().drain(..) {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;
    use chrono::{DateTime, TimeZone, Utc};
    use tally_reminders_domain::{
        NotificationPayload, SnoozeRequest, ACTION_SNOOZE, REMINDER_TAG, SNOOZED_TAG,
    };
    use tokio::sync::mpsc::unbounded_channel;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()
    }

    fn snooze_click() -> AgentEvent {
        AgentEvent::NotificationClick {
            payload: NotificationPayload::reminder(
                &"user1".parse().unwrap(),
                Some("Log your lunch"),
                now(),
            ),
            action: Some(ACTION_SNOOZE.into()),
        }
    }

    /// Runs the loop until it has been idle for an hour of (paused) time
    async fn drain<H: AgentHost>(
        agent: &mut NotificationAgent<H>,
        events: UnboundedReceiver<AgentEvent>,
    ) -> Vec<AgentOutcome> {
        let (outcomes_tx, mut outcomes_rx) = unbounded_channel();
        let _ = tokio::time::timeout(
            Duration::from_secs(3600),
            run_event_loop(agent, events, Some(outcomes_tx)),
        )
        .await;
        let mut outcomes = Vec::new();
        while let Ok(outcome) = outcomes_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn snooze_request() -> SnoozeRequest {
        SnoozeRequest::new(
            "user1",
            "Log it now",
            Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn handles_events_in_delivery_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        let mut agent = NotificationAgent::new(TestHost::new(now));
        let (events, rx) = unbounded_channel();
        let (outcomes_tx, mut outcomes) = unbounded_channel();

        events.send(AgentEvent::Push { data: None }).unwrap();
        spawn_timer(
            events.clone(),
            Duration::from_millis(10),
            AgentEvent::SnoozeElapsed(snooze_request()),
        );
        events.send(AgentEvent::PeriodicWake).unwrap();
        drop(events);

        run_event_loop(&mut agent, rx, Some(outcomes_tx)).await;

        assert_eq!(
            outcomes.recv().await,
            Some(AgentOutcome::Displayed {
                tag: REMINDER_TAG.into(),
                from_payload: false
            })
        );
        assert_eq!(outcomes.recv().await, Some(AgentOutcome::Idle));
        assert_eq!(
            outcomes.recv().await,
            Some(AgentOutcome::Displayed {
                tag: SNOOZED_TAG.into(),
                from_payload: true
            })
        );
        assert_eq!(outcomes.recv().await, None);
    }

    #[tokio::test]
    async fn terminated_agent_loses_its_timers() {
        let (events, mut rx) = unbounded_channel();
        let timers = TimerQueue::new(events);

        timers.schedule(
            Duration::from_millis(20),
            AgentEvent::SnoozeElapsed(snooze_request()),
        );
        assert_eq!(timers.pending(), 1);

        timers.terminate();
        assert_eq!(timers.pending(), 0);
        drop(timers);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn local_snooze_fires_through_the_event_loop() {
        let (events, rx) = unbounded_channel();
        let host = TestHost::new(now()).with_timers(TimerQueue::new(events.clone()));
        let mut agent = NotificationAgent::new(host).with_snooze_minutes(1);

        events.send(snooze_click()).unwrap();
        let outcomes = drain(&mut agent, rx).await;

        assert_eq!(
            outcomes,
            vec![
                AgentOutcome::SnoozeScheduled {
                    fire_at: now() + chrono::Duration::minutes(1)
                },
                AgentOutcome::Displayed {
                    tag: SNOOZED_TAG.into(),
                    from_payload: true
                },
            ]
        );
        let shown = agent.host().shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].tag, SNOOZED_TAG);
        assert_eq!(shown[0].body, "Log your lunch");
    }

    #[tokio::test(start_paused = true)]
    async fn terminating_the_agent_drops_the_local_snooze() {
        let (events, rx) = unbounded_channel();
        let host = TestHost::new(now()).with_timers(TimerQueue::new(events.clone()));
        let mut agent = NotificationAgent::new(host).with_snooze_minutes(1);

        let outcome = agent.handle(snooze_click()).await;
        assert!(matches!(outcome, AgentOutcome::SnoozeScheduled { .. }));
        if let Some(timers) = &agent.host().timers {
            assert_eq!(timers.pending(), 1);
            timers.terminate();
        }

        let outcomes = drain(&mut agent, rx).await;

        assert!(outcomes.is_empty());
        assert!(agent.host().shown.borrow().is_empty());
    }
}
