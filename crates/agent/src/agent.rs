use crate::{
    event::{AgentEvent, AgentOutcome},
    host::AgentHost,
    message::ForegroundMessage,
};
use chrono::NaiveDate;
use tally_reminders_domain::{
    is_eligible, local_date, NotificationPayload, SnoozeRequest, ACTION_ADD_TRANSACTION,
    ACTION_SNOOZE, ADD_TRANSACTION_URL, MAX_SNOOZE_MINUTES,
};
use tracing::{debug, info, warn};

const ACTION_OPEN: &str = "open";

/// The recipient side state machine. Handles one event at a time, the host
/// serializes delivery.
pub struct NotificationAgent<H: AgentHost> {
    host: H,
    snooze_minutes: Option<i64>,
    /// Local date of the last reminder shown from a periodic wake. Kept in
    /// memory only, lost together with the agent.
    last_periodic_reminder: Option<NaiveDate>,
}

impl<H: AgentHost> NotificationAgent<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            snooze_minutes: None,
            last_periodic_reminder: None,
        }
    }

    /// Snooze length used for the snooze action, defaults to two hours and
    /// is capped at one week
    pub fn with_snooze_minutes(mut self, minutes: i64) -> Self {
        self.snooze_minutes = Some(minutes.min(MAX_SNOOZE_MINUTES));
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub async fn handle(&mut self, event: AgentEvent) -> AgentOutcome {
        match event {
            AgentEvent::Push { data } => self.on_push(data.as_deref()).await,
            AgentEvent::NotificationClick { payload, action } => {
                self.on_click(&payload, action.as_deref()).await
            }
            AgentEvent::NotificationClose { payload } => {
                debug!("Notification {} was closed", payload.tag);
                AgentOutcome::Dismissed
            }
            AgentEvent::SnoozeElapsed(request) => {
                let payload =
                    NotificationPayload::snoozed(&request.user_id, &request.message, self.host.now());
                self.display(&payload, true).await
            }
            AgentEvent::PeriodicWake => self.on_periodic_wake().await,
        }
    }

    async fn on_push(&self, data: Option<&[u8]>) -> AgentOutcome {
        let (payload, from_payload) = NotificationPayload::parse_or_fallback(data, self.host.now());
        if !from_payload {
            warn!("Unable to parse push payload, showing the default reminder");
        }
        self.display(&payload, from_payload).await
    }

    async fn display(&self, payload: &NotificationPayload, from_payload: bool) -> AgentOutcome {
        let _hold = self.host.keep_alive("display notification");
        match self.host.show_notification(payload).await {
            Ok(()) => AgentOutcome::Displayed {
                tag: payload.tag.clone(),
                from_payload,
            },
            Err(e) => {
                warn!("{}", e);
                AgentOutcome::DisplayFailed(e.to_string())
            }
        }
    }

    async fn on_click(&self, payload: &NotificationPayload, action: Option<&str>) -> AgentOutcome {
        self.host.close_notification(&payload.tag).await;

        match action.filter(|a| !a.is_empty()) {
            Some(ACTION_SNOOZE) => self.snooze(payload).await,
            None | Some(ACTION_ADD_TRANSACTION) | Some(ACTION_OPEN) => {
                let url = if payload.data.url.is_empty() {
                    ADD_TRANSACTION_URL
                } else {
                    payload.data.url.as_str()
                };
                if let Err(e) = self.host.open_or_focus(url).await {
                    warn!("{}", e);
                }
                AgentOutcome::AppOpened { url: url.to_string() }
            }
            Some(_) => AgentOutcome::Dismissed,
        }
    }

    async fn snooze(&self, payload: &NotificationPayload) -> AgentOutcome {
        let request = match SnoozeRequest::new(
            &payload.data.user_id,
            &payload.body,
            self.host.now(),
            self.snooze_minutes,
        ) {
            Ok(request) => request,
            Err(e) => {
                warn!("Unable to snooze {}: {}", payload.tag, e);
                return AgentOutcome::Dismissed;
            }
        };

        let acks = {
            let _hold = self.host.keep_alive("delegate snooze");
            self.host
                .post_to_foreground(&ForegroundMessage::schedule_snooze(&request))
                .await
        };
        if acks > 0 {
            info!("Snooze until {} delegated to {} foreground instance(s)", request.fire_at, acks);
            return AgentOutcome::SnoozeDelegated {
                acks,
                fire_at: request.fire_at,
            };
        }

        // Best effort: this timer dies with the agent
        let fire_at = request.fire_at;
        let delay = request.delay_from(self.host.now());
        self.host.schedule(delay, AgentEvent::SnoozeElapsed(request));
        info!("No foreground instance reachable, snooze scheduled locally for {}", fire_at);
        AgentOutcome::SnoozeScheduled { fire_at }
    }

    async fn on_periodic_wake(&mut self) -> AgentOutcome {
        let cached = match self.host.cached_settings().await {
            Some(cached) => cached,
            None => return AgentOutcome::Idle,
        };
        let now = self.host.now();
        if !is_eligible(&cached.settings, now) {
            return AgentOutcome::Idle;
        }
        let today = local_date(&cached.settings, now);
        if today.is_some() && today == self.last_periodic_reminder {
            return AgentOutcome::Idle;
        }

        let payload = NotificationPayload::reminder(
            &cached.user_id,
            cached.settings.reminder_text.as_deref(),
            now,
        );
        let outcome = self.display(&payload, true).await;
        if let AgentOutcome::Displayed { .. } = outcome {
            self.last_periodic_reminder = today;
        }
        outcome
    }
}
