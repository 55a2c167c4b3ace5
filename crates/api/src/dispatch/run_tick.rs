use super::fan_out::{deliver, fan_out, RecipientOutcome};
use crate::error::ApiError;
use crate::shared::{
    auth::protect_cron_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;
use tally_reminders_api_structs::{dtos::DispatchResultDTO, run_tick::*};
use tally_reminders_domain::{
    is_eligible, local_date, DeliveryFailure, DispatchResult, NotificationPayload, Recipient,
    TransportError, ID,
};
use tally_reminders_infra::{IDeliveryLedgerRepo, ITransport, TallyContext};
use tracing::{debug, info, warn};

pub async fn run_tick_controller(
    http_req: HttpRequest,
    ctx: web::Data<TallyContext>,
    body: Option<web::Json<RequestBody>>,
) -> Result<HttpResponse, ApiError> {
    protect_cron_route(&http_req, &ctx)?;

    let now = match body.and_then(|b| b.now) {
        Some(millis) => Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            ApiError::BadClientData(format!("Invalid timestamp: {}", millis))
        })?,
        None => ctx.sys.now(),
    };

    let usecase = RunTickUseCase { now };
    execute(usecase, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                reminders: DispatchResultDTO::new(&summary.reminders),
                snoozes: DispatchResultDTO::new(&summary.snoozes),
            })
        })
        .map_err(|e| match e {
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

/// One dispatch tick: reminds every eligible recipient and delivers the
/// server side snoozes that are due.
#[derive(Debug)]
pub struct RunTickUseCase {
    pub now: DateTime<Utc>,
}

#[derive(Debug)]
pub struct TickSummary {
    pub reminders: DispatchResult,
    pub snoozes: DispatchResult,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunTickUseCase {
    type Response = TickSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "RunTick";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Errors> {
        let snapshot = ctx.repos.recipients.list_active().await.map_err(|e| {
            warn!("Unable to read the recipient registry: {:?}", e);
            UseCaseError::StorageError
        })?;
        let timeout = Duration::from_millis(ctx.config.transport_timeout_millis);

        let reminders = run_tick(
            &snapshot,
            self.now,
            ctx.transport.as_ref(),
            ctx.repos.delivery_ledger.as_ref(),
            timeout,
        )
        .await;
        let snoozes = deliver_due_snoozes(ctx, self.now, timeout).await;

        info!(
            "Tick at {}: {} recipients, reminders {}/{} delivered, snoozes {}/{} delivered",
            self.now,
            snapshot.len(),
            reminders.succeeded,
            reminders.attempted,
            snoozes.succeeded,
            snoozes.attempted
        );

        Ok(TickSummary { reminders, snoozes })
    }
}

async fn remind_recipient(
    recipient: &Recipient,
    now: DateTime<Utc>,
    transport: &dyn ITransport,
    ledger: &dyn IDeliveryLedgerRepo,
    timeout: Duration,
) -> RecipientOutcome {
    if !is_eligible(&recipient.settings, now) {
        return RecipientOutcome::Skipped;
    }
    let (subscription, today) = match (&recipient.subscription, local_date(&recipient.settings, now))
    {
        (Some(subscription), Some(today)) => (subscription, today),
        _ => return RecipientOutcome::Skipped,
    };
    if !ledger.try_claim(&recipient.user_id, today).await {
        debug!("{} is already reminded or being reminded on {}", recipient.user_id, today);
        return RecipientOutcome::Skipped;
    }

    let payload = NotificationPayload::reminder(
        &recipient.user_id,
        recipient.settings.reminder_text.as_deref(),
        now,
    );
    let res = deliver(transport, subscription, &payload, timeout).await;
    match &res {
        Ok(()) => {
            if let Err(e) = ledger.mark_delivered(&recipient.user_id, today).await {
                warn!("Unable to record delivery for {}: {:?}", recipient.user_id, e);
            }
        }
        Err(_) => ledger.release(&recipient.user_id, today).await,
    }
    RecipientOutcome::Attempted(res)
}

fn summarize(outcomes: Vec<(ID, RecipientOutcome)>) -> DispatchResult {
    let result = DispatchResult::from_outcomes(outcomes.into_iter().filter_map(
        |(user_id, outcome)| match outcome {
            RecipientOutcome::Skipped => None,
            RecipientOutcome::Attempted(res) => Some((user_id, res)),
        },
    ));
    for failure in &result.failures {
        warn!("Delivery to {} failed: {}", failure.user_id, failure.reason);
    }
    result
}

/// Evaluates every recipient of the registry snapshot at `now` and pushes a
/// reminder to each eligible one concurrently.
///
/// The snapshot is only read. Failed deliveries are recorded, not retried:
/// the next tick offers the recipient again while it is inside its window.
pub async fn run_tick(
    snapshot: &[Recipient],
    now: DateTime<Utc>,
    transport: &dyn ITransport,
    ledger: &dyn IDeliveryLedgerRepo,
    timeout: Duration,
) -> DispatchResult {
    let tasks = snapshot
        .iter()
        .map(|recipient| {
            (
                recipient.user_id.clone(),
                remind_recipient(recipient, now, transport, ledger, timeout),
            )
        })
        .collect();

    summarize(fan_out(tasks).await)
}

async fn deliver_due_snoozes(ctx: &TallyContext, now: DateTime<Utc>, timeout: Duration) -> DispatchResult {
    let due = ctx
        .repos
        .scheduled_snoozes
        .delete_all_before(now.timestamp_millis())
        .await;

    let mut deliveries = Vec::with_capacity(due.len());
    for snooze in due {
        match ctx.repos.recipients.find(&snooze.user_id).await {
            Some(Recipient {
                subscription: Some(subscription),
                ..
            }) => deliveries.push((snooze, subscription)),
            _ => warn!(
                "Dropping snooze {} for {}: no subscription",
                snooze.id, snooze.user_id
            ),
        }
    }

    let transport = ctx.transport.as_ref();
    let tasks = deliveries
        .iter()
        .map(|(snooze, subscription)| {
            let payload = NotificationPayload::snoozed(snooze.user_id.as_str(), &snooze.message, now);
            (snooze.user_id.clone(), async move {
                RecipientOutcome::Attempted(deliver(transport, subscription, &payload, timeout).await)
            })
        })
        .collect();
    let outcomes = fan_out(tasks).await;

    // Taking the due snoozes out claims them for this tick. Put back the
    // ones that failed so the next tick retries them.
    for ((snooze, _), (_, outcome)) in deliveries.iter().zip(outcomes.iter()) {
        match outcome {
            RecipientOutcome::Attempted(Err(DeliveryFailure::Transport(TransportError::Expired))) => {
                warn!("Dropping snooze {} for {}: subscription expired", snooze.id, snooze.user_id)
            }
            RecipientOutcome::Attempted(Err(_)) => {
                if let Err(e) = ctx.repos.scheduled_snoozes.insert(snooze).await {
                    warn!("Unable to reschedule snooze {}: {:?}", snooze.id, e);
                }
            }
            _ => (),
        }
    }

    summarize(outcomes)
}
