use futures::{future::join_all, FutureExt};
use std::{any::Any, future::Future, panic::AssertUnwindSafe, time::Duration};
use tally_reminders_domain::{DeliveryFailure, NotificationPayload, Subscription, ID};
use tally_reminders_infra::ITransport;

/// The outcome of handling one recipient during a tick
#[derive(Debug, PartialEq)]
pub enum RecipientOutcome {
    /// Not due, or already reminded today. Not counted as attempted.
    Skipped,
    Attempted(Result<(), DeliveryFailure>),
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panicked".into()
    }
}

/// Serializes `payload` and hands it to the transport, bounded by `timeout`
pub async fn deliver(
    transport: &dyn ITransport,
    subscription: &Subscription,
    payload: &NotificationPayload,
    timeout: Duration,
) -> Result<(), DeliveryFailure> {
    let bytes = payload
        .to_bytes()
        .map_err(|e| DeliveryFailure::Internal(format!("Unable to encode payload: {}", e)))?;
    match tokio::time::timeout(timeout, transport.send(subscription, &bytes)).await {
        Ok(res) => res.map_err(DeliveryFailure::from),
        Err(_) => Err(DeliveryFailure::TimedOut),
    }
}

/// Runs one future per recipient concurrently and collects every outcome
/// once all of them have completed.
///
/// Each future writes only to its own slot. A panic inside one of them is
/// caught and recorded as `DeliveryFailure::Internal` for that recipient.
pub async fn fan_out<F>(tasks: Vec<(ID, F)>) -> Vec<(ID, RecipientOutcome)>
where
    F: Future<Output = RecipientOutcome>,
{
    let futures = tasks.into_iter().map(|(user_id, task)| async move {
        let outcome = match AssertUnwindSafe(task).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => RecipientOutcome::Attempted(Err(DeliveryFailure::Internal(
                panic_message(panic),
            ))),
        };
        (user_id, outcome)
    });
    join_all(futures).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_reminders_domain::TransportError;

    async fn explode() -> RecipientOutcome {
        panic!("settings were null")
    }

    #[actix_web::test]
    async fn it_isolates_panics() {
        let tasks: Vec<(ID, std::pin::Pin<Box<dyn Future<Output = RecipientOutcome>>>)> = vec![
            (
                "ok".parse().unwrap(),
                Box::pin(async { RecipientOutcome::Attempted(Ok(())) }),
            ),
            (
                "boom".parse().unwrap(),
                Box::pin(explode()),
            ),
            (
                "failed".parse().unwrap(),
                Box::pin(async {
                    RecipientOutcome::Attempted(Err(TransportError::RateLimited.into()))
                }),
            ),
            ("skip".parse().unwrap(), Box::pin(async { RecipientOutcome::Skipped })),
        ];

        let outcomes = fan_out(tasks).await;
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].1, RecipientOutcome::Attempted(Ok(())));
        assert_eq!(
            outcomes[1].1,
            RecipientOutcome::Attempted(Err(DeliveryFailure::Internal(
                "settings were null".into()
            )))
        );
        assert_eq!(
            outcomes[2].1,
            RecipientOutcome::Attempted(Err(TransportError::RateLimited.into()))
        );
        assert_eq!(outcomes[3].1, RecipientOutcome::Skipped);
    }
}
