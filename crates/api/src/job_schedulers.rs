use crate::{
    dispatch::{RunTickUseCase, TickSummary},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use std::time::Duration;
use tally_reminders_infra::TallyContext;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs a dispatch tick every `tick_interval_secs`, starting on the next
/// minute boundary
pub fn start_send_reminders_job(ctx: TallyContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut tick_interval = interval(Duration::from_secs(ctx.config.tick_interval_secs));
        loop {
            tick_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(async move { send_reminders(&context).await });
        }
    });
}

async fn send_reminders(ctx: &TallyContext) {
    let usecase = RunTickUseCase { now: ctx.sys.now() };
    let summary = match execute(usecase, ctx).await {
        Ok(summary) => summary,
        Err(_) => return,
    };

    if ctx.config.prune_expired_subscriptions {
        prune_expired_subscriptions(ctx, &summary).await;
    }
}

/// Drops the subscriptions the push service reported as gone during a tick
pub async fn prune_expired_subscriptions(ctx: &TallyContext, summary: &TickSummary) -> usize {
    let mut pruned = 0;
    let expired = summary
        .reminders
        .expired_user_ids()
        .into_iter()
        .chain(summary.snoozes.expired_user_ids());
    for user_id in expired {
        if ctx.repos.recipients.remove_subscription(&user_id).await.is_some() {
            info!("Removed expired push subscription of user: {}", user_id);
            pruned += 1;
        }
    }
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_reminders_domain::{
        DeliveryFailure, DispatchFailure, DispatchResult, Subscription, SubscriptionKeys,
        TransportError, ID,
    };

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(45 * 1000, 0), 15);
        assert_eq!(get_start_delay(45 * 1000, 15), 60);
        assert_eq!(get_start_delay(45 * 1000, 20), 55);
        assert_eq!(get_start_delay(120 * 1000, 0), 60);
        assert_eq!(get_start_delay(120 * 1000, 30), 30);
        assert_eq!(get_start_delay(59 * 1000 + 999, 0), 1);
    }

    fn failure(user_id: &ID, reason: DeliveryFailure) -> DispatchFailure {
        DispatchFailure {
            user_id: user_id.clone(),
            reason,
        }
    }

    #[actix_web::test]
    async fn prunes_only_expired_subscriptions() {
        let ctx = TallyContext::create_inmemory();
        let expired: ID = "expired".parse().unwrap();
        let flaky: ID = "flaky".parse().unwrap();
        for user_id in &[&expired, &flaky] {
            let subscription = Subscription {
                endpoint: format!("https://push.example.com/{}", user_id),
                keys: SubscriptionKeys {
                    p256dh: "p256dh".into(),
                    auth: "auth".into(),
                },
            };
            ctx.repos
                .recipients
                .save_subscription(user_id, &subscription)
                .await
                .unwrap();
        }

        let summary = TickSummary {
            reminders: DispatchResult {
                attempted: 2,
                succeeded: 0,
                failed: 2,
                failures: vec![
                    failure(&expired, TransportError::Expired.into()),
                    failure(&flaky, TransportError::NetworkError.into()),
                ],
            },
            snoozes: DispatchResult::default(),
        };

        assert_eq!(prune_expired_subscriptions(&ctx, &summary).await, 1);
        let recipients = &ctx.repos.recipients;
        assert!(recipients.find(&expired).await.unwrap().subscription.is_none());
        assert!(recipients.find(&flaky).await.unwrap().subscription.is_some());
    }
}
