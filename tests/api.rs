mod helpers;

use chrono::TimeZone;
use chrono_tz::Asia::Kolkata;
use helpers::setup::spawn_app;
use tally_reminders_api_structs::dtos::DispatchFailureDTO;
use tally_reminders_sdk::{
    APIErrorVariant, ScheduleSnoozeInput, Subscription, SubscriptionKeys, TallySDK,
    UpdateReminderSettingsInput, ID,
};

fn subscription(user: &str) -> Subscription {
    Subscription {
        endpoint: format!("https://push.example.com/{}", user),
        keys: SubscriptionKeys {
            p256dh: "p256dh".into(),
            auth: "auth".into(),
        },
    }
}

fn daily_at_nine(user_id: &ID) -> UpdateReminderSettingsInput {
    UpdateReminderSettingsInput {
        user_id: user_id.clone(),
        enabled: true,
        time: "09:00".into(),
        frequency: "daily".into(),
        custom_days: None,
        reminder_text: None,
        timezone: Some("Asia/Kolkata".into()),
    }
}

fn kolkata_millis(hour: u32, minute: u32) -> i64 {
    Kolkata
        .with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .unwrap()
        .timestamp_millis()
}

async fn subscribe(sdk: &TallySDK, user: &str) -> ID {
    let user_id: ID = user.parse().unwrap();
    sdk.subscription
        .register(user_id.clone(), &subscription(user))
        .await
        .expect("Expected to register subscription");
    sdk.settings
        .update(daily_at_nine(&user_id))
        .await
        .expect("Expected to update settings");
    user_id
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_subscription_lifecycle() {
    let (_, sdk, _) = spawn_app().await;
    let user_id = subscribe(&sdk, "user1").await;

    let res = sdk.settings.get(user_id.clone()).await.unwrap();
    assert_eq!(res.user_id, user_id);
    assert!(res.settings.enabled);
    assert_eq!(res.settings.time.as_deref(), Some("09:00"));
    assert_eq!(res.settings.timezone, "Asia/Kolkata");

    assert!(sdk.subscription.delete(user_id.clone()).await.unwrap().success);
    let err = sdk.subscription.delete(user_id).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::NotFound);

    let err = sdk
        .settings
        .get("unknown".parse().unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::NotFound);
}

#[actix_web::main]
#[test]
async fn test_rejects_invalid_input() {
    let (_, sdk, _) = spawn_app().await;
    let user_id: ID = "user1".parse().unwrap();

    let mut empty_endpoint = subscription("user1");
    empty_endpoint.endpoint = String::new();
    let err = sdk
        .subscription
        .register(user_id.clone(), &empty_endpoint)
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);

    let mut invalid_time = daily_at_nine(&user_id);
    invalid_time.time = "24:30".into();
    let err = sdk.settings.update(invalid_time).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);

    let mut invalid_day = daily_at_nine(&user_id);
    invalid_day.frequency = "custom".into();
    invalid_day.custom_days = Some(vec![9]);
    let err = sdk.settings.update(invalid_day).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
}

#[actix_web::main]
#[test]
async fn test_unsupported_method_is_rejected() {
    let (_, _, address) = spawn_app().await;
    let res = reqwest::Client::new()
        .get(&format!("{}/subscription", address))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::main]
#[test]
async fn test_tick_requires_cron_secret() {
    let (app, sdk, address) = spawn_app().await;
    let err = sdk.dispatch.run_tick(None).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::Unauthorized);

    let cron = TallySDK::with_cron_secret(address.clone(), "wrong");
    let err = cron.dispatch.run_tick(None).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::Unauthorized);

    let cron = TallySDK::with_cron_secret(address, app.config.cron_secret.clone());
    let res = cron.dispatch.run_tick(None).await.unwrap();
    assert_eq!(res.reminders.attempted, 0);
}

#[actix_web::main]
#[test]
async fn test_tick_isolates_failures_and_dedups_per_day() {
    let (app, sdk, address) = spawn_app().await;
    let cron = TallySDK::with_cron_secret(address, app.config.cron_secret.clone());
    let user1 = subscribe(&sdk, "user1").await;
    let user2 = subscribe(&sdk, "user2").await;
    app.transport.fail_for(&subscription("user1").endpoint);

    let res = cron
        .dispatch
        .run_tick(Some(kolkata_millis(9, 2)))
        .await
        .unwrap();
    assert_eq!(res.reminders.attempted, 2);
    assert_eq!(res.reminders.succeeded, 1);
    assert_eq!(res.reminders.failed, 1);
    assert_eq!(
        res.reminders.failures,
        vec![DispatchFailureDTO {
            user_id: user1.clone(),
            reason: "NetworkError".into(),
        }]
    );
    let sent = app.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1.data.user_id, user2.as_string());

    // user2 was reminded today already, user1 is offered again
    let res = cron
        .dispatch
        .run_tick(Some(kolkata_millis(9, 4)))
        .await
        .unwrap();
    assert_eq!(res.reminders.attempted, 1);
    assert_eq!(res.reminders.failures[0].user_id, user1);

    // Outside the window nobody is due
    let res = cron
        .dispatch
        .run_tick(Some(kolkata_millis(9, 10)))
        .await
        .unwrap();
    assert_eq!(res.reminders.attempted, 0);
}

#[actix_web::main]
#[test]
async fn test_server_side_snooze_is_delivered_when_due() {
    let (app, sdk, address) = spawn_app().await;
    let cron = TallySDK::with_cron_secret(address, app.config.cron_secret.clone());
    let user_id = subscribe(&sdk, "user1").await;

    let snooze = sdk
        .snooze
        .schedule(ScheduleSnoozeInput {
            user_id: user_id.clone(),
            snooze_minutes: Some(1),
            message: Some("Remember the groceries".into()),
        })
        .await
        .unwrap()
        .snooze;
    assert_eq!(snooze.user_id, user_id);

    let res = cron
        .dispatch
        .run_tick(Some(snooze.fire_at - 1))
        .await
        .unwrap();
    assert_eq!(res.snoozes.attempted, 0);

    let res = cron.dispatch.run_tick(Some(snooze.fire_at)).await.unwrap();
    assert_eq!(res.snoozes.succeeded, 1);
    let (_, payload) = app
        .transport
        .sent()
        .into_iter()
        .find(|(_, p)| p.tag == "transaction-reminder-snoozed")
        .expect("Expected the snoozed reminder to be sent");
    assert_eq!(payload.body, "Remember the groceries");

    let res = cron.dispatch.run_tick(Some(snooze.fire_at)).await.unwrap();
    assert_eq!(res.snoozes.attempted, 0);
}

#[actix_web::main]
#[test]
async fn test_oversized_snooze_is_rejected() {
    let (_, sdk, _) = spawn_app().await;
    let user_id = subscribe(&sdk, "user1").await;

    let err = sdk
        .snooze
        .schedule(ScheduleSnoozeInput {
            user_id,
            snooze_minutes: Some(i64::MAX / 1000),
            message: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
}
