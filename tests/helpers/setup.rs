use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};
use tally_reminders_api::Application;
use tally_reminders_domain::{NotificationPayload, Subscription, TransportError};
use tally_reminders_infra::{setup_context, Config, ITransport};
use tally_reminders_sdk::TallySDK;

/// Transport double. Fails with `NetworkError` for the configured
/// endpoints and records everything else.
#[derive(Default)]
pub struct RecordingTransport {
    pub failing_endpoints: Mutex<HashSet<String>>,
    pub sent: Mutex<Vec<(String, NotificationPayload)>>,
}

impl RecordingTransport {
    pub fn fail_for(&self, endpoint: &str) {
        self.failing_endpoints
            .lock()
            .unwrap()
            .insert(endpoint.to_string());
    }

    pub fn sent(&self) -> Vec<(String, NotificationPayload)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ITransport for RecordingTransport {
    async fn send(&self, subscription: &Subscription, payload: &[u8]) -> Result<(), TransportError> {
        if self
            .failing_endpoints
            .lock()
            .unwrap()
            .contains(&subscription.endpoint)
        {
            return Err(TransportError::NetworkError);
        }
        let payload = serde_json::from_slice(payload).unwrap();
        self.sent
            .lock()
            .unwrap()
            .push((subscription.endpoint.clone(), payload));
        Ok(())
    }
}

pub struct TestApp {
    pub config: Config,
    pub transport: Arc<RecordingTransport>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TallySDK, String) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    ctx.config.job_schedulers_enabled = false;
    let transport = Arc::new(RecordingTransport::default());
    ctx.transport = transport.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, transport };
    let sdk = TallySDK::new(address.clone());
    (app, sdk, address)
}
