use super::ITransport;
use crate::Config;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tally_reminders_domain::{Subscription, TransportError, MAX_PAYLOAD_BYTES};
use tracing::debug;

/// Posts plaintext payloads to the subscription endpoint.
///
/// This does not implement Web Push message encryption or VAPID signing, so a
/// standard browser push service rejects these requests. The endpoints must
/// belong to a push gateway that encrypts the payload with the forwarded
/// subscription keys (`Crypto-Key` and `X-Push-Auth`) before delivery.
pub struct HttpPushTransport {
    client: Client,
    ttl_secs: u64,
    gateway_key: Option<String>,
}

impl HttpPushTransport {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.transport_timeout_millis))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            ttl_secs: config.push_ttl_secs,
            gateway_key: config.push_gateway_key.clone(),
        }
    }
}

pub(crate) fn classify_status(status: StatusCode) -> Result<(), TransportError> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => Err(TransportError::Expired),
        StatusCode::PAYLOAD_TOO_LARGE => Err(TransportError::PayloadTooLarge),
        StatusCode::TOO_MANY_REQUESTS => Err(TransportError::RateLimited),
        other => Err(TransportError::Unknown(format!("Unexpected status: {}", other))),
    }
}

#[async_trait::async_trait]
impl ITransport for HttpPushTransport {
    async fn send(&self, subscription: &Subscription, payload: &[u8]) -> Result<(), TransportError> {
        if payload.len() > MAX_PAYLOAD_BYTES {
            return Err(TransportError::PayloadTooLarge);
        }

        let mut req = self
            .client
            .post(&subscription.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header("TTL", self.ttl_secs.to_string())
            .header("Urgency", "normal")
            .header("Crypto-Key", format!("p256dh={}", subscription.keys.p256dh))
            .header("X-Push-Auth", subscription.keys.auth.as_str())
            .body(payload.to_vec());
        if let Some(key) = &self.gateway_key {
            req = req.bearer_auth(key);
        }

        let res = req.send().await.map_err(|e| {
            debug!("Push request to {} failed: {:?}", subscription.endpoint, e);
            if e.is_builder() {
                TransportError::Unknown(e.to_string())
            } else {
                TransportError::NetworkError
            }
        })?;

        classify_status(res.status())
    }
}
