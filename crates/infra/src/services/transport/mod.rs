mod http;

pub use http::HttpPushTransport;
use tally_reminders_domain::{Subscription, TransportError};

/// Delivers an already serialized payload to one push subscription.
///
/// Encryption and request signing happen behind this interface, callers
/// only see success or a typed failure.
#[async_trait::async_trait]
pub trait ITransport: Send + Sync {
    async fn send(&self, subscription: &Subscription, payload: &[u8]) -> Result<(), TransportError>;
}
