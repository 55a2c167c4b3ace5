use crate::{settings::ReminderSettings, shared::entity::ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// A push subscription. Opaque to the dispatch core, it is only handed
/// over to the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

impl Subscription {
    /// Whether the endpoint is an absolute http(s) URL and both keys are present
    pub fn is_valid(&self) -> bool {
        let scheme_ok = match url::Url::parse(&self.endpoint) {
            Ok(url) => url.scheme() == "https" || url.scheme() == "http",
            Err(_) => false,
        };
        scheme_ok && !self.keys.p256dh.is_empty() && !self.keys.auth.is_empty()
    }
}

/// One registry entry: a user with (optionally) a subscription and their
/// reminder settings. A user has at most one subscription, registering a new
/// one replaces the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub user_id: ID,
    pub subscription: Option<Subscription>,
    pub settings: ReminderSettings,
}

impl Recipient {
    pub fn new(user_id: ID, subscription: Subscription, settings: ReminderSettings) -> Self {
        Self {
            user_id,
            subscription: Some(subscription),
            settings,
        }
    }

    /// Has somewhere to deliver to and wants reminders
    pub fn is_active(&self) -> bool {
        self.subscription.is_some() && self.settings.enabled
    }
}
