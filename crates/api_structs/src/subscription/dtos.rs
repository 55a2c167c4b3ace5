use serde::{Deserialize, Serialize};
use tally_reminders_domain::{Subscription, SubscriptionKeys};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SubscriptionKeysDTO {
    #[serde(default)]
    pub p256dh: String,
    #[serde(default)]
    pub auth: String,
}

/// Same shape as a browser `PushSubscription` serialized to JSON
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDTO {
    #[serde(default)]
    pub endpoint: String,
    pub keys: SubscriptionKeysDTO,
}

impl SubscriptionDTO {
    pub fn new(subscription: &Subscription) -> Self {
        Self {
            endpoint: subscription.endpoint.clone(),
            keys: SubscriptionKeysDTO {
                p256dh: subscription.keys.p256dh.clone(),
                auth: subscription.keys.auth.clone(),
            },
        }
    }

    pub fn into_domain(self) -> Subscription {
        Subscription {
            endpoint: self.endpoint,
            keys: SubscriptionKeys {
                p256dh: self.keys.p256dh,
                auth: self.keys.auth,
            },
        }
    }
}
