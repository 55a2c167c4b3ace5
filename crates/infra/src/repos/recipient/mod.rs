mod inmemory;

pub use inmemory::InMemoryRecipientRepo;
use tally_reminders_domain::{Recipient, ReminderSettings, Subscription, ID};

/// Read/write access to the recipient registry. The dispatch core only ever
/// calls `list_active`, the write methods back the CRUD endpoints.
#[async_trait::async_trait]
pub trait IRecipientRepo: Send + Sync {
    /// Last write wins: a new subscription for the same user replaces the old one
    async fn save_subscription(&self, user_id: &ID, subscription: &Subscription)
        -> anyhow::Result<()>;
    async fn save_settings(&self, user_id: &ID, settings: &ReminderSettings) -> anyhow::Result<()>;
    async fn remove_subscription(&self, user_id: &ID) -> Option<Subscription>;
    async fn find(&self, user_id: &ID) -> Option<Recipient>;
    /// Snapshot of every recipient that has a subscription and enabled settings
    async fn list_active(&self) -> anyhow::Result<Vec<Recipient>>;
}
