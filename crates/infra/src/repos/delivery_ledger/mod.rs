mod inmemory;

use chrono::NaiveDate;
pub use inmemory::InMemoryDeliveryLedgerRepo;
use tally_reminders_domain::ID;

/// Remembers the local calendar date of the last successful reminder per
/// user. A tick claims the date before sending, so overlapping ticks inside
/// one window deliver at most once.
#[async_trait::async_trait]
pub trait IDeliveryLedgerRepo: Send + Sync {
    async fn last_delivered(&self, user_id: &ID) -> Option<NaiveDate>;
    /// Atomically reserves `local_date` for `user_id`. Returns false when the
    /// date is already delivered or claimed by another tick.
    async fn try_claim(&self, user_id: &ID, local_date: NaiveDate) -> bool;
    /// Gives up a claim after a failed send so a later tick may retry
    async fn release(&self, user_id: &ID, local_date: NaiveDate);
    async fn mark_delivered(&self, user_id: &ID, local_date: NaiveDate) -> anyhow::Result<()>;
}
