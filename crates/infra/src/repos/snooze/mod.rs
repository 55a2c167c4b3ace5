mod inmemory;

pub use inmemory::InMemoryScheduledSnoozeRepo;
use tally_reminders_domain::{ScheduledSnooze, ID};

#[async_trait::async_trait]
pub trait IScheduledSnoozeRepo: Send + Sync {
    async fn insert(&self, snooze: &ScheduledSnooze) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<ScheduledSnooze>;
    /// Removes and returns every snooze due at or before `before` (epoch millis)
    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledSnooze>;
}
