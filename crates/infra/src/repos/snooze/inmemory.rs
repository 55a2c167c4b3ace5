use super::IScheduledSnoozeRepo;
use crate::repos::shared::inmemory_repo::*;
use tally_reminders_domain::{ScheduledSnooze, ID};

pub struct InMemoryScheduledSnoozeRepo {
    snoozes: std::sync::Mutex<Vec<ScheduledSnooze>>,
}

impl InMemoryScheduledSnoozeRepo {
    pub fn new() -> Self {
        Self {
            snoozes: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledSnoozeRepo for InMemoryScheduledSnoozeRepo {
    async fn insert(&self, snooze: &ScheduledSnooze) -> anyhow::Result<()> {
        insert(snooze, &self.snoozes);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<ScheduledSnooze> {
        find_by(&self.snoozes, |s| s.user_id == *user_id)
    }

    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledSnooze> {
        find_and_delete_by(&self.snoozes, |s| s.fire_at <= before)
    }
}
