use super::IRecipientRepo;
use crate::repos::shared::inmemory_repo::*;
use tally_reminders_domain::{Recipient, ReminderSettings, Subscription, ID};

pub struct InMemoryRecipientRepo {
    recipients: std::sync::Mutex<Vec<Recipient>>,
}

impl InMemoryRecipientRepo {
    pub fn new() -> Self {
        Self {
            recipients: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn upsert<U: FnOnce(&mut Recipient)>(&self, user_id: &ID, update: U) {
        let mut recipients = self.recipients.lock().unwrap();
        match recipients.iter_mut().find(|r| r.user_id == *user_id) {
            Some(recipient) => update(recipient),
            None => {
                let mut recipient = Recipient {
                    user_id: user_id.clone(),
                    subscription: None,
                    settings: Default::default(),
                };
                update(&mut recipient);
                recipients.push(recipient);
            }
        }
    }
}

#[async_trait::async_trait]
impl IRecipientRepo for InMemoryRecipientRepo {
    async fn save_subscription(
        &self,
        user_id: &ID,
        subscription: &Subscription,
    ) -> anyhow::Result<()> {
        self.upsert(user_id, |r| r.subscription = Some(subscription.clone()));
        Ok(())
    }

    async fn save_settings(&self, user_id: &ID, settings: &ReminderSettings) -> anyhow::Result<()> {
        self.upsert(user_id, |r| r.settings = settings.clone());
        Ok(())
    }

    async fn remove_subscription(&self, user_id: &ID) -> Option<Subscription> {
        let mut removed = None;
        update_by(
            &self.recipients,
            |r| r.user_id == *user_id,
            |r| removed = r.subscription.take(),
        );
        removed
    }

    async fn find(&self, user_id: &ID) -> Option<Recipient> {
        find_one_by(&self.recipients, |r| r.user_id == *user_id)
    }

    async fn list_active(&self) -> anyhow::Result<Vec<Recipient>> {
        Ok(find_by(&self.recipients, |r| r.is_active()))
    }
}
