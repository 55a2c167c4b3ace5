use super::IDeliveryLedgerRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use tally_reminders_domain::ID;

#[derive(Clone)]
struct LedgerEntry {
    user_id: ID,
    delivered: Option<NaiveDate>,
    claimed: Option<NaiveDate>,
}

pub struct InMemoryDeliveryLedgerRepo {
    entries: std::sync::Mutex<Vec<LedgerEntry>>,
}

impl InMemoryDeliveryLedgerRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryLedgerRepo for InMemoryDeliveryLedgerRepo {
    async fn last_delivered(&self, user_id: &ID) -> Option<NaiveDate> {
        find_one_by(&self.entries, |e| e.user_id == *user_id).and_then(|e| e.delivered)
    }

    async fn try_claim(&self, user_id: &ID, local_date: NaiveDate) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|e| e.user_id == *user_id) {
            Some(entry) => {
                if entry.delivered == Some(local_date) || entry.claimed == Some(local_date) {
                    return false;
                }
                entry.claimed = Some(local_date);
            }
            None => entries.push(LedgerEntry {
                user_id: user_id.clone(),
                delivered: None,
                claimed: Some(local_date),
            }),
        }
        true
    }

    async fn release(&self, user_id: &ID, local_date: NaiveDate) {
        update_by(
            &self.entries,
            |e| e.user_id == *user_id && e.claimed == Some(local_date),
            |e| e.claimed = None,
        );
    }

    async fn mark_delivered(&self, user_id: &ID, local_date: NaiveDate) -> anyhow::Result<()> {
        let entry = LedgerEntry {
            user_id: user_id.clone(),
            delivered: Some(local_date),
            claimed: None,
        };
        upsert_by(&entry, &self.entries, |e| e.user_id == *user_id);
        Ok(())
    }
}
