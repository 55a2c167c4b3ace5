mod delivery_ledger;
mod recipient;
mod shared;
mod snooze;

pub use delivery_ledger::{IDeliveryLedgerRepo, InMemoryDeliveryLedgerRepo};
pub use recipient::{IRecipientRepo, InMemoryRecipientRepo};
pub use snooze::{IScheduledSnoozeRepo, InMemoryScheduledSnoozeRepo};
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub recipients: Arc<dyn IRecipientRepo>,
    pub delivery_ledger: Arc<dyn IDeliveryLedgerRepo>,
    pub scheduled_snoozes: Arc<dyn IScheduledSnoozeRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            recipients: Arc::new(InMemoryRecipientRepo::new()),
            delivery_ledger: Arc::new(InMemoryDeliveryLedgerRepo::new()),
            scheduled_snoozes: Arc::new(InMemoryScheduledSnoozeRepo::new()),
        }
    }
}
