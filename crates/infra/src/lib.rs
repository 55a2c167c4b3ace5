mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MAX_TICK_INTERVAL_SECS};
pub use repos::{IDeliveryLedgerRepo, IRecipientRepo, IScheduledSnoozeRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticSys};

#[derive(Clone)]
pub struct TallyContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub transport: Arc<dyn ITransport>,
}

impl TallyContext {
    /// Context backed by in-memory repositories. The registry is an external
    /// store in production, this is what the binary and the tests run with.
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let transport = Arc::new(HttpPushTransport::new(&config));
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            transport,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> TallyContext {
    TallyContext::create_inmemory()
}
