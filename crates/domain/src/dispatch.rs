use crate::shared::entity::ID;
use thiserror::Error;

/// Why the transport could not deliver a payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The subscription is gone (404 / 410 from the push service)
    #[error("Expired")]
    Expired,
    #[error("NetworkError")]
    NetworkError,
    #[error("PayloadTooLarge")]
    PayloadTooLarge,
    #[error("RateLimited")]
    RateLimited,
    #[error("Unknown")]
    Unknown(String),
}

/// Why one recipient did not get its reminder during a tick
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("TimedOut")]
    TimedOut,
    /// A bug surfaced while handling this recipient only
    #[error("Internal: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchFailure {
    pub user_id: ID,
    pub reason: DeliveryFailure,
}

/// Summary of one dispatch tick. Built once from the collected outcomes,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchResult {
    /// Reduces per recipient outcomes collected after the fan-out has joined
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (ID, Result<(), DeliveryFailure>)>,
    {
        let mut attempted = 0;
        let mut succeeded = 0;
        let mut failures = Vec::new();
        for (user_id, outcome) in outcomes {
            attempted += 1;
            match outcome {
                Ok(()) => succeeded += 1,
                Err(reason) => failures.push(DispatchFailure { user_id, reason }),
            }
        }
        Self {
            attempted,
            succeeded,
            failed: failures.len(),
            failures,
        }
    }

    /// Users whose subscription the transport reported as expired
    pub fn expired_user_ids(&self) -> Vec<ID> {
        self.failures
            .iter()
            .filter(|f| f.reason == DeliveryFailure::Transport(TransportError::Expired))
            .map(|f| f.user_id.clone())
            .collect()
    }
}
