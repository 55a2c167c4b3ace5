use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tracing::trace;

/// Counts the outstanding holds on a background agent. The host must not
/// terminate the agent while `active()` is above zero.
#[derive(Debug, Clone, Default)]
pub struct KeepAliveTracker {
    active: Arc<AtomicUsize>,
}

impl KeepAliveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&self, reason: &'static str) -> KeepAlive {
        self.active.fetch_add(1, Ordering::SeqCst);
        trace!("Acquired keep-alive: {}", reason);
        KeepAlive {
            active: self.active.clone(),
            reason,
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Scoped hold, released when dropped. Dropping happens on every exit path
/// of the guarded operation, failures and panics included.
#[derive(Debug)]
#[must_use = "the hold is released as soon as the guard is dropped"]
pub struct KeepAlive {
    active: Arc<AtomicUsize>,
    reason: &'static str,
}

impl KeepAlive {
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        trace!("Released keep-alive: {}", self.reason);
    }
}
