//! Shared utilities for use cases.

use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};

/// Single-slot in-flight token.
///
/// A second request while one is running is refused immediately instead of
/// queueing. Clones share the same slot.
#[derive(Debug, Clone)]
pub struct InFlightGuard {
    slot: Arc<Semaphore>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Take the slot, or `None` if a request is already in flight.
    /// The slot frees when the permit drops.
    pub fn try_enter(&self) -> Option<SemaphorePermit<'_>> {
        self.slot.try_acquire().ok()
    }

    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}
