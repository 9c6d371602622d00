//! Generation tokens that keep superseded responses out of view state.
//!
//! Every controller owns one [`StaleGuard`]. When its trigger parameter
//! changes it calls [`StaleGuard::advance`]; before dispatching a fetch it
//! captures [`StaleGuard::begin_request`]; and it writes the result through
//! [`StaleGuard::commit`], which drops the value if the generation has moved
//! on in the meantime. The network call itself is never aborted.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Identifies one trigger cycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct StaleGuard {
    current: AtomicU64,
}

impl StaleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every previously issued generation and returns the new one.
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The generation to tag an outgoing request with.
    pub fn begin_request(&self) -> Generation {
        Generation(self.current.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.load(Ordering::SeqCst) == generation.0
    }

    /// Stores `value` in `slot` if `generation` is still current.
    ///
    /// The check runs under the slot's write lock, so a commit either lands
    /// before a concurrent trigger's `Loading` or not at all.
    pub fn commit<T>(&self, generation: Generation, slot: &watch::Sender<T>, value: T) -> bool {
        let committed = slot.send_if_modified(|state| {
            if self.is_current(generation) {
                *state = value;
                true
            } else {
                false
            }
        });
        if !committed {
            tracing::debug!(
                %generation,
                current = %self.begin_request(),
                "discarding stale response"
            );
        }
        committed
    }
}
