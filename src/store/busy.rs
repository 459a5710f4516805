//! Reference-counted busy flag.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts in-flight operations. Clones share the same count.
#[derive(Debug, Clone, Default)]
pub struct BusyCounter {
    in_flight: Arc<AtomicUsize>,
}

impl BusyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one operation as started until the returned guard is dropped.
    pub fn enter(&self) -> BusyGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the counter on drop, on every exit path.
#[derive(Debug)]
pub struct BusyGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
