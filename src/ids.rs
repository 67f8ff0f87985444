//! Time-based entity id generation behind an injectable trait.
//!
//! Stores receive their generator at construction so tests can pin
//! ids deterministically with [`SequenceIds`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Produces process-unique string ids for new entities.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Millisecond-clock ids, matching the original front desk's scheme.
///
/// A monotonic counter breaks ties when two ids are requested within
/// the same millisecond.
#[derive(Default)]
pub struct ClockIds {
    last: AtomicU64,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for ClockIds {
    fn next_id(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        // Never emit a value <= the previous one, even within one millisecond.
        let id = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev + 1))
            })
            .map(|prev| now.max(prev + 1))
            .unwrap_or(now);
        id.to_string()
    }
}

/// Deterministic sequential ids for tests: "1", "2", "3", ...
#[derive(Default)]
pub struct SequenceIds {
    next: AtomicU64,
}

impl SequenceIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&self) -> String {
        (self.next.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}
