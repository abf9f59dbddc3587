//! Load generations: suppress results from superseded loads.
//!
//! Each screen owns one [`LoadGeneration`]. Every load calls
//! [`LoadGeneration::begin`] and commits its result only while its
//! [`LoadTicket`] is still current. Starting another load, or calling
//! [`LoadGeneration::invalidate`] on unmount, retires every earlier ticket.
//! In-flight requests are not cancelled; their results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct LoadGeneration {
    latest: Arc<AtomicU64>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding all earlier ones.
    pub fn begin(&self) -> LoadTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            latest: Arc::clone(&self.latest),
            seq,
        }
    }

    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Debug)]
pub struct LoadTicket {
    latest: Arc<AtomicU64>,
    seq: u64,
}

impl LoadTicket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let generation = LoadGeneration::new();
        let a = generation.begin();
        assert!(a.is_current());

        let b = generation.begin();
        assert!(!a.is_current());
        assert!(b.is_current());

        generation.invalidate();
        assert!(!b.is_current());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generation = LoadGeneration::new();
        let ticket = generation.begin();
        generation.clone().begin();
        assert!(!ticket.is_current());
    }
}
