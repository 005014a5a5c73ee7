//! Best-score tracking
//!
//! A single scalar that outlives rounds: read once at startup, written
//! whenever the current score exceeds it. The backing store is injected so
//! the logic tests without a browser.

use crate::platform::ScalarStore;

/// Storage key for the persisted best score
pub const BEST_SCORE_KEY: &str = "school_rush_best_score";

/// The persistent best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Read the persisted value, defaulting to 0 when absent
    pub fn load(store: &dyn ScalarStore) -> Self {
        let value = store.get(BEST_SCORE_KEY).unwrap_or(0);
        if value > 0 {
            log::info!("Loaded best score: {value}");
        }
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Offer a score; persists and returns true only when it beats the
    /// current best
    pub fn offer(&mut self, score: u64, store: &mut dyn ScalarStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        store.set(BEST_SCORE_KEY, score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryStore, ScalarStore};

    #[test]
    fn loads_zero_when_absent() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value(), 0);
    }

    #[test]
    fn offer_persists_only_improvements() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::load(&store);

        assert!(best.offer(10, &mut store));
        assert_eq!(store.get(BEST_SCORE_KEY), Some(10));

        // Equal and lower scores don't write
        assert!(!best.offer(10, &mut store));
        assert!(!best.offer(3, &mut store));
        assert_eq!(store.get(BEST_SCORE_KEY), Some(10));

        assert!(best.offer(11, &mut store));
        assert_eq!(best.value(), 11);
    }

    #[test]
    fn survives_reload() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::load(&store);
        best.offer(25, &mut store);

        // A fresh load (new session) sees the persisted value
        let reloaded = BestScore::load(&store);
        assert_eq!(reloaded.value(), 25);
    }
}
