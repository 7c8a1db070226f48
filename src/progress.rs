//! Level unlock progress
//!
//! A single high-water mark persisted to LocalStorage as a JSON integer.
//! Missing or unreadable progress means only the first level is open.

use serde::{Deserialize, Serialize};

/// Highest level the player may start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    highest_unlocked: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rocket_lander_progress";

    /// Fresh progress: level 1 unlocked
    pub fn new() -> Self {
        Self {
            highest_unlocked: 1,
        }
    }

    /// Progress with a known high-water mark (0 is treated as 1)
    pub fn with_highest(highest_unlocked: u32) -> Self {
        Self {
            highest_unlocked: highest_unlocked.max(1),
        }
    }

    pub fn highest_unlocked(&self) -> u32 {
        self.highest_unlocked
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.highest_unlocked
    }

    /// Record a successful landing on `level`.
    ///
    /// Opens exactly the level after it, and only when `level` is at or past
    /// the current mark. Returns true when the mark moved (and should be saved).
    pub fn record_success(&mut self, level: u32) -> bool {
        if level < self.highest_unlocked {
            return false;
        }
        self.highest_unlocked = level.saturating_add(1);
        true
    }

    /// Parse stored progress, falling back to a fresh start
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<u32>(json.trim()) {
            Ok(highest) => Self::with_highest(highest),
            Err(e) => {
                log::warn!("Unreadable progress ({e}), starting from level 1");
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> String {
        self.highest_unlocked.to_string()
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let progress = Self::from_json(&json);
                log::info!("Loaded progress: level {} unlocked", progress.highest_unlocked);
                return progress;
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage.set_item(Self::STORAGE_KEY, &self.to_json()).is_ok() {
                log::info!("Progress saved (level {})", self.highest_unlocked);
            } else {
                log::warn!("Failed to save progress");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fresh_progress_opens_first_level() {
        let progress = Progress::new();
        assert_eq!(progress.highest_unlocked(), 1);
        assert!(progress.is_unlocked(1));
        assert!(!progress.is_unlocked(2));
        assert!(!progress.is_unlocked(0));
    }

    #[test]
    fn test_completing_frontier_level_unlocks_next() {
        let mut progress = Progress::with_highest(3);
        assert!(progress.record_success(3));
        assert_eq!(progress.highest_unlocked(), 4);
    }

    #[test]
    fn test_replaying_old_level_keeps_mark() {
        let mut progress = Progress::with_highest(5);
        assert!(!progress.record_success(1));
        assert_eq!(progress.highest_unlocked(), 5);
    }

    #[test]
    fn test_completing_last_level_records_one_past() {
        let mut progress = Progress::with_highest(9);
        assert!(progress.record_success(9));
        assert_eq!(progress.highest_unlocked(), 10);
    }

    #[test]
    fn test_json_round_trip_and_fallbacks() {
        assert_eq!(Progress::from_json("4").highest_unlocked(), 4);
        assert_eq!(Progress::from_json(" 7\n").highest_unlocked(), 7);
        assert_eq!(Progress::from_json("0").highest_unlocked(), 1);
        assert_eq!(Progress::from_json("-3").highest_unlocked(), 1);
        assert_eq!(Progress::from_json("banana").highest_unlocked(), 1);
        assert_eq!(Progress::from_json("").highest_unlocked(), 1);
        assert_eq!(Progress::with_highest(6).to_json(), "6");
    }

    proptest! {
        #[test]
        fn prop_mark_never_decreases(
            start in 1u32..20,
            completions in prop::collection::vec(1u32..20, 0..30),
        ) {
            let mut progress = Progress::with_highest(start);
            for level in completions {
                let before = progress.highest_unlocked();
                progress.record_success(level);
                let after = progress.highest_unlocked();
                prop_assert!(after >= before);
                prop_assert!(after <= before.max(level + 1));
            }
        }
    }
}
