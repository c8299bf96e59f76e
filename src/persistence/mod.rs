//! Best score and achievement persistence
//!
//! The simulation never touches storage. A [`ProgressStore`] is read once per
//! run and written only when something improved:
//! - Missing or corrupt data reads as the default (best score 0)
//! - The best score is written only when exceeded, never lowered
//! - Achievement flags are merged, never cleared

mod file;

pub use file::JsonFileStore;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::Achievements;

/// Everything persisted between sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub best_score: u64,
    pub achievements: Achievements,
}

impl Progress {
    /// Fold an improved best score in; returns whether anything changed
    pub fn record_best(&mut self, score: u64) -> bool {
        if score <= self.best_score {
            return false;
        }
        self.best_score = score;
        true
    }

    /// Merge newly unlocked flags; returns whether anything changed
    pub fn record_achievements(&mut self, achievements: Achievements) -> bool {
        let merged = self.achievements | achievements;
        let changed = merged != self.achievements;
        self.achievements = merged;
        changed
    }
}

/// Parse stored progress
///
/// Accepts the JSON record or a bare integer (a best score saved on its own).
/// Anything else yields `None`; callers fall back to the default.
pub fn parse_progress(raw: &str) -> Option<Progress> {
    let raw = raw.trim();
    if let Ok(best_score) = raw.parse::<u64>() {
        return Some(Progress {
            best_score,
            ..Progress::default()
        });
    }
    serde_json::from_str(raw).ok()
}

/// Storage backend for [`Progress`]
pub trait ProgressStore {
    /// Read stored progress; never fails, missing or corrupt data is the default
    fn load(&self) -> Progress;

    /// Persist a new best score if it beats the stored one
    fn save_best(&mut self, best_score: u64) -> Result<()>;

    /// Persist achievement flags, merged with the stored ones
    fn save_achievements(&mut self, achievements: Achievements) -> Result<()>;
}

/// In-memory store for tests and hosts without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    progress: Progress,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: Progress) -> Self {
        Self {
            progress,
            writes: 0,
        }
    }

    /// Number of writes that changed the stored progress
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Progress {
        self.progress
    }

    fn save_best(&mut self, best_score: u64) -> Result<()> {
        if self.progress.record_best(best_score) {
            self.writes += 1;
        }
        Ok(())
    }

    fn save_achievements(&mut self, achievements: Achievements) -> Result<()> {
        if self.progress.record_achievements(achievements) {
            self.writes += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_record() {
        let progress = parse_progress(r#"{"best_score": 42, "achievements": "FIRST_POINT | TEN"}"#).unwrap();
        assert_eq!(progress.best_score, 42);
        assert_eq!(
            progress.achievements,
            Achievements::FIRST_POINT | Achievements::TEN
        );
    }

    #[test]
    fn test_parse_bare_integer() {
        let progress = parse_progress(" 17\n").unwrap();
        assert_eq!(progress.best_score, 17);
        assert!(progress.achievements.is_empty());
    }

    #[test]
    fn test_parse_partial_record() {
        let progress = parse_progress(r#"{"best_score": 9}"#).unwrap();
        assert_eq!(progress.best_score, 9);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_progress("not a number").is_none());
        assert!(parse_progress("-5").is_none());
        assert!(parse_progress("{\"best_score\": \"x\"}").is_none());
        assert!(parse_progress("").is_none());
    }

    #[test]
    fn test_best_never_lowered() {
        let mut store = MemoryStore::with_progress(Progress {
            best_score: 10,
            ..Progress::default()
        });
        store.save_best(7).unwrap();
        store.save_best(10).unwrap();
        assert_eq!(store.load().best_score, 10);
        assert_eq!(store.writes(), 0);

        store.save_best(11).unwrap();
        assert_eq!(store.load().best_score, 11);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_achievements_merge() {
        let mut store = MemoryStore::new();
        store.save_achievements(Achievements::TEN).unwrap();
        store.save_achievements(Achievements::SHIELD_SAVE).unwrap();
        store.save_achievements(Achievements::TEN).unwrap();
        assert_eq!(
            store.load().achievements,
            Achievements::TEN | Achievements::SHIELD_SAVE
        );
        assert_eq!(store.writes(), 2);
    }
}
