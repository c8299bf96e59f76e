//! Achievement flags
//!
//! Unlocking is idempotent: a flag that is already set never fires again.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::powerups::ActiveEffects;

bitflags! {
    /// Unlocked achievements (persisted across runs)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Achievements: u16 {
        /// Cleared the first obstacle
        const FIRST_POINT = 1 << 0;
        const TEN = 1 << 1;
        const TWENTY_FIVE = 1 << 2;
        const FIFTY = 1 << 3;
        const CENTURY = 1 << 4;
        /// A shield absorbed a fatal collision
        const SHIELD_SAVE = 1 << 5;
        /// Shield, SlowTime and DoublePoints active together
        const FULL_HOUSE = 1 << 6;
    }
}

/// Score thresholds, lowest first
const SCORE_MILESTONES: [(u64, Achievements); 5] = [
    (1, Achievements::FIRST_POINT),
    (10, Achievements::TEN),
    (25, Achievements::TWENTY_FIVE),
    (50, Achievements::FIFTY),
    (100, Achievements::CENTURY),
];

impl Achievements {
    /// Human-readable name for a single flag
    pub fn title(self) -> &'static str {
        const TITLES: [(Achievements, &str); 7] = [
            (Achievements::FIRST_POINT, "First Flight"),
            (Achievements::TEN, "Getting the Hang of It"),
            (Achievements::TWENTY_FIVE, "Quarter Century"),
            (Achievements::FIFTY, "Half Way There"),
            (Achievements::CENTURY, "Centurion"),
            (Achievements::SHIELD_SAVE, "Saved by the Shield"),
            (Achievements::FULL_HOUSE, "Full House"),
        ];
        TITLES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|&(_, title)| title)
            .unwrap_or("Unknown")
    }

    /// Set `flag`; returns true only if it was not already set
    pub fn unlock(&mut self, flag: Achievements) -> bool {
        if self.contains(flag) {
            return false;
        }
        self.insert(flag);
        true
    }

    /// Unlock whatever the current score and effects earn
    ///
    /// Returns newly unlocked flags, one per entry, in milestone order.
    pub fn evaluate(&mut self, score: u64, effects: &ActiveEffects) -> Vec<Achievements> {
        let mut unlocked = Vec::new();
        for (threshold, flag) in SCORE_MILESTONES {
            if score >= threshold && self.unlock(flag) {
                unlocked.push(flag);
            }
        }
        if effects.all_active() && self.unlock(Achievements::FULL_HOUSE) {
            unlocked.push(Achievements::FULL_HOUSE);
        }
        unlocked
    }
}
