//! Score and difficulty
//!
//! Difficulty is a pure function of score: `level = score / points_per_level + 1`.
//! Obstacle speed and gap height are pure, clamped functions of the level.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty level for a score (always >= 1)
pub fn level_for_score(score: u64, points_per_level: u64) -> u32 {
    let steps = score / points_per_level.max(1);
    u32::try_from(steps).unwrap_or(u32::MAX - 1).saturating_add(1)
}

/// Obstacle speed for a level, rising until `max_speed`
pub fn speed_for_level(level: u32, tuning: &Tuning) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (tuning.base_speed + tuning.speed_per_level * steps).min(tuning.max_speed)
}

/// Gap height for a level, shrinking until `min_gap`
pub fn gap_for_level(level: u32, tuning: &Tuning) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (tuning.base_gap - tuning.gap_per_level * steps).max(tuning.min_gap)
}

/// Score, best score and the derived difficulty values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    /// Best score seen (stored best at run start, raised live)
    pub best: u64,
    /// Best score when the current run began
    pub best_at_start: u64,
    pub level: u32,
    /// Current obstacle speed before SlowTime scaling
    pub speed: f32,
    /// Gap height used for newly spawned obstacles
    pub gap_height: f32,
}

impl ScoreState {
    pub fn new(best: u64, tuning: &Tuning) -> Self {
        Self {
            score: 0,
            best,
            best_at_start: best,
            level: 1,
            speed: speed_for_level(1, tuning),
            gap_height: gap_for_level(1, tuning),
        }
    }

    /// Reset for a new run, keeping the best score
    pub fn reset_run(&mut self, tuning: &Tuning) {
        *self = Self::new(self.best, tuning);
    }

    /// Merge a best score read from storage (never lowers the best)
    pub fn merge_stored_best(&mut self, stored: u64) {
        self.best = self.best.max(stored);
    }

    /// Credit one cleared obstacle; returns points awarded
    pub fn award_clearance(&mut self, double_points: bool) -> u32 {
        let points = if double_points { 2 } else { 1 };
        self.score += u64::from(points);
        if self.score > self.best {
            self.best = self.score;
        }
        points
    }

    /// Recompute level, speed and gap; returns the new level if it rose
    pub fn recompute(&mut self, tuning: &Tuning) -> Option<u32> {
        let level = level_for_score(self.score, tuning.points_per_level);
        let previous = self.level;
        self.level = level;
        self.speed = speed_for_level(level, tuning);
        self.gap_height = gap_for_level(level, tuning);
        (level > previous).then_some(level)
    }

    /// Whether this run beat the best score it started with
    pub fn is_new_best(&self) -> bool {
        self.score > self.best_at_start
    }
}
