//! Discrete notifications emitted by the simulation
//!
//! Events flow one way, out of the core. Audio, persistence and the particle
//! system react to them; none of them can reach back into the state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::achievements::Achievements;
use super::powerups::PowerUpKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (start or restart)
    Started,
    Paused,
    Resumed,
    Flap,
    /// An obstacle was cleared
    Score { points: u32, total: u64 },
    /// A pickup was collected at `at`
    PowerUpCollected { kind: PowerUpKind, at: Vec2 },
    /// The shield took a fatal hit and is gone
    ShieldAbsorbed,
    /// Difficulty level rose
    LevelUp { level: u32 },
    AchievementUnlocked(Achievements),
    /// The finished run beat the stored best
    NewBest { score: u64 },
    GameOver { final_score: u64 },
}
