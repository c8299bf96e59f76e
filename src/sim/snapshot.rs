//! Read-only frame view handed to renderers

use serde::{Deserialize, Serialize};

use super::achievements::Achievements;
use super::actor::Actor;
use super::clock::SimulationState;
use super::obstacles::Obstacle;
use super::particles::Particle;
use super::powerups::{PowerUp, PowerUpKind};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SimulationState,
    /// Ticks simulated in the current run
    pub tick: u64,
    pub actor: Actor,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub best_score: u64,
    pub level: u32,
    /// Active effects with remaining ticks
    pub effects: Vec<(PowerUpKind, u32)>,
    pub achievements: Achievements,
    pub ground_level: f32,
}

impl Snapshot {
    /// Remaining ticks for an effect, 0 if inactive
    pub fn effect_ticks(&self, kind: PowerUpKind) -> u32 {
        self.effects
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |&(_, ticks)| ticks)
    }
}
