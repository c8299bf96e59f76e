//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so balance can be tweaked
//! from a JSON file without recompiling. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Balance constants for one simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,

    // === Actor ===
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub rotation_scale: f32,
    pub rotation_min: f32,
    pub rotation_max: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub spawn_interval: f32,
    pub gap_margin: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_per_level: f32,
    pub max_speed: f32,
    pub base_gap: f32,
    pub gap_per_level: f32,
    pub min_gap: f32,
    pub points_per_level: u64,

    // === Power-ups ===
    pub powerup_chance: f64,
    pub powerup_size: f32,
    pub powerup_offset: f32,
    pub effect_duration_ticks: u32,
    pub slow_time_factor: f32,

    // === Particles ===
    pub particle_batch: usize,
    pub particle_life_ticks: u32,
    pub particle_gravity: f32,
    pub particle_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            rotation_scale: ROTATION_SCALE,
            rotation_min: ROTATION_MIN,
            rotation_max: ROTATION_MAX,

            obstacle_width: OBSTACLE_WIDTH,
            spawn_interval: SPAWN_INTERVAL,
            gap_margin: GAP_MARGIN,

            base_speed: BASE_SPEED,
            speed_per_level: SPEED_PER_LEVEL,
            max_speed: MAX_SPEED,
            base_gap: BASE_GAP,
            gap_per_level: GAP_PER_LEVEL,
            min_gap: MIN_GAP,
            points_per_level: POINTS_PER_LEVEL,

            powerup_chance: POWERUP_CHANCE,
            powerup_size: POWERUP_SIZE,
            powerup_offset: POWERUP_OFFSET,
            effect_duration_ticks: EFFECT_DURATION_TICKS,
            slow_time_factor: SLOW_TIME_FACTOR,

            particle_batch: PARTICLE_BATCH,
            particle_life_ticks: PARTICLE_LIFE_TICKS,
            particle_gravity: PARTICLE_GRAVITY,
            particle_speed: PARTICLE_SPEED,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground line (actor bottom may not pass it)
    #[inline]
    pub fn ground_level(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Parse and validate tuning from JSON (partial documents allowed)
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("spawn_interval", self.spawn_interval),
            ("base_speed", self.base_speed),
            ("min_gap", self.min_gap),
            ("powerup_size", self.powerup_size),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(Error::InvalidTuning(format!("{name} must be positive, got {value}")));
            }
        }
        if self.ground_height < 0.0 || self.ground_level() <= self.actor_height {
            return Err(Error::InvalidTuning(format!(
                "ground level {} leaves no room for the actor",
                self.ground_level()
            )));
        }
        if self.min_gap <= self.actor_height {
            return Err(Error::InvalidTuning(format!(
                "min_gap {} must exceed actor_height {}",
                self.min_gap, self.actor_height
            )));
        }
        if self.base_gap < self.min_gap {
            return Err(Error::InvalidTuning("base_gap must be >= min_gap".into()));
        }
        if self.max_speed < self.base_speed {
            return Err(Error::InvalidTuning("max_speed must be >= base_speed".into()));
        }
        if self.speed_per_level < 0.0 || self.gap_per_level < 0.0 {
            return Err(Error::InvalidTuning("difficulty steps must be non-negative".into()));
        }
        if self.points_per_level == 0 {
            return Err(Error::InvalidTuning("points_per_level must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err(Error::InvalidTuning(format!(
                "powerup_chance {} outside [0, 1]",
                self.powerup_chance
            )));
        }
        if !(self.slow_time_factor > 0.0 && self.slow_time_factor <= 1.0) {
            return Err(Error::InvalidTuning(format!(
                "slow_time_factor {} outside (0, 1]",
                self.slow_time_factor
            )));
        }
        if self.rotation_min > self.rotation_max {
            return Err(Error::InvalidTuning("rotation_min exceeds rotation_max".into()));
        }
        Ok(())
    }
}
