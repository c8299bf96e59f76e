//! Flappy Core - deterministic simulation for a side-scrolling flap game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, power-ups, score)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences (particle budget)
//! - `persistence`: Best score and achievement storage contract
//! - `session`: Host glue tying a run to its progress store

pub mod error;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Default world constants (screen space, y grows downward, units per tick)
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 640.0;
    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Actor defaults - x never changes during a run
    pub const ACTOR_X: f32 = 96.0;
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set by a flap (replaces current velocity)
    pub const FLAP_IMPULSE: f32 = -7.5;
    /// Visual tilt per unit of vertical velocity (radians)
    pub const ROTATION_SCALE: f32 = 0.08;
    pub const ROTATION_MIN: f32 = -0.45;
    pub const ROTATION_MAX: f32 = std::f32::consts::FRAC_PI_2;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    /// Horizontal distance between consecutive obstacles
    pub const SPAWN_INTERVAL: f32 = 220.0;
    /// Minimum clearance between a gap and the ceiling/ground
    pub const GAP_MARGIN: f32 = 48.0;

    /// Difficulty curve: speed rises, gap shrinks, both clamped
    pub const BASE_SPEED: f32 = 2.5;
    pub const SPEED_PER_LEVEL: f32 = 0.35;
    pub const MAX_SPEED: f32 = 6.0;
    pub const BASE_GAP: f32 = 170.0;
    pub const GAP_PER_LEVEL: f32 = 8.0;
    pub const MIN_GAP: f32 = 110.0;
    /// Score points per difficulty level
    pub const POINTS_PER_LEVEL: u64 = 10;

    /// Power-up defaults
    pub const POWERUP_CHANCE: f64 = 0.004;
    pub const POWERUP_SIZE: f32 = 24.0;
    /// Horizontal offset past the obstacle's right edge
    pub const POWERUP_OFFSET: f32 = 80.0;
    /// Effect duration in ticks (10 seconds at 60 Hz)
    pub const EFFECT_DURATION_TICKS: u32 = 600;
    /// Speed/gravity multiplier while SlowTime is active
    pub const SLOW_TIME_FACTOR: f32 = 0.6;

    /// Particle defaults
    pub const PARTICLE_BATCH: usize = 12;
    pub const PARTICLE_LIFE_TICKS: u32 = 36;
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    pub const PARTICLE_SPEED: f32 = 3.0;
}
