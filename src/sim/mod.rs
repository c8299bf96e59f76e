//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, per-tick units)
//! - Seeded RNG only (gameplay and particles on separate streams)
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod achievements;
pub mod actor;
pub mod clock;
pub mod collision;
pub mod events;
pub mod obstacles;
pub mod particles;
pub mod powerups;
pub mod rect;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use achievements::Achievements;
pub use actor::{Actor, Boundary};
pub use clock::{Clock, SimulationState};
pub use collision::{actor_obstacle_collision, collect_pickups, first_obstacle_hit};
pub use events::GameEvent;
pub use obstacles::Obstacle;
pub use particles::{Particle, ParticleSystem, ParticleTint};
pub use powerups::{ActiveEffects, PowerUp, PowerUpKind};
pub use rect::Rect;
pub use score::{ScoreState, gap_for_level, level_for_score, speed_for_level};
pub use snapshot::Snapshot;
pub use state::GameState;
pub use tick::{Frame, TickInput, frame, tick};
