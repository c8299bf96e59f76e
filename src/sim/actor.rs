//! The player-controlled actor and its physics
//!
//! Integration is explicit Euler in per-tick units: velocity first, then
//! position. Rotation is derived for rendering only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Outcome of the boundary check after integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Inside the playable band
    Clear,
    /// Hit the ceiling, clamped (non-fatal)
    Ceiling,
    /// Bottom edge passed the ground line (fatal unless shielded)
    Ground,
}

/// The actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; x is fixed for the whole run
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel: f32,
    pub size: Vec2,
    /// Visual tilt in radians, derived from velocity
    pub rotation: f32,
    pub alive: bool,
}

impl Actor {
    /// Spawn at the resting position for a fresh run
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.actor_width, tuning.actor_height);
        let y = (tuning.ground_level() - size.y) * 0.5;
        Self {
            pos: Vec2::new(tuning.actor_x, y),
            vel: 0.0,
            size,
            rotation: 0.0,
            alive: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Replace the current velocity with the flap impulse
    pub fn flap(&mut self, impulse: f32) {
        self.vel = impulse;
    }

    /// Advance one tick and report boundary contact
    ///
    /// `gravity_scale` is below 1.0 while SlowTime is active.
    pub fn step(&mut self, tuning: &Tuning, gravity_scale: f32) -> Boundary {
        self.vel += tuning.gravity * gravity_scale;
        self.pos.y += self.vel;
        self.rotation = (self.vel * tuning.rotation_scale).clamp(tuning.rotation_min, tuning.rotation_max);

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel = 0.0;
            return Boundary::Ceiling;
        }
        if self.bottom() > tuning.ground_level() {
            return Boundary::Ground;
        }
        Boundary::Clear
    }

    /// Put the actor back on the ground line and bounce it (shield save)
    pub fn bounce_off_ground(&mut self, tuning: &Tuning) {
        self.pos.y = tuning.ground_level() - self.size.y;
        self.flap(tuning.flap_impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_integration() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        let y0 = actor.pos.y;

        assert_eq!(actor.step(&tuning, 1.0), Boundary::Clear);
        assert!((actor.vel - tuning.gravity).abs() < 1e-6);
        assert!((actor.pos.y - (y0 + tuning.gravity)).abs() < 1e-6);

        actor.step(&tuning, 1.0);
        assert!((actor.pos.y - (y0 + 3.0 * tuning.gravity)).abs() < 1e-5);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.vel = 9.0;
        actor.flap(tuning.flap_impulse);
        assert_eq!(actor.vel, tuning.flap_impulse);
        actor.flap(tuning.flap_impulse);
        assert_eq!(actor.vel, tuning.flap_impulse);
    }

    #[test]
    fn test_ceiling_clamps_and_stops() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = 1.0;
        actor.vel = -10.0;
        assert_eq!(actor.step(&tuning, 1.0), Boundary::Ceiling);
        assert_eq!(actor.pos.y, 0.0);
        assert_eq!(actor.vel, 0.0);
        assert!(actor.alive);
    }

    #[test]
    fn test_ground_detected() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = tuning.ground_level() - actor.size.y;
        actor.vel = 2.0;
        assert_eq!(actor.step(&tuning, 1.0), Boundary::Ground);
    }

    #[test]
    fn test_rotation_clamped() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.vel = 500.0;
        actor.pos.y = 0.0;
        actor.step(&tuning, 1.0);
        assert_eq!(actor.rotation, tuning.rotation_max);

        let mut actor = Actor::new(&tuning);
        actor.vel = -50.0;
        actor.step(&tuning, 1.0);
        assert_eq!(actor.rotation, tuning.rotation_min);
    }

    #[test]
    fn test_bounce_off_ground() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = tuning.ground_level();
        actor.bounce_off_ground(&tuning);
        assert_eq!(actor.bottom(), tuning.ground_level());
        assert_eq!(actor.vel, tuning.flap_impulse);
    }
}
