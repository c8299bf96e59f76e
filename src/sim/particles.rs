//! Cosmetic particles
//!
//! Purely reactive: bursts are spawned from event notifications and the
//! system never touches gameplay state. It owns a private RNG stream so
//! emission cannot shift obstacle or pickup placement.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::powerups::PowerUpKind;
use crate::tuning::Tuning;

/// PCG stream reserved for particles (gameplay uses the default stream)
const PARTICLE_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;

/// Colour tag per triggering event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    Flap,
    Score,
    Shield,
    SlowTime,
    DoublePoints,
    ShieldBreak,
    Crash,
}

impl ParticleTint {
    /// Tint for an event, if that event emits particles
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(ParticleTint::Flap),
            GameEvent::Score { .. } => Some(ParticleTint::Score),
            GameEvent::PowerUpCollected { kind, .. } => Some(match kind {
                PowerUpKind::Shield => ParticleTint::Shield,
                PowerUpKind::SlowTime => ParticleTint::SlowTime,
                PowerUpKind::DoublePoints => ParticleTint::DoublePoints,
            }),
            GameEvent::ShieldAbsorbed => Some(ParticleTint::ShieldBreak),
            GameEvent::GameOver { .. } => Some(ParticleTint::Crash),
            _ => None,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left
    pub life: u32,
    pub max_life: u32,
    pub tint: ParticleTint,
}

impl Particle {
    /// Remaining life as 0-1, for fading
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    batch: usize,
    life_ticks: u32,
    gravity: f32,
    speed: f32,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(seed: u64, tuning: &Tuning, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::new(seed, PARTICLE_STREAM),
            batch: tuning.particle_batch,
            life_ticks: tuning.particle_life_ticks,
            gravity: tuning.particle_gravity,
            speed: tuning.particle_speed,
            max_particles,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// React to an event by emitting a burst at `origin`
    pub fn on_event(&mut self, event: &GameEvent, origin: Vec2) {
        if let Some(tint) = ParticleTint::for_event(event) {
            self.burst(origin, tint);
        }
    }

    /// Emit one fixed-size batch with randomized velocities
    pub fn burst(&mut self, origin: Vec2, tint: ParticleTint) {
        if self.max_particles == 0 || self.life_ticks == 0 {
            return;
        }
        for _ in 0..self.batch {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.speed * self.rng.random_range(0.4..1.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: self.life_ticks,
                max_life: self.life_ticks,
                tint,
            });
        }
        // Drop the oldest when over budget
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    /// Ballistic step, then sweep expired particles
    pub fn update(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.vel.y += self.gravity;
            particle.pos += particle.vel;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_and_expire() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(42, &tuning, 512);
        system.on_event(&GameEvent::Flap, Vec2::new(100.0, 100.0));
        assert_eq!(system.particles().len(), tuning.particle_batch);
        assert!(system.particles().iter().all(|p| p.tint == ParticleTint::Flap));

        for _ in 0..tuning.particle_life_ticks - 1 {
            system.update();
        }
        assert_eq!(system.particles().len(), tuning.particle_batch);
        system.update();
        assert!(system.particles().is_empty());
    }

    #[test]
    fn test_fade_tracks_remaining_life() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(42, &tuning, 512);
        system.burst(Vec2::ZERO, ParticleTint::Score);
        assert!(system.particles().iter().all(|p| p.fade() == 1.0));

        let half = tuning.particle_life_ticks / 2;
        for _ in 0..half {
            system.update();
        }
        let expected = (tuning.particle_life_ticks - half) as f32 / tuning.particle_life_ticks as f32;
        assert!(system
            .particles()
            .iter()
            .all(|p| (p.fade() - expected).abs() < 1e-6));
    }

    #[test]
    fn test_gravity_pulls_down() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(1, &tuning, 512);
        system.burst(Vec2::ZERO, ParticleTint::Score);
        let before: Vec<f32> = system.particles().iter().map(|p| p.vel.y).collect();
        system.update();
        for (p, v0) in system.particles().iter().zip(before) {
            assert!((p.vel.y - (v0 + tuning.particle_gravity)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_silent_events() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(1, &tuning, 512);
        system.on_event(&GameEvent::Paused, Vec2::ZERO);
        system.on_event(&GameEvent::LevelUp { level: 2 }, Vec2::ZERO);
        assert!(system.particles().is_empty());
    }

    #[test]
    fn test_budget_drops_oldest() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(1, &tuning, tuning.particle_batch);
        system.burst(Vec2::ZERO, ParticleTint::Flap);
        system.burst(Vec2::ZERO, ParticleTint::Crash);
        assert_eq!(system.particles().len(), tuning.particle_batch);
        assert!(system.particles().iter().all(|p| p.tint == ParticleTint::Crash));
    }

    #[test]
    fn test_disabled_budget() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(1, &tuning, 0);
        system.burst(Vec2::ZERO, ParticleTint::Crash);
        assert!(system.particles().is_empty());
    }
}
