//! Power-up pickups and the active effect set
//!
//! Pickups spawn just past the newest obstacle's gap, scroll with the
//! obstacles and grant a timed effect when collected. Effects of different
//! kinds apply independently; collecting an active kind again refreshes its
//! timer to the full duration instead of stacking.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs the next fatal collision
    Shield,
    /// Scales obstacle speed and gravity down
    SlowTime,
    /// Doubles points per cleared obstacle
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowTime,
        PowerUpKind::DoublePoints,
    ];

    /// Uniformly random kind
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A collectible pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
    /// Effect duration granted on collection
    pub duration_ticks: u32,
}

impl PowerUp {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: Vec2::splat(self.size),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }
}

/// Active power-up effects (0 ticks = inactive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_ticks: u32,
    pub slow_ticks: u32,
    pub double_ticks: u32,
}

impl ActiveEffects {
    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::Shield => &mut self.shield_ticks,
            PowerUpKind::SlowTime => &mut self.slow_ticks,
            PowerUpKind::DoublePoints => &mut self.double_ticks,
        }
    }

    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Shield => self.shield_ticks,
            PowerUpKind::SlowTime => self.slow_ticks,
            PowerUpKind::DoublePoints => self.double_ticks,
        }
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Apply or refresh an effect to the full duration
    pub fn activate(&mut self, kind: PowerUpKind, duration_ticks: u32) {
        *self.slot_mut(kind) = duration_ticks;
    }

    /// Remove an effect early; returns whether it was active
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        let slot = self.slot_mut(kind);
        let was_active = *slot > 0;
        *slot = 0;
        was_active
    }

    /// Count every active effect down by one tick; expired ones drop out
    pub fn decay(&mut self) {
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.slow_ticks = self.slow_ticks.saturating_sub(1);
        self.double_ticks = self.double_ticks.saturating_sub(1);
    }

    /// Active kinds with remaining ticks, in declaration order
    pub fn active(&self) -> Vec<(PowerUpKind, u32)> {
        PowerUpKind::ALL
            .iter()
            .map(|&kind| (kind, self.remaining(kind)))
            .filter(|&(_, ticks)| ticks > 0)
            .collect()
    }

    pub fn all_active(&self) -> bool {
        PowerUpKind::ALL.iter().all(|&kind| self.is_active(kind))
    }

    /// Multiplier for obstacle speed and gravity
    pub fn time_scale(&self, tuning: &Tuning) -> f32 {
        if self.is_active(PowerUpKind::SlowTime) {
            tuning.slow_time_factor
        } else {
            1.0
        }
    }
}

/// Roll for a pickup this tick; returns the kind to spawn
///
/// Consumes one chance roll from `rng` per call so the stream stays aligned
/// with the tick count while obstacles exist.
pub fn roll_spawn<R: Rng>(tuning: &Tuning, rng: &mut R) -> Option<PowerUpKind> {
    if !rng.random_bool(tuning.powerup_chance) {
        return None;
    }
    Some(PowerUpKind::random(rng))
}

/// Place a pickup just past the newest obstacle, centred on its gap
pub fn place_powerup(id: u32, kind: PowerUpKind, newest: &Obstacle, tuning: &Tuning) -> PowerUp {
    let size = tuning.powerup_size;
    PowerUp {
        id,
        kind,
        pos: Vec2::new(
            newest.right() + tuning.powerup_offset,
            newest.gap_center - size / 2.0,
        ),
        size,
        collected: false,
        duration_ticks: tuning.effect_duration_ticks,
    }
}

/// Scroll uncollected pickups and sweep collected or off-screen ones
pub fn advance_powerups(powerups: &mut Vec<PowerUp>, speed: f32) {
    for powerup in powerups.iter_mut().filter(|p| !p.collected) {
        powerup.pos.x -= speed;
    }
    powerups.retain(|p| !p.collected && p.bounds().right() >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_refresh_does_not_stack() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::DoublePoints, 600);
        for _ in 0..100 {
            effects.decay();
        }
        assert_eq!(effects.remaining(PowerUpKind::DoublePoints), 500);

        effects.activate(PowerUpKind::DoublePoints, 600);
        assert_eq!(effects.remaining(PowerUpKind::DoublePoints), 600);
    }

    #[test]
    fn test_effects_compose_independently() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 3);
        effects.activate(PowerUpKind::SlowTime, 5);
        assert_eq!(effects.active().len(), 2);

        for _ in 0..3 {
            effects.decay();
        }
        assert!(!effects.is_active(PowerUpKind::Shield));
        assert!(effects.is_active(PowerUpKind::SlowTime));
        assert_eq!(effects.active(), vec![(PowerUpKind::SlowTime, 2)]);
    }

    #[test]
    fn test_consume_removes_early() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 600);
        assert!(effects.consume(PowerUpKind::Shield));
        assert!(!effects.is_active(PowerUpKind::Shield));
        assert!(!effects.consume(PowerUpKind::Shield));
    }

    #[test]
    fn test_time_scale() {
        let tuning = Tuning::default();
        let mut effects = ActiveEffects::default();
        assert_eq!(effects.time_scale(&tuning), 1.0);
        effects.activate(PowerUpKind::SlowTime, 10);
        assert_eq!(effects.time_scale(&tuning), tuning.slow_time_factor);
    }

    #[test]
    fn test_spawn_behind_gap() {
        let tuning = Tuning::default();
        let newest = Obstacle {
            id: 1,
            x: 400.0,
            width: 64.0,
            gap_center: 250.0,
            gap_height: 150.0,
            scored: false,
            breached: false,
        };
        let p = place_powerup(2, PowerUpKind::Shield, &newest, &tuning);
        assert_eq!(p.pos.x, newest.right() + tuning.powerup_offset);
        assert_eq!(p.center().y, newest.gap_center);
        assert_eq!(p.duration_ticks, tuning.effect_duration_ticks);
        assert!(!p.collected);
    }

    #[test]
    fn test_roll_extremes() {
        let never = Tuning {
            powerup_chance: 0.0,
            ..Tuning::default()
        };
        let always = Tuning {
            powerup_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        assert!((0..1000).all(|_| roll_spawn(&never, &mut rng).is_none()));
        assert!((0..1000).all(|_| roll_spawn(&always, &mut rng).is_some()));
    }

    #[test]
    fn test_every_kind_appears() {
        let mut rng = Pcg32::seed_from_u64(9);
        let kinds: Vec<PowerUpKind> = (0..300).map(|_| PowerUpKind::random(&mut rng)).collect();
        for kind in PowerUpKind::ALL {
            assert!(kinds.contains(&kind));
        }
    }

    #[test]
    fn test_advance_sweeps() {
        let mut powerups = vec![
            PowerUp {
                id: 1,
                kind: PowerUpKind::Shield,
                pos: Vec2::new(-20.0, 100.0),
                size: 24.0,
                collected: false,
                duration_ticks: 600,
            },
            PowerUp {
                id: 2,
                kind: PowerUpKind::SlowTime,
                pos: Vec2::new(200.0, 100.0),
                size: 24.0,
                collected: true,
                duration_ticks: 600,
            },
            PowerUp {
                id: 3,
                kind: PowerUpKind::DoublePoints,
                pos: Vec2::new(300.0, 100.0),
                size: 24.0,
                collected: false,
                duration_ticks: 600,
            },
        ];
        advance_powerups(&mut powerups, 5.0);
        assert_eq!(powerups.len(), 1);
        assert_eq!(powerups[0].id, 3);
        assert_eq!(powerups[0].pos.x, 295.0);
    }
}
