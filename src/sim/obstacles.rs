//! Obstacle generation, scrolling and retirement
//!
//! Obstacles are paired upper/lower barriers sharing one gap. They spawn at
//! the right edge once the previous one has scrolled `spawn_interval` in,
//! move left at the difficulty speed and are dropped once fully off-screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// A paired upper/lower obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Vertical centre of the gap
    pub gap_center: f32,
    pub gap_height: f32,
    /// Set once, when the right edge passes the actor
    pub scored: bool,
    /// A shield absorbed a hit on this obstacle; it no longer collides
    #[serde(default)]
    pub breached: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    /// Upper barrier, from the ceiling to the gap
    pub fn upper_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top().max(0.0))
    }

    /// Lower barrier, from the gap to the ground line
    pub fn lower_rect(&self, ground_level: f32) -> Rect {
        let top = self.gap_bottom();
        Rect::new(self.x, top, self.width, (ground_level - top).max(0.0))
    }
}

/// Legal range for a gap centre so the whole gap stays inside the margins
///
/// Collapses to the band midpoint when the gap is too tall for the margins.
pub fn gap_center_bounds(gap_height: f32, tuning: &Tuning) -> (f32, f32) {
    let ground = tuning.ground_level();
    let half = gap_height.min(ground) / 2.0;
    let lo = tuning.gap_margin + half;
    let hi = ground - tuning.gap_margin - half;
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = ground / 2.0;
        (mid, mid)
    }
}

/// Whether a new obstacle is due
pub fn should_spawn(obstacles: &[Obstacle], tuning: &Tuning) -> bool {
    obstacles
        .last()
        .is_none_or(|last| last.x < tuning.screen_width - tuning.spawn_interval)
}

/// Build an obstacle at the right edge with a uniformly sampled gap centre
pub fn spawn_obstacle<R: Rng>(id: u32, gap_height: f32, tuning: &Tuning, rng: &mut R) -> Obstacle {
    let gap_height = gap_height.min(tuning.ground_level());
    let (lo, hi) = gap_center_bounds(gap_height, tuning);
    let sampled = if hi > lo { rng.random_range(lo..=hi) } else { lo };
    Obstacle {
        id,
        x: tuning.screen_width,
        width: tuning.obstacle_width,
        gap_center: sampled.clamp(lo, hi),
        gap_height,
        scored: false,
        breached: false,
    }
}

/// Scroll obstacles left, mark clearances and retire off-screen ones
///
/// Returns the ids of obstacles that were cleared this tick, in spawn order.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32, actor_x: f32) -> Vec<u32> {
    let mut cleared = Vec::new();
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
        if !obstacle.scored && obstacle.right() < actor_x {
            obstacle.scored = true;
            cleared.push(obstacle.id);
        }
    }
    obstacles.retain(|o| o.right() >= 0.0);
    cleared
}
