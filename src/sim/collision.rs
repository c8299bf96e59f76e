//! Collision detection between the actor, obstacles and pickups
//!
//! Everything is axis-aligned. An obstacle is only dangerous while it
//! overlaps the actor horizontally, and then only if the actor's vertical
//! span is not fully inside the gap. Ground and ceiling are handled by the
//! actor's own boundary check.

use super::obstacles::Obstacle;
use super::powerups::PowerUp;
use super::rect::Rect;

/// Check the actor box against one obstacle
///
/// Breached obstacles (already absorbed by a shield) never collide.
pub fn actor_obstacle_collision(actor: &Rect, obstacle: &Obstacle) -> bool {
    if obstacle.breached || !actor.overlaps_x(obstacle.x, obstacle.right()) {
        return false;
    }
    !actor.within_vertical(obstacle.gap_top(), obstacle.gap_bottom())
}

/// Index of the first obstacle (in spawn order) the actor collides with
pub fn first_obstacle_hit(actor: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| actor_obstacle_collision(actor, obstacle))
}

/// Mark every uncollected pickup the actor overlaps as collected
///
/// Returns a copy of each newly collected pickup. Already collected
/// pickups are skipped, so a pickup can be collected only once.
pub fn collect_pickups(actor: &Rect, powerups: &mut [PowerUp]) -> Vec<PowerUp> {
    let mut collected = Vec::new();
    for powerup in powerups.iter_mut() {
        if !powerup.collected && actor.overlaps(&powerup.bounds()) {
            powerup.collected = true;
            collected.push(powerup.clone());
        }
    }
    collected
}
