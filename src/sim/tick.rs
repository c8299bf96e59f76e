//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call to
//! [`frame`] applies the frame's commands, runs at most one tick and then
//! produces exactly one snapshot.

use super::actor::Boundary;
use super::clock::SimulationState;
use super::collision::{collect_pickups, first_obstacle_hit};
use super::events::GameEvent;
use super::obstacles::{advance_obstacles, should_spawn, spawn_obstacle};
use super::powerups::{PowerUpKind, advance_powerups, place_powerup, roll_spawn};
use super::snapshot::Snapshot;
use super::state::GameState;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a run, or restart after game over
    pub start: bool,
    /// Demo mode - the core flaps on its own
    pub autopilot: bool,
}

/// Output of one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: Snapshot,
    /// Events emitted during this frame, in order
    pub events: Vec<GameEvent>,
}

/// Run one frame: commands, at most one tick, then one snapshot
pub fn frame(state: &mut GameState, input: &TickInput) -> Frame {
    tick(state, input);
    Frame {
        snapshot: state.snapshot(),
        events: state.drain_events(),
    }
}

/// Apply commands and advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start {
        match state.phase() {
            SimulationState::Start => {
                state.start();
            }
            SimulationState::GameOver => {
                state.restart();
            }
            _ => {}
        }
    }
    if input.pause {
        state.toggle_pause();
    }

    if !state.clock.advance() {
        // Let the crash burst play out; Start and Paused stay frozen
        if state.phase() == SimulationState::GameOver {
            state.particles.update();
        }
        return;
    }

    if input.flap || (input.autopilot && autopilot_wants_flap(state)) {
        state.flap();
    }

    step(state);
}

/// The update pipeline for one Playing tick
fn step(state: &mut GameState) {
    let tuning = state.tuning;
    let time_scale = state.effects.time_scale(&tuning);

    // --- PHYSICS ---
    if state.actor.step(&tuning, time_scale) == Boundary::Ground {
        if state.absorb_with_shield() {
            state.actor.bounce_off_ground(&tuning);
        } else {
            state.end_run();
            state.particles.update();
            return;
        }
    }

    // --- OBSTACLES ---
    if should_spawn(&state.obstacles, &tuning) {
        let id = state.next_entity_id();
        let obstacle = spawn_obstacle(id, state.score.gap_height, &tuning, &mut state.rng);
        state.obstacles.push(obstacle);
    }
    let speed = state.score.speed * time_scale;
    let cleared = advance_obstacles(&mut state.obstacles, speed, state.actor.pos.x);

    // --- COLLISIONS ---
    let actor_box = state.actor.bounds();
    let mut fatal = false;
    if let Some(index) = first_obstacle_hit(&actor_box, &state.obstacles) {
        if state.absorb_with_shield() {
            state.obstacles[index].breached = true;
        } else {
            fatal = true;
        }
    }
    // A fatal hit ends the tick before any pickup is processed
    let collected = if fatal {
        Vec::new()
    } else {
        collect_pickups(&actor_box, &mut state.powerups)
    };

    // --- SCORE & DIFFICULTY ---
    for _ in &cleared {
        let double = state.effects.is_active(PowerUpKind::DoublePoints);
        let points = state.score.award_clearance(double);
        let total = state.score.score;
        state.emit(GameEvent::Score { points, total });
    }
    if let Some(level) = state.score.recompute(&tuning) {
        log::debug!(
            "Difficulty level {} (speed {:.2}, gap {:.1})",
            level,
            state.score.speed,
            state.score.gap_height
        );
        state.emit(GameEvent::LevelUp { level });
    }
    state.evaluate_achievements();

    if fatal {
        state.end_run();
        state.particles.update();
        return;
    }

    // --- POWER-UPS ---
    state.effects.decay();
    for powerup in collected {
        state.effects.activate(powerup.kind, powerup.duration_ticks);
        state.emit(GameEvent::PowerUpCollected {
            kind: powerup.kind,
            at: powerup.center(),
        });
    }
    if let Some(newest) = state.obstacles.last().cloned() {
        if let Some(kind) = roll_spawn(&tuning, &mut state.rng) {
            let id = state.next_entity_id();
            state.powerups.push(place_powerup(id, kind, &newest, &tuning));
        }
    }
    advance_powerups(&mut state.powerups, speed);
    state.evaluate_achievements();

    // --- PARTICLES ---
    state.particles.update();
}

/// Demo pilot: flap when falling below a line just under the next gap centre
fn autopilot_wants_flap(state: &GameState) -> bool {
    let actor = &state.actor;
    let target = state
        .obstacles
        .iter()
        .find(|o| o.right() >= actor.pos.x)
        .map(|o| o.gap_center + o.gap_height * 0.2)
        .unwrap_or(state.tuning.ground_level() * 0.5);
    actor.center().y > target && actor.vel >= 0.0
}
