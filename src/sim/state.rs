//! Game state and the command surface
//!
//! All mutable run state lives here and is owned exclusively by the
//! simulation. Hosts drive it through guarded commands and read it back
//! through [`Snapshot`]s and drained events.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::achievements::Achievements;
use super::actor::Actor;
use super::clock::{Clock, SimulationState};
use super::events::GameEvent;
use super::obstacles::Obstacle;
use super::particles::ParticleSystem;
use super::powerups::{ActiveEffects, PowerUp, PowerUpKind};
use super::score::ScoreState;
use super::snapshot::Snapshot;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Complete simulation state for one session (one or more runs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the gameplay RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub clock: Clock,
    pub actor: Actor,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active pickups in spawn order
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub score: ScoreState,
    pub achievements: Achievements,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Gameplay RNG: obstacle gaps and pickup rolls only
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new state in `Start` with default settings
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_settings(seed, tuning, &Settings::default())
    }

    pub fn with_settings(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        Self {
            seed,
            tuning,
            clock: Clock::new(),
            actor: Actor::new(&tuning),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            score: ScoreState::new(0, &tuning),
            achievements: Achievements::empty(),
            particles: ParticleSystem::new(seed, &tuning, settings.max_particles()),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn phase(&self) -> SimulationState {
        self.clock.state()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Merge progress read from storage; never lowers the best score
    pub fn merge_progress(&mut self, best_score: u64, achievements: Achievements) {
        self.score.merge_stored_best(best_score);
        self.achievements |= achievements;
    }

    /// Start -> Playing with a fresh run
    pub fn start(&mut self) -> bool {
        if !self.clock.start() {
            return false;
        }
        self.begin_run();
        true
    }

    /// GameOver -> Playing with a fresh run
    pub fn restart(&mut self) -> bool {
        if !self.clock.restart() {
            return false;
        }
        self.begin_run();
        true
    }

    fn begin_run(&mut self) {
        self.actor = Actor::new(&self.tuning);
        self.obstacles.clear();
        self.powerups.clear();
        self.effects = ActiveEffects::default();
        self.score.reset_run(&self.tuning);
        self.particles.clear();
        log::info!("Run started (seed {}, best {})", self.seed, self.score.best);
        self.emit(GameEvent::Started);
    }

    pub fn pause(&mut self) -> bool {
        let applied = self.clock.pause();
        if applied {
            self.emit(GameEvent::Paused);
        }
        applied
    }

    pub fn resume(&mut self) -> bool {
        let applied = self.clock.resume();
        if applied {
            self.emit(GameEvent::Resumed);
        }
        applied
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase() {
            SimulationState::Playing => self.pause(),
            SimulationState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Set the actor's velocity to the flap impulse (Playing only)
    pub fn flap(&mut self) -> bool {
        if !self.clock.is_playing() {
            return false;
        }
        self.actor.flap(self.tuning.flap_impulse);
        self.emit(GameEvent::Flap);
        true
    }

    /// Spend an active shield on a fatal collision
    pub(crate) fn absorb_with_shield(&mut self) -> bool {
        if !self.effects.consume(PowerUpKind::Shield) {
            return false;
        }
        self.emit(GameEvent::ShieldAbsorbed);
        if self.achievements.unlock(Achievements::SHIELD_SAVE) {
            self.emit(GameEvent::AchievementUnlocked(Achievements::SHIELD_SAVE));
        }
        true
    }

    /// Unlock any achievements earned by the current score and effects
    pub(crate) fn evaluate_achievements(&mut self) {
        for flag in self.achievements.evaluate(self.score.score, &self.effects) {
            log::info!("Achievement unlocked: {}", flag.title());
            self.emit(GameEvent::AchievementUnlocked(flag));
        }
    }

    /// Playing -> GameOver; obstacles are retired with the run
    pub(crate) fn end_run(&mut self) {
        if !self.clock.finish() {
            return;
        }
        self.actor.alive = false;
        self.obstacles.clear();
        let final_score = self.score.score;
        if self.score.is_new_best() {
            log::info!("New best score: {} (was {})", final_score, self.score.best_at_start);
            self.emit(GameEvent::NewBest { score: final_score });
        }
        log::info!("Game over after {} ticks, score {}", self.clock.ticks(), final_score);
        self.emit(GameEvent::GameOver { final_score });
    }

    /// Queue an event and let the particle system react to it
    pub(crate) fn emit(&mut self, event: GameEvent) {
        let origin = match &event {
            GameEvent::PowerUpCollected { at, .. } => *at,
            _ => self.actor.center(),
        };
        self.particles.on_event(&event, origin);
        self.events.push(event);
    }

    /// Events emitted since the last drain, in emission order
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Immutable view for renderers; has no side effects
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            tick: self.clock.ticks(),
            actor: self.actor.clone(),
            obstacles: self.obstacles.clone(),
            powerups: self.powerups.clone(),
            particles: self.particles.particles().to_vec(),
            score: self.score.score,
            best_score: self.score.best,
            level: self.score.level,
            effects: self.effects.active(),
            achievements: self.achievements,
            ground_level: self.tuning.ground_level(),
        }
    }
}
