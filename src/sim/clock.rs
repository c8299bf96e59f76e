//! Run state machine and tick counter
//!
//! The clock owns the single active [`SimulationState`] and decides whether a
//! frame advances the simulation. Every transition method is guarded: calling
//! it from the wrong state is a no-op that returns `false`.

use serde::{Deserialize, Serialize};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationState {
    /// Idle, waiting for an explicit start
    #[default]
    Start,
    /// Simulation advances every frame
    Playing,
    /// Simulation frozen, snapshots still produced
    Paused,
    /// Run ended, terminal until restart
    GameOver,
}

/// Fixed-cadence tick gate
#[derive(Debug, Clone, Default)]
pub struct Clock {
    state: SimulationState,
    /// Ticks simulated in the current run
    ticks: u64,
    /// Frames seen since construction (simulated or not)
    frames: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == SimulationState::Playing
    }

    /// Ticks simulated since the current run started
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start -> Playing
    pub fn start(&mut self) -> bool {
        self.enter_run(SimulationState::Start)
    }

    /// GameOver -> Playing
    pub fn restart(&mut self) -> bool {
        self.enter_run(SimulationState::GameOver)
    }

    fn enter_run(&mut self, from: SimulationState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = SimulationState::Playing;
        self.ticks = 0;
        true
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(SimulationState::Playing, SimulationState::Paused)
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        self.transition(SimulationState::Paused, SimulationState::Playing)
    }

    /// Playing -> GameOver
    pub fn finish(&mut self) -> bool {
        self.transition(SimulationState::Playing, SimulationState::GameOver)
    }

    fn transition(&mut self, from: SimulationState, to: SimulationState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }

    /// Count a frame; returns true if this frame should run a simulation tick
    pub fn advance(&mut self) -> bool {
        self.frames += 1;
        if self.is_playing() {
            self.ticks += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut clock = Clock::new();
        assert_eq!(clock.state(), SimulationState::Start);
        assert!(!clock.advance());

        assert!(clock.start());
        assert!(clock.advance());
        assert!(clock.pause());
        assert!(!clock.advance());
        assert!(clock.resume());
        assert!(clock.advance());
        assert_eq!(clock.ticks(), 2);
        assert_eq!(clock.frames(), 4);

        assert!(clock.finish());
        assert!(!clock.advance());
        assert!(clock.restart());
        assert_eq!(clock.ticks(), 0);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_guards_reject_invalid_transitions() {
        let mut clock = Clock::new();
        assert!(!clock.pause());
        assert!(!clock.resume());
        assert!(!clock.restart());
        assert!(!clock.finish());
        assert_eq!(clock.state(), SimulationState::Start);

        clock.start();
        assert!(!clock.start());
        assert!(!clock.restart());

        clock.finish();
        assert!(!clock.pause());
        assert!(!clock.start());
        assert_eq!(clock.state(), SimulationState::GameOver);
    }
}
