//! Host-facing session glue
//!
//! A [`Session`] owns one [`GameState`] and a [`ProgressStore`]. It reads
//! stored progress once when a run begins and writes back only what changed:
//! a new best at game over and newly unlocked achievements.

use crate::persistence::ProgressStore;
use crate::settings::Settings;
use crate::sim::{Frame, GameEvent, GameState, SimulationState, Snapshot, TickInput, frame};
use crate::tuning::Tuning;

/// A simulation bound to its progress store
pub struct Session<S: ProgressStore> {
    state: GameState,
    store: S,
    /// Progress read at construction that the first run has not used yet
    preloaded: bool,
}

impl<S: ProgressStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, store: S) -> Self {
        let mut state = GameState::with_settings(seed, tuning, settings);
        let progress = store.load();
        state.merge_progress(progress.best_score, progress.achievements);
        Self {
            state,
            store,
            preloaded: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> SimulationState {
        self.state.phase()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Start -> Playing
    pub fn start(&mut self) -> bool {
        if self.phase() != SimulationState::Start {
            return false;
        }
        self.refresh_progress();
        self.state.start()
    }

    /// GameOver -> Playing
    pub fn restart(&mut self) -> bool {
        if self.phase() != SimulationState::GameOver {
            return false;
        }
        self.refresh_progress();
        self.state.restart()
    }

    pub fn pause(&mut self) -> bool {
        self.state.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.state.resume()
    }

    pub fn flap(&mut self) -> bool {
        self.state.flap()
    }

    /// Run one frame and persist whatever it improved
    ///
    /// Events from direct commands issued since the last frame are included
    /// in the returned frame ahead of the tick's own events.
    pub fn frame(&mut self, input: &TickInput) -> Frame {
        if input.start
            && matches!(
                self.phase(),
                SimulationState::Start | SimulationState::GameOver
            )
        {
            self.refresh_progress();
        }
        let out = frame(&mut self.state, input);
        for event in &out.events {
            self.persist(event);
        }
        out
    }

    /// Read the store once per run; the first run reuses the construction read
    fn refresh_progress(&mut self) {
        if std::mem::take(&mut self.preloaded) {
            return;
        }
        let progress = self.store.load();
        self.state
            .merge_progress(progress.best_score, progress.achievements);
    }

    fn persist(&mut self, event: &GameEvent) {
        let result = match event {
            GameEvent::NewBest { score } => self.store.save_best(*score),
            GameEvent::AchievementUnlocked(flag) => self.store.save_achievements(*flag),
            _ => return,
        };
        if let Err(e) = result {
            log::warn!("Failed to persist progress: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{JsonFileStore, MemoryStore, Progress};
    use crate::sim::Achievements;
    use tempfile::TempDir;

    fn crash(session: &mut Session<impl ProgressStore>) -> Frame {
        let ground = session.state.tuning.ground_level();
        session.state.actor.pos.y = ground;
        session.frame(&TickInput::default())
    }

    fn start_input() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_loads_stored_best() {
        let store = MemoryStore::with_progress(Progress {
            best_score: 40,
            achievements: Achievements::TEN,
        });
        let session = Session::new(1, Tuning::default(), &Settings::default(), store);
        let snap = session.snapshot();
        assert_eq!(snap.best_score, 40);
        assert!(snap.achievements.contains(Achievements::TEN));
    }

    #[test]
    fn test_no_write_when_best_not_exceeded() {
        let store = MemoryStore::with_progress(Progress {
            best_score: 40,
            ..Progress::default()
        });
        let mut session = Session::new(1, Tuning::default(), &Settings::default(), store);
        session.frame(&start_input());
        let out = crash(&mut session);
        assert_eq!(out.snapshot.phase, SimulationState::GameOver);
        assert_eq!(session.store().writes(), 0);
        assert_eq!(session.store().load().best_score, 40);
    }

    #[test]
    fn test_new_best_written_once() {
        let mut session = Session::new(1, Tuning::default(), &Settings::default(), MemoryStore::new());
        assert!(session.start());
        for _ in 0..3 {
            session.state.score.award_clearance(false);
        }
        let out = crash(&mut session);
        assert!(out.events.contains(&GameEvent::NewBest { score: 3 }));
        assert_eq!(session.store().load().best_score, 3);
        assert_eq!(session.store().writes(), 1);
    }

    #[test]
    fn test_achievement_persisted() {
        let mut session = Session::new(1, Tuning::default(), &Settings::default(), MemoryStore::new());
        session.start();
        session.state.score.award_clearance(false);
        let out = session.frame(&TickInput::default());
        assert!(out
            .events
            .contains(&GameEvent::AchievementUnlocked(Achievements::FIRST_POINT)));
        assert!(session
            .store()
            .load()
            .achievements
            .contains(Achievements::FIRST_POINT));
    }

    #[test]
    fn test_restart_rereads_store() {
        let mut session = Session::new(1, Tuning::default(), &Settings::default(), MemoryStore::new());
        session.start();
        crash(&mut session);
        assert!(!session.start());

        session.store.save_best(99).unwrap();
        assert!(session.restart());
        assert_eq!(session.snapshot().best_score, 99);
        assert_eq!(session.snapshot().score, 0);
    }

    /// Memory store that counts reads
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        loads: std::cell::Cell<usize>,
    }

    impl ProgressStore for CountingStore {
        fn load(&self) -> Progress {
            self.loads.set(self.loads.get() + 1);
            self.inner.load()
        }

        fn save_best(&mut self, best_score: u64) -> crate::Result<()> {
            self.inner.save_best(best_score)
        }

        fn save_achievements(&mut self, achievements: Achievements) -> crate::Result<()> {
            self.inner.save_achievements(achievements)
        }
    }

    #[test]
    fn test_store_read_once_per_run() {
        let mut session = Session::new(1, Tuning::default(), &Settings::default(), CountingStore::default());
        session.frame(&start_input());
        session.frame(&TickInput::default());
        assert_eq!(session.store().loads.get(), 1);

        crash(&mut session);
        session.frame(&start_input());
        assert_eq!(session.phase(), SimulationState::Playing);
        assert_eq!(session.store().loads.get(), 2);

        crash(&mut session);
        assert!(session.restart());
        assert_eq!(session.store().loads.get(), 3);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        let mut session = Session::new(5, Tuning::default(), &Settings::default(), store);
        assert_eq!(session.snapshot().best_score, 0);

        session.frame(&start_input());
        session.state.score.award_clearance(true);
        crash(&mut session);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().best_score, 2);
    }
}
