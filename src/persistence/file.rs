//! JSON file backed progress store

use std::fs;
use std::path::{Path, PathBuf};

use super::{Progress, ProgressStore, parse_progress};
use crate::error::{Error, Result};
use crate::sim::Achievements;

/// Outcome of reading the progress file
#[derive(Debug, PartialEq)]
enum Stored {
    Missing,
    /// Unreadable or corrupt
    Unusable,
    Found(Progress),
}

impl Stored {
    fn progress(self) -> Progress {
        match self {
            Stored::Found(progress) => progress,
            Stored::Missing | Stored::Unusable => Progress::default(),
        }
    }
}

/// Stores [`Progress`] as a small JSON file
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read without lifecycle logging; faults are still warned about
    fn read(&self) -> Stored {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Stored::Missing,
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                return Stored::Unusable;
            }
        };
        match parse_progress(&raw) {
            Some(progress) => Stored::Found(progress),
            None => {
                log::warn!("Corrupt progress file {}, using defaults", self.path.display());
                Stored::Unusable
            }
        }
    }

    fn write(&self, progress: &Progress) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(progress)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(())
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Progress {
        match self.read() {
            Stored::Missing => {
                log::info!("No progress file at {}, starting fresh", self.path.display());
                Progress::default()
            }
            Stored::Unusable => Progress::default(),
            Stored::Found(progress) => {
                log::info!(
                    "Loaded progress from {} (best {})",
                    self.path.display(),
                    progress.best_score
                );
                progress
            }
        }
    }

    fn save_best(&mut self, best_score: u64) -> Result<()> {
        let mut progress = self.read().progress();
        if !progress.record_best(best_score) {
            return Ok(());
        }
        self.write(&progress)?;
        log::info!("Best score {} saved to {}", best_score, self.path.display());
        Ok(())
    }

    fn save_achievements(&mut self, achievements: Achievements) -> Result<()> {
        let mut progress = self.read().progress();
        if !progress.record_achievements(achievements) {
            return Ok(());
        }
        self.write(&progress)
    }
}
