//! Single-file snapshot storage.

pub mod snapshot;

pub use snapshot::{Snapshot, TeamRecord};

use crate::{
    randomizer::Randomizer,
    tournament::{errors::TournamentResult, manager::TournamentManager},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Reads and writes one tournament snapshot file
#[derive(Debug, Clone)]
pub struct TournamentStore {
    path: PathBuf,
}

impl TournamentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the snapshot and rebuild the session around `rng`
    pub fn load(&self, rng: Randomizer) -> TournamentResult<TournamentManager> {
        let json = fs::read_to_string(&self.path)?;
        let manager = Snapshot::from_json(&json)?.restore(rng)?;
        log::info!("Loaded tournament from {}", self.path.display());
        Ok(manager)
    }

    /// Write the session, replacing any previous file
    pub fn save(&self, manager: &TournamentManager) -> TournamentResult<()> {
        let json = Snapshot::capture(manager).to_json()?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Saved tournament to {}", self.path.display());
        Ok(())
    }
}
