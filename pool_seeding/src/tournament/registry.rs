//! Team registry keyed by team name.

use super::{
    errors::{TournamentError, TournamentResult},
    models::Team,
};
use std::collections::HashMap;

/// Owns every registered team.
///
/// Teams keep their registration order, which is the iteration order used by
/// schedule generation and the stable base order for seeding. Lookups go
/// through the name index.
#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    index: HashMap<String, usize>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team. The name is trimmed first.
    pub fn add(&mut self, name: &str) -> TournamentResult<&Team> {
        let name = normalize_name(name)?;
        if self.index.contains_key(&name) {
            return Err(TournamentError::DuplicateName(name));
        }

        let idx = self.teams.len();
        self.index.insert(name.clone(), idx);
        self.teams.push(Team::new(name));
        Ok(&self.teams[idx])
    }

    /// Insert a fully built team (snapshot restore)
    pub(crate) fn insert(&mut self, team: Team) -> TournamentResult<()> {
        let name = normalize_name(&team.name)?;
        if name != team.name {
            return Err(TournamentError::InvalidName(team.name));
        }
        if self.index.contains_key(&name) {
            return Err(TournamentError::DuplicateName(name));
        }

        self.index.insert(name, self.teams.len());
        self.teams.push(team);
        Ok(())
    }

    /// Remove a team and return it
    pub fn remove(&mut self, name: &str) -> TournamentResult<Team> {
        let idx = self
            .index
            .remove(name)
            .ok_or_else(|| TournamentError::TeamNotFound(name.to_string()))?;

        let team = self.teams.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Ok(team)
    }

    /// Change a team's name in place.
    ///
    /// Returns the trimmed new name. Renaming a team to its current name is a
    /// no-op.
    pub fn rename(&mut self, old: &str, new: &str) -> TournamentResult<String> {
        let new = normalize_name(new)?;
        let idx = *self
            .index
            .get(old)
            .ok_or_else(|| TournamentError::TeamNotFound(old.to_string()))?;

        if new == old {
            return Ok(new);
        }
        if self.index.contains_key(&new) {
            return Err(TournamentError::DuplicateName(new));
        }

        self.index.remove(old);
        self.index.insert(new.clone(), idx);
        self.teams[idx].name = new.clone();
        Ok(new)
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.index.get(name).map(|&idx| &self.teams[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.index.get(name).map(|&idx| &mut self.teams[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Teams in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Trim a team name and reject empty results
pub fn normalize_name(name: &str) -> TournamentResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}
