//! JSON snapshot of a tournament session.
//!
//! Only names, pool labels, the game log and the pool settings are trusted on
//! load. The per-team numbers are written for readers of the file and are
//! recomputed from the game log when the snapshot is restored.

use crate::{
    randomizer::Randomizer,
    tournament::{
        config::{DEFAULT_POOL_COUNT, DEFAULT_POOL_SIZE, TournamentConfig},
        errors::{TournamentError, TournamentResult},
        manager::TournamentManager,
        models::{Game, MAX_SCORE, PoolId, Team, TeamStats, pool_label},
    },
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, io};

fn default_pool_count() -> u32 {
    DEFAULT_POOL_COUNT
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

/// Persisted team row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub runs_for: u32,
    #[serde(default)]
    pub runs_against: u32,
    #[serde(default)]
    pub run_differential: i64,
    /// `"Pool <n>"`, or empty when banked
    #[serde(default)]
    pub pool: String,
    #[serde(default)]
    pub games_played: u32,
}

impl TeamRecord {
    fn stats(&self) -> TeamStats {
        TeamStats {
            wins: self.wins,
            losses: self.losses,
            games_played: self.games_played,
            runs_for: self.runs_for,
            runs_against: self.runs_against,
        }
    }
}

impl From<&Team> for TeamRecord {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            wins: team.stats.wins,
            losses: team.stats.losses,
            runs_for: team.stats.runs_for,
            runs_against: team.stats.runs_against,
            run_differential: team.stats.run_differential(),
            pool: pool_label(team.pool),
            games_played: team.stats.games_played,
        }
    }
}

/// Whole-session snapshot as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub teams: Vec<TeamRecord>,
    pub games: Vec<Game>,
    #[serde(default = "default_pool_count")]
    pub pool_count: u32,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Snapshot {
    /// Capture the current state of a session
    pub fn capture(manager: &TournamentManager) -> Self {
        let config = manager.config();
        Self {
            teams: manager.teams().map(TeamRecord::from).collect(),
            games: manager.games().to_vec(),
            pool_count: config.pool_count,
            pool_size: config.pool_size,
        }
    }

    /// Parse a snapshot. Anything that is not a well-typed snapshot object is
    /// reported as `MalformedSnapshot`.
    pub fn from_json(json: &str) -> TournamentResult<Self> {
        serde_json::from_str(json).map_err(|e| TournamentError::MalformedSnapshot(e.to_string()))
    }

    /// Render as JSON indented by four spaces
    pub fn to_json(&self) -> TournamentResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer).map_err(io::Error::from)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    /// Rebuild a session.
    ///
    /// Pool membership comes from each team's label alone. A label that does
    /// not parse, or names a pool beyond `pool_count`, banks the team. Stats
    /// are replayed from the game log.
    pub fn restore(self, rng: Randomizer) -> TournamentResult<TournamentManager> {
        let config = TournamentConfig {
            pool_count: self.pool_count,
            pool_size: self.pool_size,
        };
        config
            .validate()
            .map_err(|e| TournamentError::MalformedSnapshot(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut teams = Vec::with_capacity(self.teams.len());
        let mut persisted = Vec::with_capacity(self.teams.len());
        for record in &self.teams {
            if record.name.trim().is_empty() || record.name.trim() != record.name {
                return Err(TournamentError::MalformedSnapshot(format!(
                    "Invalid team name {:?}",
                    record.name
                )));
            }
            if !seen.insert(record.name.as_str()) {
                return Err(TournamentError::MalformedSnapshot(format!(
                    "Duplicate team '{}'",
                    record.name
                )));
            }

            let pool = PoolId::parse_label(&record.pool).filter(|p| p.number() <= config.pool_count);
            if pool.is_none() && !record.pool.is_empty() {
                log::warn!(
                    "Team '{}' has unknown pool label {:?}, leaving it unassigned",
                    record.name,
                    record.pool
                );
            }

            let mut team = Team::new(record.name.clone());
            team.pool = pool;
            teams.push(team);
            persisted.push((record.name.as_str(), record.stats(), record.run_differential));
        }

        if let Some(game) = self.games.iter().find(|g| g.team1 == g.team2) {
            return Err(TournamentError::MalformedSnapshot(format!(
                "Game of '{}' against itself",
                game.team1
            )));
        }
        if let Some(game) = self.games.iter().find(|g| !g.scores_in_range()) {
            return Err(TournamentError::MalformedSnapshot(format!(
                "Game '{}' vs '{}' has a score above {MAX_SCORE}",
                game.team1, game.team2
            )));
        }

        let manager = TournamentManager::from_parts(config, teams, self.games, rng)
            .map_err(|e| TournamentError::MalformedSnapshot(e.to_string()))?;

        let healed = persisted
            .iter()
            .filter(|(name, stats, differential)| {
                manager.team(name).is_some_and(|t| {
                    t.stats != *stats || t.stats.run_differential() != *differential
                })
            })
            .count();
        if healed > 0 {
            log::warn!(
                "Recomputed stats for {} teams that disagreed with the game log",
                healed
            );
        }

        let orphans = manager.games().iter().filter(|g| manager.is_orphan(g)).count();
        log::info!(
            "Restored {} teams and {} games ({} orphaned) in {} pools",
            manager.registry().len(),
            manager.games().len(),
            orphans,
            config.pool_count
        );
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restore(json: &str) -> TournamentResult<TournamentManager> {
        Snapshot::from_json(json)?.restore(Randomizer::seeded(1))
    }

    #[test]
    fn test_capture_and_restore() {
        let mut manager = TournamentManager::demo(Randomizer::seeded(4)).unwrap();
        manager.add_team("Bench").unwrap();

        let json = Snapshot::capture(&manager).to_json().unwrap();
        let restored = restore(&json).unwrap();

        assert_eq!(restored.games(), manager.games());
        assert_eq!(restored.config(), manager.config());
        let before: Vec<_> = manager.teams().cloned().collect();
        let after: Vec<_> = restored.teams().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_output_shape() {
        let mut manager =
            TournamentManager::with_randomizer(TournamentConfig::default(), Randomizer::seeded(1))
                .unwrap();
        manager.add_team("A").unwrap();
        manager.add_team("B").unwrap();
        manager.move_team("A", PoolId::new(2)).unwrap();
        manager.add_game(Game::new("A", 3, "B", 5)).unwrap();

        let json = Snapshot::capture(&manager).to_json().unwrap();
        assert!(json.starts_with("{\n    \"teams\": ["));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["teams"][0]["pool"], "Pool 2");
        assert_eq!(value["teams"][1]["pool"], "");
        assert_eq!(value["teams"][0]["run_differential"], -2);
        assert_eq!(value["games"][0]["score2"], 5);
        assert_eq!(value["pool_count"], 5);
        assert_eq!(value["pool_size"], 4);
    }

    #[test]
    fn test_stale_stats_are_recomputed() {
        let json = r#"{
            "teams": [
                {"name": "A", "wins": 9, "losses": 0, "runs_for": 0, "runs_against": 0,
                 "run_differential": 44, "pool": "Pool 1", "games_played": 9},
                {"name": "B", "pool": "Pool 1"}
            ],
            "games": [{"team1": "A", "score1": 1, "team2": "B", "score2": 4}],
            "pool_count": 2,
            "pool_size": 4
        }"#;
        let manager = restore(json).unwrap();

        let a = manager.team("A").unwrap().stats;
        assert_eq!((a.wins, a.losses, a.games_played), (0, 1, 1));
        assert_eq!(a.run_differential(), -3);
        assert_eq!(manager.team("B").unwrap().stats.wins, 1);
    }

    #[test]
    fn test_missing_pool_settings_use_defaults() {
        let manager = restore(r#"{"teams": [], "games": []}"#).unwrap();
        assert_eq!(manager.config().pool_count, DEFAULT_POOL_COUNT);
        assert_eq!(manager.config().pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_unknown_pool_labels_bank_the_team() {
        let json = r#"{
            "teams": [
                {"name": "A", "pool": "Pool 3"},
                {"name": "B", "pool": "Group 1"},
                {"name": "C", "pool": "Pool 2"}
            ],
            "games": [],
            "pool_count": 2
        }"#;
        let manager = restore(json).unwrap();
        assert!(manager.team("A").unwrap().pool.is_none());
        assert!(manager.team("B").unwrap().pool.is_none());
        assert_eq!(manager.team("C").unwrap().pool, PoolId::new(2));
    }

    #[test]
    fn test_orphan_games_survive_round_trip() {
        let json = r#"{
            "teams": [{"name": "A"}],
            "games": [{"team1": "A", "score1": 6, "team2": "Retired", "score2": 2}]
        }"#;
        let manager = restore(json).unwrap();
        assert_eq!(manager.games().len(), 1);
        assert_eq!(manager.team("A").unwrap().stats.wins, 1);

        let again = restore(&Snapshot::capture(&manager).to_json().unwrap()).unwrap();
        assert_eq!(again.games(), manager.games());
    }

    #[test]
    fn test_malformed_inputs() {
        let cases = [
            "not json",
            r#"{"games": []}"#,
            r#"{"teams": []}"#,
            r#"{"teams": [{"name": ""}], "games": []}"#,
            r#"{"teams": [{"name": "A"}, {"name": "A"}], "games": []}"#,
            r#"{"teams": [{"name": "A", "wins": -1}], "games": []}"#,
            r#"{"teams": [{"name": "A", "wins": "3"}], "games": []}"#,
            r#"{"teams": [{"name": "A"}], "games": [{"team1": "A", "score1": 1, "team2": "A", "score2": 0}]}"#,
            r#"{"teams": [], "games": [{"team1": "A", "score1": -4, "team2": "B", "score2": 0}]}"#,
            r#"{"teams": [], "games": [], "pool_count": 0}"#,
            r#"{"teams": [{"name": "A"}, {"name": "B"}], "games": [{"team1": "A", "score1": 4294967295, "team2": "B", "score2": 0}, {"team1": "A", "score1": 1, "team2": "B", "score2": 0}]}"#,
        ];
        for json in cases {
            assert!(
                matches!(restore(json), Err(TournamentError::MalformedSnapshot(_))),
                "expected malformed snapshot for {json}"
            );
        }
    }
}
