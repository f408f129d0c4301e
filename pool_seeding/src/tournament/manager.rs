//! Tournament session: the one owner of teams, pools, the game log and the
//! random source.

use super::{
    config::{self, ScheduleOptions, TournamentConfig},
    errors::{TournamentError, TournamentResult},
    ledger,
    models::{Game, GameIndex, HistoryEntry, MAX_SCORE, Pool, PoolId, Seed, Team, pool_label},
    registry::{TeamRegistry, normalize_name},
};
use crate::{
    randomizer::Randomizer,
    scheduling::{
        generator::{self, Shortfall},
        pools,
    },
    seeding,
};
use serde::Serialize;

/// Number of teams in the demo tournament
pub const DEMO_TEAM_COUNT: usize = 20;

/// Games per team in the demo tournament (a full round robin in pools of four)
pub const DEMO_GAMES_PER_TEAM: i64 = 3;

/// Summary of a committed schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub games_scheduled: usize,
    /// Teams left under the games-per-team target
    pub shortfall: Vec<Shortfall>,
}

/// Tournament manager
///
/// Every public method is one atomic transition: it validates first and only
/// then mutates, so a returned error means nothing changed.
#[derive(Debug, Clone)]
pub struct TournamentManager {
    config: TournamentConfig,
    registry: TeamRegistry,
    games: Vec<Game>,
    rng: Randomizer,
}

impl TournamentManager {
    /// Create an empty tournament with an OS-seeded random source
    pub fn new(config: TournamentConfig) -> TournamentResult<Self> {
        Self::with_randomizer(config, Randomizer::new())
    }

    /// Create an empty tournament drawing from the given random source
    pub fn with_randomizer(config: TournamentConfig, rng: Randomizer) -> TournamentResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: TeamRegistry::new(),
            games: Vec::new(),
            rng,
        })
    }

    /// Rebuild a session from persisted parts.
    ///
    /// Stats carried on `teams` are discarded and recomputed by replaying
    /// `games` in order.
    pub(crate) fn from_parts(
        config: TournamentConfig,
        teams: Vec<Team>,
        games: Vec<Game>,
        rng: Randomizer,
    ) -> TournamentResult<Self> {
        let mut manager = Self::with_randomizer(config, rng)?;
        for team in teams {
            manager.registry.insert(team)?;
        }
        ledger::replay(&mut manager.registry, &games);
        manager.games = games;
        Ok(manager)
    }

    /// Demo tournament: twenty teams dealt into five pools of four, with a
    /// full in-pool round robin of random scores.
    pub fn demo(rng: Randomizer) -> TournamentResult<Self> {
        let mut manager = Self::with_randomizer(TournamentConfig::default(), rng)?;
        for i in 1..=DEMO_TEAM_COUNT {
            manager.add_team(&format!("Team {i}"))?;
        }
        manager.assign_random_pools();
        manager.generate_schedule(&ScheduleOptions::new(DEMO_GAMES_PER_TEAM).with_random_scores())?;
        Ok(manager)
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    /// Teams in registration order
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.registry.iter()
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.registry.get(name)
    }

    /// The game log in order
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game(&self, idx: GameIndex) -> Option<&Game> {
        self.games.get(idx)
    }

    /// Whether either side of the game names a team that is no longer registered
    pub fn is_orphan(&self, game: &Game) -> bool {
        !self.registry.contains(&game.team1) || !self.registry.contains(&game.team2)
    }

    /// Every pool slot with its members
    pub fn pools(&self) -> Vec<Pool> {
        pools::pools(&self.registry, self.config.pool_count)
    }

    /// Banked team names
    pub fn unassigned(&self) -> Vec<String> {
        pools::unassigned(&self.registry)
    }

    /// Register a new team with no pool.
    ///
    /// Reusing the name of a removed team picks up the games it left in the
    /// log, and stats are replayed so they match the log.
    pub fn add_team(&mut self, name: &str) -> TournamentResult<&Team> {
        let name = self.registry.add(name)?.name.clone();
        log::info!("Registered team '{}'", name);

        let history = self.games.iter().filter(|g| g.involves(&name)).count();
        self.reattach_games(&name, history);
        self.registry
            .get(&name)
            .ok_or(TournamentError::TeamNotFound(name))
    }

    /// Remove a team.
    ///
    /// The team leaves its pool with it. Games that mention it stay in the log
    /// as orphans and the opponents keep the stats those games gave them.
    pub fn remove_team(&mut self, name: &str) -> TournamentResult<Team> {
        let team = self.registry.remove(name)?;
        let orphaned = self.games.iter().filter(|g| g.involves(&team.name)).count();
        log::info!(
            "Removed team '{}' ({} games left as history)",
            team.name,
            orphaned
        );
        Ok(team)
    }

    /// Rename a team everywhere it is referenced.
    ///
    /// # Arguments
    ///
    /// * `old` - Current name
    /// * `new` - New name, trimmed before use
    ///
    /// # Returns
    ///
    /// * `TournamentResult<String>` - The stored new name or error
    pub fn rename_team(&mut self, old: &str, new: &str) -> TournamentResult<String> {
        let target = normalize_name(new)?;
        if self.registry.contains(old)
            && !self.registry.contains(&target)
            && self.games.iter().any(|g| g.is_between(old, &target))
        {
            return Err(TournamentError::InvalidGame(format!(
                "Renaming '{old}' to '{target}' would leave it playing against itself"
            )));
        }

        let new = self.registry.rename(old, &target)?;
        if new == old {
            return Ok(new);
        }

        let history = self.games.iter().filter(|g| g.involves(&new)).count();

        let mut touched = 0;
        for game in &mut self.games {
            if game.team1 == old {
                game.team1.clone_from(&new);
                touched += 1;
            }
            if game.team2 == old {
                game.team2.clone_from(&new);
                touched += 1;
            }
        }

        log::info!(
            "Renamed team '{}' to '{}' ({} game references updated)",
            old,
            new,
            touched
        );
        self.reattach_games(&new, history);
        Ok(new)
    }

    /// Change the number of pools. Every team is banked.
    pub fn set_pool_count(&mut self, pool_count: i64) -> TournamentResult<()> {
        self.config.pool_count = config::positive("Pool count", pool_count)?;
        pools::clear(&mut self.registry);
        log::info!(
            "Pool count set to {}, all teams unassigned",
            self.config.pool_count
        );
        Ok(())
    }

    /// Change the informational target pool size
    pub fn set_pool_size(&mut self, pool_size: i64) -> TournamentResult<()> {
        self.config.pool_size = config::positive("Pool size", pool_size)?;
        log::debug!("Pool size set to {}", self.config.pool_size);
        Ok(())
    }

    /// Bank every team. Stats and the game log are kept.
    pub fn clear_pools(&mut self) {
        pools::clear(&mut self.registry);
        log::info!("Cleared all pools");
    }

    /// Deal every team into the pools at random.
    ///
    /// The previous schedule no longer matches the pools, so stats are reset
    /// and the game log is cleared.
    pub fn assign_random_pools(&mut self) {
        pools::full_random_assign(&mut self.registry, self.config.pool_count, &mut self.rng);
        self.discard_schedule();
    }

    /// Place banked teams into the smallest pools.
    ///
    /// Resets stats and clears the game log like [`Self::assign_random_pools`].
    pub fn assign_remaining_pools(&mut self) {
        pools::assign_unassigned_balanced(&mut self.registry, self.config.pool_count, &mut self.rng);
        self.discard_schedule();
    }

    /// Move one team to a pool, or bank it with `None`. Stats are untouched.
    pub fn move_team(&mut self, name: &str, pool: Option<PoolId>) -> TournamentResult<()> {
        pools::move_team(&mut self.registry, name, pool, self.config.pool_count)?;
        log::debug!("Moved team '{}' to '{}'", name, pool_label(pool));
        Ok(())
    }

    /// Record a game result and return its position in the log
    pub fn add_game(&mut self, game: Game) -> TournamentResult<GameIndex> {
        self.validate_game(&game)?;
        ledger::apply(&mut self.registry, &game);
        self.games.push(game);
        Ok(self.games.len() - 1)
    }

    /// Replace the game at `idx`, undoing its old effect first
    pub fn edit_game(&mut self, idx: GameIndex, game: Game) -> TournamentResult<()> {
        if idx >= self.games.len() {
            return Err(TournamentError::GameNotFound(idx));
        }
        self.validate_game(&game)?;

        let old = std::mem::replace(&mut self.games[idx], game);
        ledger::revert(&mut self.registry, &old);
        ledger::apply(&mut self.registry, &self.games[idx]);
        log::debug!("Edited game {}", idx);
        Ok(())
    }

    /// Delete the game at `idx` and undo its effect
    pub fn remove_game(&mut self, idx: GameIndex) -> TournamentResult<Game> {
        if idx >= self.games.len() {
            return Err(TournamentError::GameNotFound(idx));
        }

        let game = self.games.remove(idx);
        ledger::revert(&mut self.registry, &game);
        log::debug!("Removed game {}", idx);
        Ok(game)
    }

    /// Replace the game log with a freshly generated schedule.
    ///
    /// Planning runs first; on error no stat or game is touched. On success
    /// every team's stats are reset (the log they were derived from is gone)
    /// and the planned games are recorded in generation order.
    pub fn generate_schedule(&mut self, options: &ScheduleOptions) -> TournamentResult<ScheduleReport> {
        let plan = generator::plan_schedule(
            &self.registry,
            self.config.pool_count,
            options,
            &mut self.rng,
        )?;

        ledger::reset_all(&mut self.registry);
        self.games.clear();
        for game in plan.games {
            ledger::apply(&mut self.registry, &game);
            self.games.push(game);
        }

        for short in &plan.shortfall {
            log::warn!(
                "Team '{}' scheduled for {} of {} games",
                short.team,
                short.games_played,
                short.target
            );
        }
        log::info!(
            "Generated schedule with {} games ({} teams short)",
            self.games.len(),
            plan.shortfall.len()
        );

        Ok(ScheduleReport {
            games_scheduled: self.games.len(),
            shortfall: plan.shortfall,
        })
    }

    /// Rank every team. Only the random source advances.
    pub fn compute_seeding(&mut self) -> Vec<Seed> {
        seeding::compute_seeding(&self.registry, &self.games, &mut self.rng)
    }

    /// Every game the team played, in log order, from its own side
    pub fn team_history(&self, name: &str) -> TournamentResult<Vec<HistoryEntry>> {
        if !self.registry.contains(name) {
            return Err(TournamentError::TeamNotFound(name.to_string()));
        }

        Ok(self
            .games
            .iter()
            .filter_map(|g| HistoryEntry::from_game(name, g))
            .map(|mut entry| {
                entry.opponent_pool =
                    pool_label(self.registry.get(&entry.opponent).and_then(|t| t.pool));
                entry
            })
            .collect())
    }

    fn validate_game(&self, game: &Game) -> TournamentResult<()> {
        if game.team1 == game.team2 {
            return Err(TournamentError::InvalidGame(format!(
                "'{}' cannot play against itself",
                game.team1
            )));
        }
        if !game.scores_in_range() {
            return Err(TournamentError::InvalidGame(format!(
                "Scores must be between 0 and {MAX_SCORE}, got {}-{}",
                game.score1, game.score2
            )));
        }
        for name in [&game.team1, &game.team2] {
            if !self.registry.contains(name) {
                return Err(TournamentError::TeamNotFound(name.clone()));
            }
        }
        Ok(())
    }

    /// Replay the log once a name that removed-team games still mention is
    /// registered again
    fn reattach_games(&mut self, name: &str, orphaned: usize) {
        if orphaned == 0 {
            return;
        }
        ledger::replay(&mut self.registry, &self.games);
        log::info!("Team '{}' took over {} games from the log", name, orphaned);
    }

    fn discard_schedule(&mut self) {
        ledger::reset_all(&mut self.registry);
        if !self.games.is_empty() {
            log::info!("Discarded {} games after pool reassignment", self.games.len());
        }
        self.games.clear();
    }
}
