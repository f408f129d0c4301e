//! Interactive session: runs parsed commands against the tournament and
//! keeps the snapshot file up to date.

use crate::{
    commands::{Command, parse_command},
    config::CliConfig,
    render,
};
use anyhow::{Context, Result};
use pool_seeding::{
    PoolId, Randomizer, TournamentConfig, TournamentError, TournamentManager, TournamentResult,
    TournamentStore,
};

/// Command reference shown by `help`
pub const COMMANDS_HELP: &str = "\
Teams:
  teams                              List teams with their records
  add NAME                           Register a team
  remove NAME                        Remove a team (its games stay as history)
  rename OLD NEW                     Rename a team everywhere
  history NAME                       Show one team's games
Pools:
  pools                              List pools and unassigned teams
  pool-count N                       Set the number of pools (unassigns everyone)
  pool-size N                        Set the target pool size
  assign random|remaining|clear      Deal all teams, place unassigned teams, or clear pools
  move NAME POOL|none                Move a team to a pool or back to unassigned
Games:
  games                              List recorded games
  game TEAM1 SCORE1 TEAM2 SCORE2     Record a game
  edit N TEAM1 SCORE1 TEAM2 SCORE2   Replace game N
  delete N                           Delete game N
  schedule N [replays] [random]      Generate a schedule of N games per team
Seeding:
  seed                               Compute the final seeding
Session:
  new | demo                         Start an empty or a demo tournament
  save [PATH] | load PATH            Write or read a snapshot file
  help | quit

Quote names containing spaces: add \"Red Sox\"";

/// How to obtain the tournament at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// Load the snapshot file if it exists, otherwise start empty
    Resume,
    New,
    Demo,
}

/// Result of handling one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Session {
    manager: TournamentManager,
    store: TournamentStore,
    autosave: bool,
    seed: Option<u64>,
}

impl Session {
    pub fn new(
        manager: TournamentManager,
        store: TournamentStore,
        autosave: bool,
        seed: Option<u64>,
    ) -> Self {
        Self {
            manager,
            store,
            autosave,
            seed,
        }
    }

    /// Build the session described by the configuration
    pub fn open(config: &CliConfig, start: Start) -> Result<Self> {
        let store = TournamentStore::new(&config.file);
        let rng = randomizer(config.seed);

        let manager = match start {
            Start::Demo => TournamentManager::demo(rng).context("Failed to build demo tournament")?,
            Start::Resume if store.exists() => store
                .load(rng)
                .with_context(|| format!("Failed to load {}", store.path().display()))?,
            Start::Resume | Start::New => {
                TournamentManager::with_randomizer(TournamentConfig::default(), rng)?
            }
        };

        Ok(Self::new(manager, store, config.autosave, config.seed))
    }

    pub fn manager(&self) -> &TournamentManager {
        &self.manager
    }

    pub fn store(&self) -> &TournamentStore {
        &self.store
    }

    /// Parse and run one line of input. Errors are turned into text.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::Text(String::new());
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => return Reply::Text(e.to_string()),
        };

        match self.execute(command) {
            Ok(reply) => reply,
            Err(e) if e.is_recoverable() => Reply::Text(format!(
                "Warning: {e}\nHint: add 'replays' to the schedule command to allow repeat matchups"
            )),
            Err(e) => Reply::Text(format!("Error: {e}")),
        }
    }

    /// Run a parsed command, autosaving after successful changes
    pub fn execute(&mut self, command: Command) -> TournamentResult<Reply> {
        let mutating = command.is_mutating();
        let reply = self.apply(command)?;

        if mutating && self.autosave {
            if let Err(e) = self.store.save(&self.manager) {
                log::error!("Autosave to {} failed: {}", self.store.path().display(), e);
                if let Reply::Text(text) = reply {
                    return Ok(Reply::Text(format!("{text}\nWarning: autosave failed: {e}")));
                }
            }
        }

        Ok(reply)
    }

    fn apply(&mut self, command: Command) -> TournamentResult<Reply> {
        let text = match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => COMMANDS_HELP.to_string(),
            Command::ListTeams => render::teams(&self.manager),
            Command::ListPools => render::pools(&self.manager),
            Command::ListGames => render::games(&self.manager),
            Command::Seeding => render::seeding(&self.manager.compute_seeding()),
            Command::History(name) => {
                let entries = self.manager.team_history(&name)?;
                render::history(&name, &entries)
            }
            Command::AddTeam(name) => {
                let team = self.manager.add_team(&name)?;
                format!("Added team '{}'", team.name)
            }
            Command::RemoveTeam(name) => {
                let team = self.manager.remove_team(&name)?;
                format!("Removed team '{}'", team.name)
            }
            Command::RenameTeam { old, new } => {
                let new = self.manager.rename_team(&old, &new)?;
                format!("Renamed '{}' to '{}'", old, new)
            }
            Command::SetPoolCount(n) => {
                self.manager.set_pool_count(n)?;
                format!("Pool count set to {n}; all teams are unassigned")
            }
            Command::SetPoolSize(n) => {
                self.manager.set_pool_size(n)?;
                format!("Pool size set to {n}")
            }
            Command::AssignRandom => {
                self.manager.assign_random_pools();
                format!("{}\n(stats and games were reset)", render::pools(&self.manager))
            }
            Command::AssignRemaining => {
                self.manager.assign_remaining_pools();
                format!("{}\n(stats and games were reset)", render::pools(&self.manager))
            }
            Command::ClearPools => {
                self.manager.clear_pools();
                "All teams are unassigned".to_string()
            }
            Command::MoveTeam { team, pool } => {
                let pool = match pool {
                    Some(n) => Some(PoolId::new(n).ok_or(TournamentError::PoolNotFound(n))?),
                    None => None,
                };
                self.manager.move_team(&team, pool)?;
                match pool {
                    Some(pool) => format!("Moved '{team}' to {pool}"),
                    None => format!("'{team}' is now unassigned"),
                }
            }
            Command::AddGame(game) => {
                let idx = self.manager.add_game(game)?;
                format!("Recorded game #{}", idx + 1)
            }
            Command::EditGame { index, game } => {
                self.manager.edit_game(index, game)?;
                format!("Updated game #{}", index + 1)
            }
            Command::RemoveGame(index) => {
                self.manager.remove_game(index)?;
                format!("Deleted game #{}", index + 1)
            }
            Command::Schedule(options) => {
                let report = self.manager.generate_schedule(&options)?;
                render::schedule_report(&report)
            }
            Command::NewTournament => {
                self.manager = TournamentManager::with_randomizer(
                    TournamentConfig::default(),
                    randomizer(self.seed),
                )?;
                "Started a new tournament".to_string()
            }
            Command::Demo => {
                self.manager = TournamentManager::demo(randomizer(self.seed))?;
                format!(
                    "Loaded demo tournament with {} teams and {} games",
                    self.manager.registry().len(),
                    self.manager.games().len()
                )
            }
            Command::Save(path) => {
                if let Some(path) = path {
                    self.store = TournamentStore::new(path);
                }
                self.store.save(&self.manager)?;
                format!("Saved to {}", self.store.path().display())
            }
            Command::Load(path) => {
                let store = TournamentStore::new(path);
                self.manager = store.load(randomizer(self.seed))?;
                self.store = store;
                format!(
                    "Loaded {} teams and {} games from {}",
                    self.manager.registry().len(),
                    self.manager.games().len(),
                    self.store.path().display()
                )
            }
        };
        Ok(Reply::Text(text))
    }
}

fn randomizer(seed: Option<u64>) -> Randomizer {
    seed.map(Randomizer::seeded).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ps_cli_{}_{}.json", std::process::id(), name))
    }

    fn session() -> Session {
        let manager =
            TournamentManager::with_randomizer(TournamentConfig::default(), Randomizer::seeded(3))
                .unwrap();
        Session::new(manager, TournamentStore::new(temp_path("unused")), false, Some(3))
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_add_and_list() {
        let mut session = session();
        assert_eq!(text(session.handle_line(r#"add "Red Sox""#)), "Added team 'Red Sox'");
        assert!(text(session.handle_line("teams")).contains("Red Sox"));
    }

    #[test]
    fn test_errors_become_text() {
        let mut session = session();
        session.handle_line("add Red");
        assert!(text(session.handle_line("add Red")).starts_with("Error: Team already exists"));
        assert!(text(session.handle_line("fly")).contains("Unrecognized"));
        assert!(text(session.handle_line("delete 4")).contains("Game not found"));
    }

    #[test]
    fn test_capacity_warning_has_hint() {
        let mut session = session();
        for name in ["A", "B", "C"] {
            session.handle_line(&format!("add {name}"));
        }
        session.handle_line("pool-count 1");
        session.handle_line("assign random");

        let reply = text(session.handle_line("schedule 3"));
        assert!(reply.starts_with("Warning:"));
        assert!(reply.contains("replays"));

        let reply = text(session.handle_line("schedule 3 replays"));
        assert!(reply.starts_with("Scheduled"));
    }

    #[test]
    fn test_move_to_pool_zero() {
        let mut session = session();
        session.handle_line("add Red");
        assert!(text(session.handle_line("move Red 0")).contains("Pool not found"));
        assert!(session.manager().team("Red").unwrap().pool.is_none());
    }

    #[test]
    fn test_game_numbers_are_one_based() {
        let mut session = session();
        session.handle_line("add A");
        session.handle_line("add B");
        assert_eq!(text(session.handle_line("game A 3 B 1")), "Recorded game #1");
        assert_eq!(text(session.handle_line("edit 1 A 0 B 1")), "Updated game #1");
        assert_eq!(session.manager().team("B").unwrap().stats.wins, 1);
        assert_eq!(text(session.handle_line("delete 1")), "Deleted game #1");
        assert!(session.manager().games().is_empty());
    }

    #[test]
    fn test_quit_and_blank_lines() {
        let mut session = session();
        assert_eq!(session.handle_line("   "), Reply::Text(String::new()));
        assert_eq!(session.handle_line("quit"), Reply::Quit);
    }

    #[test]
    fn test_autosave_after_changes() {
        let path = temp_path("autosave");
        let manager =
            TournamentManager::with_randomizer(TournamentConfig::default(), Randomizer::seeded(3))
                .unwrap();
        let mut session = Session::new(manager, TournamentStore::new(&path), true, Some(3));

        session.handle_line("teams");
        assert!(!path.exists());

        session.handle_line("add Red");
        assert!(path.exists());

        let reloaded = TournamentStore::new(&path).load(Randomizer::seeded(3)).unwrap();
        assert!(reloaded.team("Red").is_some());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_demo_then_seed() {
        let mut session = session();
        assert!(text(session.handle_line("demo")).contains("20 teams and 30 games"));
        let seeds = text(session.handle_line("seed"));
        assert_eq!(seeds.lines().count(), 20);
        assert!(seeds.starts_with("Seed 1: "));
    }
}
