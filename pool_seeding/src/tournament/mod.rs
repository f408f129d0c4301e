//! Tournament module: teams, stats and the session that ties them together.
//!
//! This module provides:
//! - A name-keyed team registry with trim and uniqueness rules
//! - A stats ledger that applies and reverts single game results
//! - Tournament and schedule configuration
//! - The [`TournamentManager`] session owning teams, pools and the game log
//!
//! ## Example
//!
//! ```
//! use pool_seeding::{Game, Randomizer, TournamentConfig, TournamentManager};
//!
//! # fn main() -> Result<(), pool_seeding::TournamentError> {
//! let mut tournament =
//!     TournamentManager::with_randomizer(TournamentConfig::default(), Randomizer::seeded(1))?;
//! tournament.add_team("Red")?;
//! tournament.add_team("Blue")?;
//!
//! let idx = tournament.add_game(Game::new("Red", 7, "Blue", 5))?;
//! assert_eq!(tournament.team("Red").map(|t| t.stats.wins), Some(1));
//!
//! // Editing reverts the old result before applying the new one
//! tournament.edit_game(idx, Game::new("Red", 2, "Blue", 5))?;
//! assert_eq!(tournament.team("Red").map(|t| t.stats.wins), Some(0));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod ledger;
pub mod manager;
pub mod models;
pub mod registry;

pub use config::{
    DEFAULT_POOL_COUNT, DEFAULT_POOL_SIZE, MAX_GAMES_PER_TEAM, ScheduleOptions, TournamentConfig,
};
pub use errors::{TournamentError, TournamentResult};
pub use manager::{ScheduleReport, TournamentManager};
pub use models::{
    Game, GameIndex, GameResult, HistoryEntry, MAX_SCORE, Pool, PoolId, Seed, Team, TeamStats,
    pool_label,
};
pub use registry::TeamRegistry;
