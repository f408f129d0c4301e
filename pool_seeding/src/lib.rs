//! # Pool Seeding
//!
//! A multi-pool round-robin tournament engine.
//!
//! Teams are registered by name, dealt into pools, scheduled against the other
//! members of their pool and finally ranked into seeds for bracket play. Every
//! result goes through a reversible stats ledger, so a team's record always
//! equals the replay of the game log no matter how often games are edited.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Teams, stats ledger, configuration and the session manager
//! - [`scheduling`]: Pool assignment and in-pool schedule generation
//! - [`seeding`]: Final ranking with head-to-head and run-differential tie-breaks
//! - [`store`]: JSON snapshot persistence
//!
//! ## Example
//!
//! ```
//! use pool_seeding::{Randomizer, ScheduleOptions, TournamentConfig, TournamentManager};
//!
//! # fn main() -> Result<(), pool_seeding::TournamentError> {
//! let config = TournamentConfig::new(1, 4)?;
//! let mut tournament = TournamentManager::with_randomizer(config, Randomizer::seeded(42))?;
//! for name in ["A", "B", "C", "D"] {
//!     tournament.add_team(name)?;
//! }
//! tournament.assign_random_pools();
//!
//! // Four teams, three games each: the full round robin
//! let report = tournament.generate_schedule(&ScheduleOptions::new(3).with_random_scores())?;
//! assert_eq!(report.games_scheduled, 6);
//!
//! let seeds = tournament.compute_seeding();
//! assert_eq!(seeds.len(), 4);
//! assert_eq!(seeds[0].seed, 1);
//! # Ok(())
//! # }
//! ```

/// Session-wide random source.
pub mod randomizer;
pub use randomizer::{MAX_RANDOM_SCORE, Randomizer};

/// Pool assignment and schedule generation.
pub mod scheduling;
pub use scheduling::{SchedulePlan, Shortfall};

/// Final seeding.
pub mod seeding;
pub use seeding::{compute_seeding, h2h_winner};

/// Snapshot persistence.
pub mod store;
pub use store::{Snapshot, TournamentStore};

/// Teams, stats and the tournament session.
pub mod tournament;
pub use tournament::{
    DEFAULT_POOL_COUNT, DEFAULT_POOL_SIZE, Game, GameIndex, GameResult, HistoryEntry,
    MAX_GAMES_PER_TEAM, MAX_SCORE, Pool, PoolId, ScheduleOptions, ScheduleReport, Seed, Team,
    TeamRegistry, TeamStats, TournamentConfig, TournamentError, TournamentManager,
    TournamentResult, pool_label,
};
