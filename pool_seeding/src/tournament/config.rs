//! Tournament configuration models.

use super::errors::{TournamentError, TournamentResult};
use serde::{Deserialize, Serialize};

/// Default number of pools
pub const DEFAULT_POOL_COUNT: u32 = 5;

/// Default target pool size
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Largest games-per-team target a schedule may ask for
pub const MAX_GAMES_PER_TEAM: u32 = 1000;

/// Tournament configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Number of pools (at least 1)
    pub pool_count: u32,

    /// Target number of teams per pool (informational, not a cap)
    pub pool_size: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            pool_count: DEFAULT_POOL_COUNT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl TournamentConfig {
    /// Build a configuration from raw (possibly negative) frontend values
    pub fn new(pool_count: i64, pool_size: i64) -> TournamentResult<Self> {
        Ok(Self {
            pool_count: positive("Pool count", pool_count)?,
            pool_size: positive("Pool size", pool_size)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.pool_count == 0 {
            return Err(TournamentError::InvalidConfig(
                "Pool count must be greater than 0".to_string(),
            ));
        }

        if self.pool_size == 0 {
            return Err(TournamentError::InvalidConfig(
                "Pool size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parameters for one schedule generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Games each pooled team should end up with (must be >= 0)
    pub games_per_team: i64,

    /// Allow repeat matchups once unique opponents run out
    pub allow_replays: bool,

    /// Fill in uniformly random scores in [0, 10] instead of 0-0
    pub use_random_scores: bool,
}

impl ScheduleOptions {
    /// Options for a unique-pairings schedule with blank scores
    pub fn new(games_per_team: i64) -> Self {
        Self {
            games_per_team,
            allow_replays: false,
            use_random_scores: false,
        }
    }

    /// Enable repeat matchups
    pub fn with_replays(mut self) -> Self {
        self.allow_replays = true;
        self
    }

    /// Enable random scores
    pub fn with_random_scores(mut self) -> Self {
        self.use_random_scores = true;
        self
    }

    /// Validated games-per-team target, within `0..=MAX_GAMES_PER_TEAM`
    pub fn quota(&self) -> TournamentResult<u32> {
        match u32::try_from(self.games_per_team) {
            Ok(quota) if quota <= MAX_GAMES_PER_TEAM => Ok(quota),
            _ => Err(TournamentError::InvalidConfig(format!(
                "Games per team must be between 0 and {MAX_GAMES_PER_TEAM}, got {}",
                self.games_per_team
            ))),
        }
    }
}

/// Convert a frontend value to a strictly positive count
pub(crate) fn positive(what: &str, value: i64) -> TournamentResult<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(TournamentError::InvalidConfig(format!(
            "{what} must be a positive number, got {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TournamentConfig::default();
        assert_eq!(config.pool_count, 5);
        assert_eq!(config.pool_size, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_non_positive_pool_count() {
        assert!(matches!(
            TournamentConfig::new(0, 4),
            Err(TournamentError::InvalidConfig(_))
        ));
        assert!(matches!(
            TournamentConfig::new(-2, 4),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_rejects_non_positive_pool_size() {
        assert!(matches!(
            TournamentConfig::new(3, 0),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_zero_pool_count() {
        let config = TournamentConfig {
            pool_count: 0,
            pool_size: 4,
        };
        assert!(matches!(
            config.validate(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_schedule_options_quota() {
        assert_eq!(ScheduleOptions::new(3).quota().unwrap(), 3);
        assert_eq!(ScheduleOptions::new(0).quota().unwrap(), 0);
        assert!(matches!(
            ScheduleOptions::new(-1).quota(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_schedule_options_quota_upper_bound() {
        let max = i64::from(MAX_GAMES_PER_TEAM);
        assert_eq!(ScheduleOptions::new(max).quota().unwrap(), MAX_GAMES_PER_TEAM);
        assert!(matches!(
            ScheduleOptions::new(max + 1).with_replays().quota(),
            Err(TournamentError::InvalidConfig(_))
        ));
        assert!(matches!(
            ScheduleOptions::new(2_000_000_000).with_replays().quota(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_schedule_options_builders() {
        let options = ScheduleOptions::new(2).with_replays().with_random_scores();
        assert!(options.allow_replays);
        assert!(options.use_random_scores);
        assert_eq!(options.games_per_team, 2);
    }
}
