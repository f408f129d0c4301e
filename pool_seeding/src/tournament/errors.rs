//! Tournament error types.

use thiserror::Error;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Team name is empty after trimming
    #[error("Invalid team name: {0:?} (team name cannot be empty)")]
    InvalidName(String),

    /// Another team already uses this name
    #[error("Team already exists: {0}")]
    DuplicateName(String),

    /// No team registered under this name
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    /// No game at this position in the game log
    #[error("Game not found at index {0}")]
    GameNotFound(usize),

    /// Pool outside of the configured range
    #[error("Pool not found: Pool {0}")]
    PoolNotFound(u32),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game record rejected before reaching the ledger
    #[error("Invalid game: {0}")]
    InvalidGame(String),

    /// Schedule demand exceeds unique pairings while replays are disabled
    #[error(
        "Insufficient unique pairings: {demand} games needed but only {capacity} unique \
         matchups exist (enable replays or adjust pools)"
    )]
    InsufficientCapacity { demand: u64, capacity: u64 },

    /// Snapshot is not valid JSON or misses required data
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Snapshot file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TournamentError {
    /// Whether the caller can retry the same operation with different parameters.
    ///
    /// Only the capacity warning qualifies: it goes away once replays are
    /// allowed or the pools are rearranged.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TournamentError::InsufficientCapacity { .. })
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_warning_is_recoverable() {
        let err = TournamentError::InsufficientCapacity {
            demand: 8,
            capacity: 6,
        };
        assert!(err.is_recoverable());
        let msg = err.to_string();
        assert!(msg.contains("8 games needed"));
        assert!(msg.contains("6 unique"));
    }

    #[test]
    fn test_other_errors_are_not_recoverable() {
        assert!(!TournamentError::DuplicateName("Red".to_string()).is_recoverable());
        assert!(!TournamentError::GameNotFound(3).is_recoverable());
        assert!(!TournamentError::InvalidConfig("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_messages_name_the_subject() {
        assert!(
            TournamentError::TeamNotFound("Blue".to_string())
                .to_string()
                .contains("Blue")
        );
        assert!(TournamentError::PoolNotFound(7).to_string().contains("Pool 7"));
    }
}
