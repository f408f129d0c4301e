//! Tournament data models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every persisted pool label ("Pool 3").
pub const POOL_LABEL_PREFIX: &str = "Pool";

/// Highest score a game may record for either side
pub const MAX_SCORE: u32 = 999;

/// Position of a game in the game log (0-indexed)
pub type GameIndex = usize;

/// Pool slot (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(u32);

impl PoolId {
    /// Create a pool id, rejecting zero
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Pool number (1-indexed)
    pub fn number(self) -> u32 {
        self.0
    }

    /// Persisted label, e.g. `"Pool 2"`
    pub fn label(self) -> String {
        format!("{POOL_LABEL_PREFIX} {}", self.0)
    }

    /// Parse a persisted label of the form `"Pool <n>"`.
    ///
    /// Returns `None` for the empty (unassigned) label and for anything that
    /// does not follow the format.
    pub fn parse_label(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(POOL_LABEL_PREFIX), Some(number), None) => {
                number.parse().ok().and_then(Self::new)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{POOL_LABEL_PREFIX} {}", self.0)
    }
}

/// Label for an optional pool; the empty string means unassigned.
pub fn pool_label(pool: Option<PoolId>) -> String {
    pool.map(PoolId::label).unwrap_or_default()
}

/// Win/loss and run bookkeeping for one team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
    pub runs_for: u32,
    pub runs_against: u32,
}

impl TeamStats {
    /// Runs scored minus runs allowed
    pub fn run_differential(&self) -> i64 {
        i64::from(self.runs_for) - i64::from(self.runs_against)
    }

    /// Count one game from this team's side
    ///
    /// Scores are capped at [`MAX_SCORE`] on the way in. Wrapping arithmetic
    /// keeps [`TeamStats::unrecord`] an exact inverse.
    pub fn record(&mut self, own: u32, other: u32) {
        self.games_played = self.games_played.wrapping_add(1);
        self.runs_for = self.runs_for.wrapping_add(own);
        self.runs_against = self.runs_against.wrapping_add(other);
        if own > other {
            self.wins = self.wins.wrapping_add(1);
        } else if other > own {
            self.losses = self.losses.wrapping_add(1);
        }
    }

    /// Take back a game previously counted with [`TeamStats::record`]
    pub fn unrecord(&mut self, own: u32, other: u32) {
        self.games_played = self.games_played.wrapping_sub(1);
        self.runs_for = self.runs_for.wrapping_sub(own);
        self.runs_against = self.runs_against.wrapping_sub(other);
        if own > other {
            self.wins = self.wins.wrapping_sub(1);
        } else if other > own {
            self.losses = self.losses.wrapping_sub(1);
        }
    }
}

/// Registered team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Unique, case-sensitive name
    pub name: String,
    /// Current stats, always the replay of the game log
    pub stats: TeamStats,
    /// Pool membership (None = banked)
    pub pool: Option<PoolId>,
}

impl Team {
    /// Create a team with zeroed stats and no pool
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: TeamStats::default(),
            pool: None,
        }
    }
}

/// A recorded game between two teams
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    pub team1: String,
    pub score1: u32,
    pub team2: String,
    pub score2: u32,
}

impl Game {
    /// Create a game record
    pub fn new(team1: impl Into<String>, score1: u32, team2: impl Into<String>, score2: u32) -> Self {
        Self {
            team1: team1.into(),
            score1,
            team2: team2.into(),
            score2,
        }
    }

    /// Whether the game is between exactly these two teams, in either order
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.team1 == a && self.team2 == b) || (self.team1 == b && self.team2 == a)
    }

    /// Whether the team played in this game
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// Whether both scores are within `0..=MAX_SCORE`
    pub fn scores_in_range(&self) -> bool {
        self.score1 <= MAX_SCORE && self.score2 <= MAX_SCORE
    }

    /// Name of the team with the strictly higher score
    pub fn winner(&self) -> Option<&str> {
        if self.score1 > self.score2 {
            Some(&self.team1)
        } else if self.score2 > self.score1 {
            Some(&self.team2)
        } else {
            None
        }
    }
}

/// Result of a game from one team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

impl GameResult {
    fn from_scores(own: u32, other: u32) -> Self {
        if own > other {
            GameResult::Win
        } else if other > own {
            GameResult::Loss
        } else {
            GameResult::Tie
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win => write!(f, "W"),
            GameResult::Loss => write!(f, "L"),
            GameResult::Tie => write!(f, "T"),
        }
    }
}

/// One line of a team's game history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub opponent: String,
    pub own_score: u32,
    pub opponent_score: u32,
    pub result: GameResult,
    /// Opponent's current pool label ("" when banked or no longer registered)
    pub opponent_pool: String,
}

impl HistoryEntry {
    /// Build the entry for `team` if it played in `game`
    pub fn from_game(team: &str, game: &Game) -> Option<Self> {
        let (opponent, own_score, opponent_score) = if game.team1 == team {
            (&game.team2, game.score1, game.score2)
        } else if game.team2 == team {
            (&game.team1, game.score2, game.score1)
        } else {
            return None;
        };

        Some(Self {
            opponent: opponent.clone(),
            own_score,
            opponent_score,
            result: GameResult::from_scores(own_score, opponent_score),
            opponent_pool: String::new(),
        })
    }
}

/// Derived pool view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    pub id: PoolId,
    /// Member names in registration order
    pub teams: Vec<String>,
}

/// One row of the final seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seed {
    /// Seed number (1-indexed)
    pub seed: usize,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub run_differential: i64,
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seed {}: {} ({}-{}, RD: {})",
            self.seed, self.team, self.wins, self.losses, self.run_differential
        )
    }
}
