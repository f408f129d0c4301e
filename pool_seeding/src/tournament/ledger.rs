//! Stats ledger: applies and reverses the effect of single game results.
//!
//! Stats are never patched directly. Editing a game is `revert(old)` followed
//! by `apply(new)`, so a team's stats always equal the replay of the game log.
//!
//! Each side of a game is resolved on its own. A side whose team has been
//! removed is skipped, which keeps the surviving opponent consistent with
//! the log when orphaned games are later removed or replayed on load.

use super::{
    models::{Game, TeamStats},
    registry::TeamRegistry,
};

/// Count a game for both teams
pub fn apply(registry: &mut TeamRegistry, game: &Game) {
    if let Some(team) = registry.get_mut(&game.team1) {
        team.stats.record(game.score1, game.score2);
    }
    if let Some(team) = registry.get_mut(&game.team2) {
        team.stats.record(game.score2, game.score1);
    }
}

/// Exact inverse of [`apply`] for the same game values
pub fn revert(registry: &mut TeamRegistry, game: &Game) {
    if let Some(team) = registry.get_mut(&game.team1) {
        team.stats.unrecord(game.score1, game.score2);
    }
    if let Some(team) = registry.get_mut(&game.team2) {
        team.stats.unrecord(game.score2, game.score1);
    }
}

/// Zero a team's stats
pub fn reset(stats: &mut TeamStats) {
    *stats = TeamStats::default();
}

/// Zero every team's stats
pub fn reset_all(registry: &mut TeamRegistry) {
    for team in registry.iter_mut() {
        reset(&mut team.stats);
    }
}

/// Rebuild all stats from a game log, in order
pub fn replay<'a>(registry: &mut TeamRegistry, games: impl IntoIterator<Item = &'a Game>) {
    reset_all(registry);
    for game in games {
        apply(registry, game);
    }
}
