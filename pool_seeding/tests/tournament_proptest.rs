//! Property-based tests for the stats ledger, pool balancing and schedule
//! generation using proptest.
//!
//! Every test drives the public session API so the properties hold for the
//! whole stack, not only for the helpers underneath.

use pool_seeding::{
    Game, Randomizer, ScheduleOptions, TeamStats, TournamentConfig, TournamentManager,
};
use proptest::prelude::*;
use std::collections::HashSet;

// Strategy for a game between two distinct teams out of `team_count`
fn game_strategy(team_count: usize) -> impl Strategy<Value = Game> {
    (0..team_count, 1..team_count, 0u32..=15, 0u32..=15).prop_map(
        move |(first, offset, score1, score2)| {
            let second = (first + offset) % team_count;
            Game::new(team_name(first), score1, team_name(second), score2)
        },
    )
}

#[derive(Debug, Clone)]
enum Op {
    Add(Game),
    Edit(usize, Game),
    Remove(usize),
}

fn op_strategy(team_count: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        game_strategy(team_count).prop_map(Op::Add),
        (any::<usize>(), game_strategy(team_count)).prop_map(|(idx, g)| Op::Edit(idx, g)),
        any::<usize>().prop_map(Op::Remove),
    ]
}

fn team_name(i: usize) -> String {
    format!("Team {}", i + 1)
}

fn manager_with_teams(team_count: usize, pool_count: u32, seed: u64) -> TournamentManager {
    let config = TournamentConfig::new(i64::from(pool_count), 4).unwrap();
    let mut manager = TournamentManager::with_randomizer(config, Randomizer::seeded(seed)).unwrap();
    for i in 0..team_count {
        manager.add_team(&team_name(i)).unwrap();
    }
    manager
}

// Stats rebuilt from nothing but the game log
fn replayed_stats(manager: &TournamentManager, name: &str) -> TeamStats {
    let mut stats = TeamStats::default();
    for game in manager.games() {
        if game.team1 == name {
            stats.record(game.score1, game.score2);
        }
        if game.team2 == name {
            stats.record(game.score2, game.score1);
        }
    }
    stats
}

proptest! {
    #[test]
    fn test_apply_then_revert_restores_stats(
        history in prop::collection::vec(game_strategy(4), 0..12),
        extra in game_strategy(4),
    ) {
        let mut manager = manager_with_teams(4, 1, 0);
        for game in history {
            manager.add_game(game).unwrap();
        }
        let before: Vec<TeamStats> = manager.teams().map(|t| t.stats).collect();

        let idx = manager.add_game(extra).unwrap();
        manager.remove_game(idx).unwrap();

        let after: Vec<TeamStats> = manager.teams().map(|t| t.stats).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_stats_always_equal_log_replay(ops in prop::collection::vec(op_strategy(5), 1..40)) {
        let mut manager = manager_with_teams(5, 1, 0);
        for op in ops {
            let len = manager.games().len();
            match op {
                Op::Add(game) => {
                    manager.add_game(game).unwrap();
                }
                Op::Edit(idx, game) if len > 0 => manager.edit_game(idx % len, game).unwrap(),
                Op::Remove(idx) if len > 0 => {
                    manager.remove_game(idx % len).unwrap();
                }
                _ => {}
            }

            for team in manager.teams() {
                prop_assert_eq!(team.stats, replayed_stats(&manager, &team.name));
                prop_assert_eq!(
                    team.stats.run_differential(),
                    i64::from(team.stats.runs_for) - i64::from(team.stats.runs_against)
                );
            }
        }
    }

    #[test]
    fn test_random_assignment_is_balanced(
        team_count in 0usize..40,
        pool_count in 1u32..9,
        seed in any::<u64>(),
    ) {
        let mut manager = manager_with_teams(team_count, pool_count, seed);
        manager.assign_random_pools();

        let pools = manager.pools();
        let floor = team_count / pool_count as usize;
        let ceil = team_count.div_ceil(pool_count as usize);
        for pool in &pools {
            prop_assert!(pool.teams.len() == floor || pool.teams.len() == ceil);
        }

        let members: Vec<&String> = pools.iter().flat_map(|p| &p.teams).collect();
        let unique: HashSet<&String> = members.iter().copied().collect();
        prop_assert_eq!(members.len(), team_count);
        prop_assert_eq!(unique.len(), team_count);
        prop_assert!(manager.unassigned().is_empty());
    }

    #[test]
    fn test_balanced_assignment_keeps_sizes_close(
        team_count in 0usize..30,
        pool_count in 1u32..6,
        seed in any::<u64>(),
    ) {
        let mut manager = manager_with_teams(team_count, pool_count, seed);
        manager.assign_remaining_pools();

        let sizes: Vec<usize> = manager.pools().iter().map(|p| p.teams.len()).collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
        prop_assert!(manager.unassigned().is_empty());
    }

    #[test]
    fn test_unique_schedule_properties(
        team_count in 2usize..16,
        pool_count in 1u32..4,
        games_per_team in 0i64..5,
        seed in any::<u64>(),
    ) {
        let mut manager = manager_with_teams(team_count, pool_count, seed);
        manager.assign_random_pools();

        let Ok(report) = manager.generate_schedule(&ScheduleOptions::new(games_per_team)) else {
            // A refused schedule leaves the empty log alone
            prop_assert!(manager.games().is_empty());
            return Ok(());
        };

        let mut pairs = HashSet::new();
        for game in manager.games() {
            prop_assert_ne!(&game.team1, &game.team2);
            let key = if game.team1 < game.team2 {
                (game.team1.clone(), game.team2.clone())
            } else {
                (game.team2.clone(), game.team1.clone())
            };
            prop_assert!(pairs.insert(key), "pair scheduled twice");
            prop_assert_eq!(
                manager.team(&game.team1).unwrap().pool,
                manager.team(&game.team2).unwrap().pool
            );
        }

        let quota = games_per_team as u32;
        for team in manager.teams() {
            prop_assert!(team.stats.games_played <= quota);
            let short = report.shortfall.iter().any(|s| s.team == team.name);
            prop_assert_eq!(short, team.stats.games_played < quota);
        }
        prop_assert_eq!(report.games_scheduled, manager.games().len());
    }

    #[test]
    fn test_unique_schedule_fills_every_feasible_quota(
        (pool_size, games_per_team) in (2usize..11).prop_flat_map(|n| (Just(n), 0..n)),
        pool_count in 1u32..4,
        seed in any::<u64>(),
    ) {
        // A k-regular pairing of n teams exists whenever k < n and n * k is even
        prop_assume!(pool_size * games_per_team % 2 == 0);

        let mut manager = manager_with_teams(pool_size * pool_count as usize, pool_count, seed);
        manager.assign_random_pools();
        prop_assert!(manager.pools().iter().all(|p| p.teams.len() == pool_size));

        let report = manager
            .generate_schedule(&ScheduleOptions::new(games_per_team as i64))
            .unwrap();

        prop_assert!(report.shortfall.is_empty());
        for team in manager.teams() {
            prop_assert_eq!(team.stats.games_played, games_per_team as u32);
        }
        prop_assert_eq!(
            manager.games().len(),
            pool_size * pool_count as usize * games_per_team / 2
        );
    }

    #[test]
    fn test_replay_schedule_never_exceeds_quota(
        team_count in 2usize..12,
        games_per_team in 0i64..8,
        seed in any::<u64>(),
    ) {
        let mut manager = manager_with_teams(team_count, 2, seed);
        manager.assign_random_pools();

        let options = ScheduleOptions::new(games_per_team).with_replays().with_random_scores();
        manager.generate_schedule(&options).unwrap();

        for team in manager.teams() {
            prop_assert!(team.stats.games_played <= games_per_team as u32);
            prop_assert_eq!(team.stats, replayed_stats(&manager, &team.name));
        }
    }
}
