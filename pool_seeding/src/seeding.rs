//! Final seeding with layered tie-breaks.
//!
//! Teams are ordered by wins. Teams level on wins form a tie group:
//!
//! - A group of exactly two is settled by head-to-head when one of them won
//!   their meeting.
//! - Every other group (and a pair without a decisive meeting) is ordered by
//!   run differential (high first), runs against (low first), runs for (high
//!   first).
//! - Teams still identical on all three are shuffled.
//!
//! Head-to-head is never consulted for groups of three or more,
//! even when some of those teams met.

use crate::{
    randomizer::Randomizer,
    tournament::{
        models::{Game, Seed, Team},
        registry::TeamRegistry,
    },
};
use std::cmp::Reverse;

/// Winner of the meeting between `a` and `b`.
///
/// Scans the log in order and returns the first game between the two with a
/// strictly higher score on one side. Level games are skipped. `None` when they
/// never met or only drew.
pub fn h2h_winner<'a>(games: &'a [Game], a: &str, b: &str) -> Option<&'a str> {
    games
        .iter()
        .filter(|g| g.is_between(a, b))
        .find_map(Game::winner)
}

fn differential_key(team: &Team) -> (Reverse<i64>, u32, Reverse<u32>) {
    (
        Reverse(team.stats.run_differential()),
        team.stats.runs_against,
        Reverse(team.stats.runs_for),
    )
}

/// Rank every registered team.
///
/// Read-only apart from drawing from `rng` for exact ties. Games naming
/// teams that are no longer registered simply never match a head-to-head
/// lookup.
pub fn compute_seeding(registry: &TeamRegistry, games: &[Game], rng: &mut Randomizer) -> Vec<Seed> {
    let mut teams: Vec<&Team> = registry.iter().collect();
    teams.sort_by_key(|t| Reverse(t.stats.wins));

    let mut seeded: Vec<&Team> = Vec::with_capacity(teams.len());
    for group in teams.chunk_by(|a, b| a.stats.wins == b.stats.wins) {
        if let [first, second] = group {
            match h2h_winner(games, &first.name, &second.name) {
                Some(winner) if winner == first.name => {
                    seeded.extend([*first, *second]);
                    continue;
                }
                Some(_) => {
                    seeded.extend([*second, *first]);
                    continue;
                }
                None => {}
            }
        }

        let mut group = group.to_vec();
        group.sort_by_key(|t| differential_key(t));
        for tied in group.chunk_by_mut(|a, b| differential_key(a) == differential_key(b)) {
            if tied.len() > 1 {
                rng.shuffle(tied);
            }
        }
        seeded.extend(group);
    }

    seeded
        .into_iter()
        .enumerate()
        .map(|(idx, team)| Seed {
            seed: idx + 1,
            team: team.name.clone(),
            wins: team.stats.wins,
            losses: team.stats.losses,
            run_differential: team.stats.run_differential(),
        })
        .collect()
}
