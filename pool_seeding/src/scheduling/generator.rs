//! Round-robin schedule generation within pools.
//!
//! Generation works on a scratch copy of every team's game count and never
//! touches the registry; the caller commits the returned games through the
//! stats ledger. That keeps validation (quota, pairing capacity) ahead of any
//! mutation.

use crate::{
    randomizer::Randomizer,
    tournament::{
        config::ScheduleOptions,
        errors::{TournamentError, TournamentResult},
        models::{Game, PoolId},
        registry::TeamRegistry,
    },
};
use serde::Serialize;
use std::collections::HashSet;

/// How many random opponent orders are tried before settling for the best one
pub const MAX_ATTEMPTS: usize = 64;

/// A team that ended generation below its games-per-team target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub team: String,
    pub games_played: u32,
    pub target: u32,
}

/// Outcome of a schedule generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulePlan {
    /// Games in generation order; `team1` is the team whose turn produced the pairing
    pub games: Vec<Game>,
    /// Teams left under quota (accepted, not an error)
    pub shortfall: Vec<Shortfall>,
}

/// Unique pairings available across pools of the given sizes: Σ n·(n−1)/2
pub fn unique_capacity(pool_sizes: &[usize]) -> u64 {
    pool_sizes
        .iter()
        .map(|&n| (n as u64) * (n as u64).saturating_sub(1) / 2)
        .sum()
}

/// Games needed for every pooled team to reach the quota: (Σ n·k) / 2
pub fn demand(pool_sizes: &[usize], games_per_team: u32) -> u64 {
    pool_sizes
        .iter()
        .map(|&n| n as u64 * u64::from(games_per_team))
        .sum::<u64>()
        / 2
}

struct Entrant {
    name: String,
    pool: PoolId,
}

struct Attempt {
    pairings: Vec<(usize, usize)>,
    counts: Vec<u32>,
}

impl Attempt {
    fn is_complete(&self, quota: u32) -> bool {
        self.counts.iter().all(|&c| c >= quota)
    }
}

/// Plan a schedule for every pooled team.
///
/// Fails with `InvalidConfig` for a negative target and with
/// `InsufficientCapacity` when the target needs more games than there are
/// unique in-pool pairings while replays are disabled. On failure nothing is
/// planned.
pub fn plan_schedule(
    registry: &TeamRegistry,
    pool_count: u32,
    options: &ScheduleOptions,
    rng: &mut Randomizer,
) -> TournamentResult<SchedulePlan> {
    let quota = options.quota()?;

    let entrants: Vec<Entrant> = registry
        .iter()
        .filter_map(|t| {
            t.pool
                .filter(|p| p.number() <= pool_count)
                .map(|pool| Entrant {
                    name: t.name.clone(),
                    pool,
                })
        })
        .collect();

    let mut sizes = vec![0usize; pool_count as usize];
    for entrant in &entrants {
        sizes[entrant.pool.number() as usize - 1] += 1;
    }

    let capacity = unique_capacity(&sizes);
    let demand = demand(&sizes, quota);
    if demand > capacity && !options.allow_replays {
        log::warn!(
            "Refusing to schedule: {} games needed, {} unique pairings available",
            demand,
            capacity
        );
        return Err(TournamentError::InsufficientCapacity { demand, capacity });
    }

    let mut best: Option<Attempt> = None;
    for _ in 0..MAX_ATTEMPTS {
        let attempt = run_attempt(&entrants, quota, options.allow_replays, rng);
        let complete = attempt.is_complete(quota);
        if best
            .as_ref()
            .is_none_or(|b| attempt.pairings.len() > b.pairings.len())
        {
            best = Some(attempt);
        }
        if complete {
            break;
        }
    }

    let Some(best) = best else {
        return Ok(SchedulePlan {
            games: Vec::new(),
            shortfall: Vec::new(),
        });
    };

    let games = best
        .pairings
        .iter()
        .map(|&(i, j)| {
            let (score1, score2) = if options.use_random_scores {
                (rng.score(), rng.score())
            } else {
                (0, 0)
            };
            Game::new(entrants[i].name.clone(), score1, entrants[j].name.clone(), score2)
        })
        .collect();

    let shortfall = entrants
        .iter()
        .zip(&best.counts)
        .filter(|&(_, &count)| count < quota)
        .map(|(entrant, &count)| Shortfall {
            team: entrant.name.clone(),
            games_played: count,
            target: quota,
        })
        .collect();

    Ok(SchedulePlan { games, shortfall })
}

/// One pass of unique pairings followed, if allowed, by one pass of replays
fn run_attempt(
    entrants: &[Entrant],
    quota: u32,
    allow_replays: bool,
    rng: &mut Randomizer,
) -> Attempt {
    let mut counts = vec![0u32; entrants.len()];
    let mut used: HashSet<(usize, usize)> = HashSet::new();
    let mut pairings = Vec::new();

    let open_opponents = |counts: &[u32], i: usize| -> Vec<usize> {
        (0..entrants.len())
            .filter(|&j| j != i && entrants[j].pool == entrants[i].pool && counts[j] < quota)
            .collect()
    };

    for i in 0..entrants.len() {
        if counts[i] >= quota {
            continue;
        }

        let mut opponents = open_opponents(&counts, i);
        rng.shuffle(&mut opponents);

        for j in opponents {
            if counts[i] >= quota {
                break;
            }
            if counts[j] >= quota || !used.insert((i.min(j), i.max(j))) {
                continue;
            }
            pairings.push((i, j));
            counts[i] += 1;
            counts[j] += 1;
        }
    }

    if allow_replays {
        for i in 0..entrants.len() {
            while counts[i] < quota {
                let eligible = open_opponents(&counts, i);
                let Some(&j) = rng.choose(&eligible) else {
                    break;
                };
                pairings.push((i, j));
                counts[i] += 1;
                counts[j] += 1;
            }
        }
    }

    Attempt { pairings, counts }
}
