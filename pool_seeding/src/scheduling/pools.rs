//! Pool assignment and balancing.
//!
//! Membership is stored once, on each team. Every pool → teams view here is
//! derived from the registry on demand.

use crate::{
    randomizer::Randomizer,
    tournament::{
        errors::{TournamentError, TournamentResult},
        models::{Pool, PoolId},
        registry::TeamRegistry,
    },
};

/// All pool slots `1..=pool_count`
pub fn pool_ids(pool_count: u32) -> impl Iterator<Item = PoolId> {
    (1..=pool_count).filter_map(PoolId::new)
}

/// Check that a pool exists under the current pool count
pub fn check_pool(pool: PoolId, pool_count: u32) -> TournamentResult<()> {
    if pool.number() > pool_count {
        return Err(TournamentError::PoolNotFound(pool.number()));
    }
    Ok(())
}

/// Derived view of every pool slot, members in registration order
pub fn pools(registry: &TeamRegistry, pool_count: u32) -> Vec<Pool> {
    pool_ids(pool_count)
        .map(|id| Pool {
            id,
            teams: registry
                .iter()
                .filter(|t| t.pool == Some(id))
                .map(|t| t.name.clone())
                .collect(),
        })
        .collect()
}

/// Member count per pool slot, indexed by `pool number - 1`
pub fn pool_sizes(registry: &TeamRegistry, pool_count: u32) -> Vec<usize> {
    let mut sizes = vec![0; pool_count as usize];
    for pool in registry.iter().filter_map(|t| t.pool) {
        if let Some(size) = sizes.get_mut(pool.number() as usize - 1) {
            *size += 1;
        }
    }
    sizes
}

/// Names of banked teams in registration order
pub fn unassigned(registry: &TeamRegistry) -> Vec<String> {
    registry
        .iter()
        .filter(|t| t.pool.is_none())
        .map(|t| t.name.clone())
        .collect()
}

/// Bank every team. Stats are left alone.
pub fn clear(registry: &mut TeamRegistry) {
    for team in registry.iter_mut() {
        team.pool = None;
    }
}

/// Shuffle all teams and deal them round-robin into the pools.
///
/// Team `i` of the shuffled order lands in pool `(i mod pool_count) + 1`, so
/// pool sizes differ by at most one.
pub fn full_random_assign(registry: &mut TeamRegistry, pool_count: u32, rng: &mut Randomizer) {
    clear(registry);

    let mut names: Vec<String> = registry.iter().map(|t| t.name.clone()).collect();
    rng.shuffle(&mut names);

    for (i, name) in names.iter().enumerate() {
        let pool = PoolId::new((i % pool_count as usize) as u32 + 1);
        if let Some(team) = registry.get_mut(name) {
            team.pool = pool;
        }
    }

    log::info!(
        "Randomly assigned {} teams to {} pools",
        names.len(),
        pool_count
    );
}

/// Place every banked team into the currently smallest pool.
///
/// Banked teams are shuffled first. Ties between equally small pools go to
/// the lowest pool number. Teams already in a pool stay where they are.
pub fn assign_unassigned_balanced(
    registry: &mut TeamRegistry,
    pool_count: u32,
    rng: &mut Randomizer,
) {
    let mut sizes = pool_sizes(registry, pool_count);
    let mut banked = unassigned(registry);
    rng.shuffle(&mut banked);

    for name in &banked {
        let Some((slot, _)) = sizes
            .iter()
            .enumerate()
            .min_by_key(|&(slot, size)| (*size, slot))
        else {
            return;
        };
        sizes[slot] += 1;
        if let Some(team) = registry.get_mut(name) {
            team.pool = PoolId::new(slot as u32 + 1);
        }
    }

    log::info!(
        "Balanced {} banked teams into {} pools",
        banked.len(),
        pool_count
    );
}

/// Move a single team into a pool, or back to the bank with `None`
pub fn move_team(
    registry: &mut TeamRegistry,
    name: &str,
    pool: Option<PoolId>,
    pool_count: u32,
) -> TournamentResult<()> {
    if let Some(pool) = pool {
        check_pool(pool, pool_count)?;
    }

    let team = registry
        .get_mut(name)
        .ok_or_else(|| TournamentError::TeamNotFound(name.to_string()))?;
    team.pool = pool;
    Ok(())
}
