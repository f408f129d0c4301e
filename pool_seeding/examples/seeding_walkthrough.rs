//! Seeding Walkthrough Example
//!
//! Builds a small two-pool tournament, schedules it and prints the seeding.

use pool_seeding::{
    Randomizer, ScheduleOptions, TournamentConfig, TournamentError, TournamentManager,
};

fn main() -> Result<(), TournamentError> {
    println!("=== Pool Play Seeding Example ===\n");

    let config = TournamentConfig::new(2, 4)?;
    let mut tournament = TournamentManager::with_randomizer(config, Randomizer::seeded(2024))?;
    for name in [
        "Falcons", "Hawks", "Owls", "Ravens", "Herons", "Kites", "Swifts", "Wrens",
    ] {
        tournament.add_team(name)?;
    }

    // Example 1: Deal teams into pools
    println!("Example 1: Random pool assignment");
    tournament.assign_random_pools();
    for pool in tournament.pools() {
        println!("{}: {}", pool.id, pool.teams.join(", "));
    }

    // Example 2: Too many games without replays
    println!("\nExample 2: Asking for more games than unique matchups");
    match tournament.generate_schedule(&ScheduleOptions::new(5)) {
        Err(e) if e.is_recoverable() => println!("Refused: {e}"),
        other => println!("Unexpected: {other:?}"),
    }

    // Example 3: Full round robin with random scores
    println!("\nExample 3: Full round robin");
    let report = tournament.generate_schedule(&ScheduleOptions::new(3).with_random_scores())?;
    println!("Scheduled {} games", report.games_scheduled);
    for game in tournament.games() {
        println!(
            "  {} {} - {} {}",
            game.team1, game.score1, game.score2, game.team2
        );
    }

    // Example 4: Final seeding
    println!("\nExample 4: Seeding");
    for seed in tournament.compute_seeding() {
        println!("  {seed}");
    }

    Ok(())
}
