//! Plain-text views of the tournament.
//!
//! Games whose teams are no longer all registered are left out of every view.

use pool_seeding::{HistoryEntry, ScheduleReport, Seed, TournamentManager, pool_label};

/// Team table in registration order
pub fn teams(manager: &TournamentManager) -> String {
    if manager.registry().is_empty() {
        return "No teams registered".to_string();
    }

    let header = format!(
        "{:<24} {:<8} {:>3} {:>3} {:>3} {:>4} {:>4} {:>5}",
        "Team", "Pool", "W", "L", "GP", "RF", "RA", "RD"
    );
    let rows = manager.teams().map(|team| {
        let pool = pool_label(team.pool);
        format!(
            "{:<24} {:<8} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+5}",
            team.name,
            if pool.is_empty() { "-" } else { pool.as_str() },
            team.stats.wins,
            team.stats.losses,
            team.stats.games_played,
            team.stats.runs_for,
            team.stats.runs_against,
            team.stats.run_differential()
        )
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pool slots with their members, then the banked teams
pub fn pools(manager: &TournamentManager) -> String {
    let target = manager.config().pool_size;
    let mut lines: Vec<String> = manager
        .pools()
        .iter()
        .map(|pool| {
            format!(
                "{} ({}/{}): {}",
                pool.id,
                pool.teams.len(),
                target,
                pool.teams.join(", ")
            )
        })
        .collect();

    let banked = manager.unassigned();
    if !banked.is_empty() {
        lines.push(format!("Unassigned: {}", banked.join(", ")));
    }
    lines.join("\n")
}

/// Game log with 1-based numbers matching the `edit` and `delete` commands
pub fn games(manager: &TournamentManager) -> String {
    let lines: Vec<String> = manager
        .games()
        .iter()
        .enumerate()
        .filter(|(_, game)| !manager.is_orphan(game))
        .map(|(idx, game)| {
            format!(
                "#{:<3} {} {} - {} {}",
                idx + 1,
                game.team1,
                game.score1,
                game.score2,
                game.team2
            )
        })
        .collect();

    if lines.is_empty() {
        "No games recorded".to_string()
    } else {
        lines.join("\n")
    }
}

pub fn seeding(seeds: &[Seed]) -> String {
    if seeds.is_empty() {
        return "No teams to seed".to_string();
    }
    seeds
        .iter()
        .map(Seed::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One team's games seen from its side
pub fn history(team: &str, entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return format!("{team} has not played yet");
    }

    let rows = entries.iter().map(|entry| {
        let line = format!(
            "  {} {}-{} vs {}",
            entry.result, entry.own_score, entry.opponent_score, entry.opponent
        );
        if entry.opponent_pool.is_empty() {
            line
        } else {
            format!("{line} ({})", entry.opponent_pool)
        }
    });

    std::iter::once(format!("Games for {team}:"))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn schedule_report(report: &ScheduleReport) -> String {
    let rows = report.shortfall.iter().map(|short| {
        format!(
            "  {} only has {} of {} games (no eligible opponents left)",
            short.team, short.games_played, short.target
        )
    });

    std::iter::once(format!("Scheduled {} games", report.games_scheduled))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}
