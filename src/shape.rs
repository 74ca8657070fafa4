//! Pure transforms from decoded upstream entries to display-ready records.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{
    Fixture, FixtureLabel, FixturePlayerStats, FixturePlayersEntry, FixtureTeamStats,
    NOT_AVAILABLE, PlayerEntry, PlayerSeasonStats, PlayerStatRow, StatValue, TeamStatRow,
    TeamStatsEntry,
};

/// Never falls back to the first entry: a player who changed clubs has one
/// entry per team in no particular order.
pub fn select_player_stats(entries: &[PlayerEntry], team_id: u32) -> Option<PlayerSeasonStats> {
    entries
        .iter()
        .flat_map(|entry| entry.statistics.iter())
        .find(|stats| stats.team.id == team_id)
        .cloned()
}

/// Teams across, stat types down. Stat types keep the order they are first
/// seen in; a team that repeats in the payload updates its existing column.
pub fn flatten_fixture_team_stats(entries: &[TeamStatsEntry]) -> FixtureTeamStats {
    let mut out = FixtureTeamStats::default();

    for entry in entries {
        let col = match out.teams.iter().position(|t| *t == entry.team.name) {
            Some(col) => col,
            None => {
                out.teams.push(entry.team.name.clone());
                for row in &mut out.rows {
                    row.values.push(None);
                }
                out.teams.len() - 1
            }
        };

        for stat in &entry.statistics {
            let idx = match out.rows.iter().position(|r| r.stat == stat.kind) {
                Some(idx) => idx,
                None => {
                    out.rows.push(TeamStatRow {
                        stat: stat.kind.clone(),
                        values: vec![None; out.teams.len()],
                    });
                    out.rows.len() - 1
                }
            };
            out.rows[idx].values[col] = Some(StatValue::from(&stat.value));
        }
    }

    out
}

pub fn flatten_fixture_player_stats(entries: &[FixturePlayersEntry]) -> FixturePlayerStats {
    let mut rows = Vec::new();

    for entry in entries {
        for item in &entry.players {
            let line = item.statistics.first().cloned().unwrap_or_default();
            let position = line
                .games
                .position
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let number = line
                .games
                .number
                .map(|n| n.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            rows.push(PlayerStatRow {
                team: entry.team.name.clone(),
                player_id: item.player.id,
                player_name: item.player.name.clone(),
                position,
                number,
                minutes: line.games.minutes,
                rating: line.games.rating,
                goals: line.goals.total,
                assists: line.goals.assists,
                passes_total: line.passes.total,
                passes_accuracy: line.passes.accuracy,
                tackles: line.tackles.total,
                fouls_committed: line.fouls.committed,
                yellow_cards: line.cards.yellow,
                red_cards: line.cards.red,
            });
        }
    }

    FixturePlayerStats { rows }
}

/// Finished fixtures, most recent first, labelled `YYYY-MM-DD  HOME vs AWAY`.
///
/// Ordering uses the kickoff's wall-clock time in its own offset, the same
/// value the label's day is cut from, so labels never read out of order.
pub fn finished_fixture_labels(fixtures: &[Fixture]) -> Vec<FixtureLabel> {
    let mut finished: Vec<(&Fixture, Option<NaiveDateTime>)> = fixtures
        .iter()
        .filter(|f| f.is_finished())
        .map(|f| (f, local_kickoff(&f.date)))
        .collect();

    // Unparseable dates sink to the end; the sort is stable among equals.
    finished.sort_by(|(fa, a), (fb, b)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => fb.date.cmp(&fa.date),
    });

    finished
        .into_iter()
        .map(|(f, kickoff)| FixtureLabel {
            fixture_id: f.id,
            label: format!("{}  {} vs {}", day_of(&f.date, kickoff), f.home, f.away),
        })
        .collect()
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn local_kickoff(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn day_of(raw: &str, kickoff: Option<NaiveDateTime>) -> String {
    if let Some(dt) = kickoff {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    let trimmed = raw.trim();
    trimmed.get(..10).unwrap_or(trimmed).to_string()
}
