use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

use soccer_stats::models::{Fixture, FixturePlayersEntry, TeamStatsEntry};
use soccer_stats::shape::{
    finished_fixture_labels, flatten_fixture_player_stats, flatten_fixture_team_stats,
};

const STAT_TYPES: &[&str] = &[
    "Shots on Goal",
    "Shots off Goal",
    "Total Shots",
    "Blocked Shots",
    "Shots insidebox",
    "Shots outsidebox",
    "Fouls",
    "Corner Kicks",
    "Offsides",
    "Ball Possession",
    "Yellow Cards",
    "Red Cards",
    "Goalkeeper Saves",
    "Total passes",
    "Passes accurate",
    "Passes %",
    "expected_goals",
];

fn team_stats_payload() -> Vec<TeamStatsEntry> {
    let teams: Vec<Value> = ["Home FC", "Away FC"]
        .iter()
        .enumerate()
        .map(|(i, name)| json!({
            "team": {"id": i, "name": name},
            "statistics": STAT_TYPES
                .iter()
                .enumerate()
                .map(|(j, kind)| json!({"type": kind, "value": j * (i + 1)}))
                .collect::<Vec<_>>()
        }))
        .collect();
    serde_json::from_value(Value::Array(teams)).expect("valid payload")
}

fn player_stats_payload() -> Vec<FixturePlayersEntry> {
    let teams: Vec<Value> = (0..2)
        .map(|t| json!({
            "team": {"id": t, "name": format!("Team {t}")},
            "players": (0..16)
                .map(|p| json!({
                    "player": {"id": t * 100 + p, "name": format!("Player {p}")},
                    "statistics": [{
                        "games": {"minutes": 90, "number": p, "position": "M", "rating": "6.9"},
                        "goals": {"total": null, "assists": null},
                        "passes": {"total": 40, "accuracy": "31"},
                        "tackles": {"total": 2},
                        "fouls": {"committed": 1},
                        "cards": {"yellow": 0, "red": 0}
                    }]
                }))
                .collect::<Vec<_>>()
        }))
        .collect();
    serde_json::from_value(Value::Array(teams)).expect("valid payload")
}

fn season_fixtures() -> Vec<Fixture> {
    (0..240u32)
        .map(|i| Fixture {
            id: i,
            date: format!("2025-{:02}-{:02}T19:00:00+00:00", 3 + i % 9, 1 + i % 28),
            status: if i % 3 == 0 { "NS" } else { "FT" }.to_string(),
            home: format!("Team {}", i % 14),
            away: format!("Team {}", (i + 5) % 14),
            round: None,
            home_goals: None,
            away_goals: None,
        })
        .collect()
}

fn bench_shapes(c: &mut Criterion) {
    let team_stats = team_stats_payload();
    c.bench_function("flatten_team_stats", |b| {
        b.iter(|| black_box(flatten_fixture_team_stats(black_box(&team_stats))))
    });

    let player_stats = player_stats_payload();
    c.bench_function("flatten_player_stats", |b| {
        b.iter(|| black_box(flatten_fixture_player_stats(black_box(&player_stats))))
    });

    let fixtures = season_fixtures();
    c.bench_function("finished_fixture_labels", |b| {
        b.iter(|| black_box(finished_fixture_labels(black_box(&fixtures))))
    });
}

criterion_group!(benches, bench_shapes);
criterion_main!(benches);
