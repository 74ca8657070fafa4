//! Records returned by the query functions, plus the upstream entry shapes
//! they are decoded from.
//!
//! Upstream payloads are sparse: nearly every nested field may be `null` or
//! absent, so entry types default aggressively and leave the choice of a
//! display fallback to the adapters in [`crate::shape`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type Season = u16;

/// Placeholder surfaced for optional per-player fields the upstream omits.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: u32,
    pub name: String,
    pub kind: Option<String>,
    pub country: Option<String>,
    pub current_season: Option<Season>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub age: Option<u16>,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u32,
    /// ISO-8601 kickoff as sent upstream, usually with an offset.
    pub date: String,
    pub status: String,
    pub home: String,
    pub away: String,
    pub round: Option<String>,
    pub home_goals: Option<u8>,
    pub away_goals: Option<u8>,
}

impl Fixture {
    pub fn is_finished(&self) -> bool {
        self.status == "FT"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureLabel {
    pub fixture_id: u32,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Player season statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueRef {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<Season>,
}

/// One statistics entry of a player for a single team in a single season.
/// A player who moved mid-season has one of these per team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSeasonStats {
    pub team: TeamRef,
    pub league: LeagueRef,
    pub games: SeasonGames,
    pub shots: Shots,
    pub goals: Goals,
    pub passes: Passes,
    pub tackles: Tackles,
    pub duels: Duels,
    pub dribbles: Dribbles,
    pub fouls: Fouls,
    pub cards: Cards,
    pub penalty: Penalty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonGames {
    #[serde(rename = "appearences", alias = "appearances")]
    pub appearances: Option<u32>,
    pub lineups: Option<u32>,
    pub minutes: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub number: Option<u32>,
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_f32")]
    pub rating: Option<f32>,
    pub captain: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shots {
    pub total: Option<u32>,
    pub on: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub total: Option<u32>,
    pub conceded: Option<u32>,
    pub assists: Option<u32>,
    pub saves: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Passes {
    pub total: Option<u32>,
    pub key: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub accuracy: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tackles {
    pub total: Option<u32>,
    pub blocks: Option<u32>,
    pub interceptions: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Duels {
    pub total: Option<u32>,
    pub won: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dribbles {
    pub attempts: Option<u32>,
    pub success: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fouls {
    pub drawn: Option<u32>,
    pub committed: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cards {
    pub yellow: Option<u32>,
    pub yellowred: Option<u32>,
    pub red: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Penalty {
    pub scored: Option<u32>,
    pub missed: Option<u32>,
    pub saved: Option<u32>,
}

// ---------------------------------------------------------------------------
// Fixture statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatValue {
    Count(i64),
    Decimal(f64),
    Text(String),
    Null,
}

impl From<&Value> for StatValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => StatValue::Count(i),
                None => n.as_f64().map(StatValue::Decimal).unwrap_or(StatValue::Null),
            },
            Value::String(s) => StatValue::Text(s.trim().to_string()),
            Value::Null => StatValue::Null,
            Value::Bool(b) => StatValue::Text(b.to_string()),
            other => StatValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{n}"),
            StatValue::Decimal(n) => write!(f, "{n}"),
            StatValue::Text(s) => f.write_str(s),
            StatValue::Null => f.write_str("-"),
        }
    }
}

/// Stat types down, teams across. `values[i]` belongs to `teams[i]`; a
/// `None` cell means that team's payload never mentioned the stat type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FixtureTeamStats {
    pub teams: Vec<String>,
    pub rows: Vec<TeamStatRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStatRow {
    pub stat: String,
    pub values: Vec<Option<StatValue>>,
}

impl FixtureTeamStats {
    pub fn get(&self, team: &str, stat: &str) -> Option<&StatValue> {
        let col = self.teams.iter().position(|t| t == team)?;
        let row = self.rows.iter().find(|r| r.stat == stat)?;
        row.values.get(col)?.as_ref()
    }

    pub fn team_column(&self, team: &str) -> Vec<(&str, &StatValue)> {
        let Some(col) = self.teams.iter().position(|t| t == team) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| {
                r.values
                    .get(col)
                    .and_then(|v| v.as_ref())
                    .map(|v| (r.stat.as_str(), v))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatRow {
    pub team: String,
    pub player_id: u32,
    pub player_name: String,
    pub position: String,
    pub number: String,
    pub minutes: Option<u32>,
    pub rating: Option<f32>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub passes_total: Option<u32>,
    pub passes_accuracy: Option<u32>,
    pub tackles: Option<u32>,
    pub fouls_committed: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FixturePlayerStats {
    pub rows: Vec<PlayerStatRow>,
}

// ---------------------------------------------------------------------------
// Upstream entry shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntry {
    pub league: LeagueInfo,
    #[serde(default)]
    pub country: Option<NamedRef>,
    #[serde(default)]
    pub seasons: Vec<SeasonInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueInfo {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonInfo {
    pub year: Season,
    #[serde(default)]
    pub current: bool,
}

impl From<LeagueEntry> for League {
    fn from(entry: LeagueEntry) -> Self {
        let current_season = entry.seasons.iter().find(|s| s.current).map(|s| s.year);
        League {
            id: entry.league.id,
            name: entry.league.name,
            kind: entry.league.kind,
            country: entry.country.and_then(|c| c.name),
            current_season,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntry {
    pub team: TeamInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl From<TeamEntry> for Team {
    fn from(entry: TeamEntry) -> Self {
        Team {
            id: entry.team.id,
            name: entry.team.name,
            code: entry.team.code,
            country: entry.team.country,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntry {
    pub player: PlayerInfo,
    #[serde(default)]
    pub statistics: Vec<PlayerSeasonStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub age: Option<u16>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl From<PlayerInfo> for Player {
    fn from(info: PlayerInfo) -> Self {
        Player {
            id: info.id,
            name: info.name,
            age: info.age,
            nationality: info.nationality,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    pub fixture: FixtureInfo,
    #[serde(default)]
    pub league: Option<FixtureLeague>,
    pub teams: FixtureSides,
    #[serde(default)]
    pub goals: Option<FixtureGoals>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureInfo {
    pub id: u32,
    pub date: String,
    pub status: FixtureStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureStatus {
    #[serde(default)]
    pub short: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureLeague {
    #[serde(default)]
    pub round: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSides {
    pub home: TeamRef,
    pub away: TeamRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureGoals {
    #[serde(default)]
    pub home: Option<u8>,
    #[serde(default)]
    pub away: Option<u8>,
}

impl From<FixtureEntry> for Fixture {
    fn from(entry: FixtureEntry) -> Self {
        let goals = entry.goals.unwrap_or(FixtureGoals {
            home: None,
            away: None,
        });
        Fixture {
            id: entry.fixture.id,
            date: entry.fixture.date,
            status: entry.fixture.status.short.unwrap_or_default(),
            home: entry.teams.home.name,
            away: entry.teams.away.name,
            round: entry.league.and_then(|l| l.round),
            home_goals: goals.home,
            away_goals: goals.away,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamStatsEntry {
    pub team: TeamRef,
    #[serde(default)]
    pub statistics: Vec<TeamStatEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamStatEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturePlayersEntry {
    pub team: TeamRef,
    #[serde(default)]
    pub players: Vec<FixturePlayerEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturePlayerEntry {
    pub player: PlayerRef,
    #[serde(default)]
    pub statistics: Vec<FixturePlayerLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixturePlayerLine {
    pub games: MatchGames,
    pub goals: Goals,
    pub passes: Passes,
    pub tackles: Tackles,
    pub fouls: Fouls,
    pub cards: Cards,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchGames {
    pub minutes: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub number: Option<u32>,
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_f32")]
    pub rating: Option<f32>,
}

/// Accepts `12`, `"12"`, `"12%"` or `null`.
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse::<u32>().ok(),
        _ => None,
    })
}

/// Ratings arrive as strings such as `"7.214"`.
fn lenient_f32<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().map(|n| n as f32),
        Some(Value::String(s)) => s.trim().parse::<f32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn league_entry_picks_current_season() {
        let entry: LeagueEntry = serde_json::from_value(json!({
            "league": {"id": 254, "name": "NWSL Women", "type": "League"},
            "country": {"name": "USA"},
            "seasons": [{"year": 2024, "current": false}, {"year": 2025, "current": true}]
        }))
        .unwrap();
        let league = League::from(entry);
        assert_eq!(league.current_season, Some(2025));
        assert_eq!(league.country.as_deref(), Some("USA"));
    }

    #[test]
    fn lenient_numbers_accept_strings() {
        let games: MatchGames = serde_json::from_value(json!({
            "minutes": 90, "number": "9", "position": "F", "rating": "7.3"
        }))
        .unwrap();
        assert_eq!(games.number, Some(9));
        assert!(games.rating.is_some_and(|r| (r - 7.3).abs() < 1e-4));

        let passes: Passes =
            serde_json::from_value(json!({"total": 40, "accuracy": "31%"})).unwrap();
        assert_eq!(passes.accuracy, Some(31));
    }

    #[test]
    fn oversized_numbers_are_dropped_not_wrapped() {
        let passes: Passes =
            serde_json::from_value(json!({"total": 12, "accuracy": 4_294_967_296u64})).unwrap();
        assert_eq!(passes.accuracy, None);

        let passes: Passes =
            serde_json::from_value(json!({"accuracy": 4_294_967_295u64})).unwrap();
        assert_eq!(passes.accuracy, Some(u32::MAX));
    }

    #[test]
    fn stat_value_from_json() {
        assert_eq!(StatValue::from(&json!(5)), StatValue::Count(5));
        assert_eq!(StatValue::from(&json!("55%")), StatValue::Text("55%".into()));
        assert_eq!(StatValue::from(&Value::Null), StatValue::Null);
        assert_eq!(StatValue::Null.to_string(), "-");
    }
}
