use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::http_client::{ClientConfig, HttpTransport, RawResponse, Transport};
use crate::models::{
    Fixture, FixtureEntry, FixturePlayerStats, FixturePlayersEntry, FixtureTeamStats, League,
    LeagueEntry, Player, PlayerEntry, PlayerSeasonStats, Season, Team, TeamEntry,
    TeamStatsEntry,
};
use crate::shape;

const AUTH_ERROR_KEYS: &[&str] = &["token", "access", "key"];
const RATE_LIMIT_KEYS: &[&str] = &["requests", "rateLimit"];

#[derive(Debug, Clone)]
pub struct FootballApi<T = HttpTransport> {
    transport: T,
}

impl FootballApi<HttpTransport> {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> FootballApi<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_leagues(&self, api_key: &str) -> ApiResult<Vec<League>> {
        let entries: Vec<LeagueEntry> = self.fetch("/leagues", &[], api_key)?;
        Ok(entries.into_iter().map(League::from).collect())
    }

    pub fn list_seasons(&self, api_key: &str) -> ApiResult<Vec<Season>> {
        self.fetch("/leagues/seasons", &[], api_key)
    }

    pub fn list_teams(&self, api_key: &str, league_id: u32, season: Season) -> ApiResult<Vec<Team>> {
        let query = [("league", league_id.to_string()), ("season", season.to_string())];
        let entries: Vec<TeamEntry> = self.fetch("/teams", &query, api_key)?;
        Ok(entries.into_iter().map(Team::from).collect())
    }

    pub fn list_team_players(
        &self,
        api_key: &str,
        team_id: u32,
        season: Season,
    ) -> ApiResult<Vec<Player>> {
        let query = [("team", team_id.to_string()), ("season", season.to_string())];
        let entries: Vec<PlayerEntry> = self.fetch("/players", &query, api_key)?;
        Ok(entries.into_iter().map(|e| Player::from(e.player)).collect())
    }

    pub fn get_player_stats(
        &self,
        api_key: &str,
        player_id: u32,
        team_id: u32,
        season: Season,
    ) -> ApiResult<Option<PlayerSeasonStats>> {
        let query = [("id", player_id.to_string()), ("season", season.to_string())];
        let entries: Vec<PlayerEntry> = self.fetch("/players", &query, api_key)?;
        if entries.is_empty() {
            return Ok(None);
        }
        if entries.len() > 1 {
            warn!(
                player_id,
                season,
                records = entries.len(),
                "ambiguous player id, matching by team across all records"
            );
        }
        Ok(shape::select_player_stats(&entries, team_id))
    }

    pub fn list_fixtures(
        &self,
        api_key: &str,
        league_id: u32,
        season: Season,
    ) -> ApiResult<Vec<Fixture>> {
        let query = [("league", league_id.to_string()), ("season", season.to_string())];
        let entries: Vec<FixtureEntry> = self.fetch("/fixtures", &query, api_key)?;
        Ok(entries.into_iter().map(Fixture::from).collect())
    }

    pub fn list_rounds(
        &self,
        api_key: &str,
        league_id: u32,
        season: Season,
    ) -> ApiResult<Vec<String>> {
        let query = [("league", league_id.to_string()), ("season", season.to_string())];
        self.fetch("/fixtures/rounds", &query, api_key)
    }

    pub fn get_fixture_team_stats(
        &self,
        api_key: &str,
        fixture_id: u32,
    ) -> ApiResult<Option<FixtureTeamStats>> {
        let query = [("fixture", fixture_id.to_string())];
        let entries: Vec<TeamStatsEntry> = self.fetch("/fixtures/statistics", &query, api_key)?;
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(shape::flatten_fixture_team_stats(&entries)))
    }

    pub fn get_fixture_player_stats(
        &self,
        api_key: &str,
        fixture_id: u32,
    ) -> ApiResult<Option<FixturePlayerStats>> {
        let query = [("fixture", fixture_id.to_string())];
        let entries: Vec<FixturePlayersEntry> = self.fetch("/fixtures/players", &query, api_key)?;
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(shape::flatten_fixture_player_stats(&entries)))
    }

    fn fetch<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        api_key: &str,
    ) -> ApiResult<R> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ApiError::Auth("no api key supplied".to_string()));
        }
        if HeaderValue::from_str(api_key).is_err() {
            return Err(ApiError::Auth(
                "api key contains characters not allowed in a header".to_string(),
            ));
        }
        let raw = self.transport.get(path, query, api_key)?;
        let response = decode_envelope(path, &raw)?;
        serde_json::from_value(response).map_err(|err| ApiError::parse(path, err.to_string()))
    }
}

pub fn decode_envelope(path: &str, raw: &RawResponse) -> ApiResult<Value> {
    if raw.status == 401 || raw.status == 403 {
        return Err(ApiError::Auth(format!("http {}", raw.status)));
    }
    if !(200..300).contains(&raw.status) {
        return Err(ApiError::Status {
            path: path.to_string(),
            status: raw.status,
        });
    }

    let trimmed = raw.body.trim();
    if trimmed.is_empty() {
        return Err(ApiError::parse(path, "empty body"));
    }
    let mut root: Value =
        serde_json::from_str(trimmed).map_err(|err| ApiError::parse(path, err.to_string()))?;

    if let Some(errors) = root.get("errors") {
        check_envelope_errors(path, errors)?;
    }
    if let Some(results) = root.get("results").and_then(|v| v.as_u64()) {
        debug!(path, results, "envelope");
    }

    match root.get_mut("response") {
        Some(response) => Ok(response.take()),
        None => Err(ApiError::parse(path, "missing `response` field")),
    }
}

/// `errors` is `[]` on success and an object keyed by problem otherwise.
fn check_envelope_errors(path: &str, errors: &Value) -> ApiResult<()> {
    let Some(map) = errors.as_object() else {
        return match errors.as_array() {
            Some(list) if !list.is_empty() => Err(ApiError::Upstream {
                path: path.to_string(),
                detail: errors.to_string(),
            }),
            _ => Ok(()),
        };
    };
    if map.is_empty() {
        return Ok(());
    }

    let detail = map
        .iter()
        .map(|(k, v)| match v.as_str() {
            Some(s) => format!("{k}: {s}"),
            None => format!("{k}: {v}"),
        })
        .collect::<Vec<_>>()
        .join("; ");
    if map.keys().any(|k| AUTH_ERROR_KEYS.contains(&k.as_str())) {
        return Err(ApiError::Auth(detail));
    }
    if map.keys().any(|k| RATE_LIMIT_KEYS.contains(&k.as_str())) {
        return Err(ApiError::RateLimited {
            path: path.to_string(),
            detail,
        });
    }
    Err(ApiError::Upstream {
        path: path.to_string(),
        detail,
    })
}
