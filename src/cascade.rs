//! The dependent selection flow league → season → team → player / fixture.
//!
//! Every lookup below the league list needs the identifiers of its ancestors,
//! so scoped lookups only accept a [`LeagueScope`] or [`TeamScope`] built from
//! records the previous step returned.

use crate::api_client::FootballApi;
use crate::error::ApiResult;
use crate::http_client::{HttpTransport, Transport};
use crate::models::{
    Fixture, FixtureLabel, FixturePlayerStats, FixtureTeamStats, League, Player,
    PlayerSeasonStats, Season, Team,
};
use crate::shape;

pub const DEFAULT_LEAGUE_NAME: &str = "NWSL Women";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueScope {
    pub league_id: u32,
    pub season: Season,
}

impl LeagueScope {
    pub fn new(league: &League, season: Season) -> Self {
        Self {
            league_id: league.id,
            season,
        }
    }

    pub fn team(&self, team: &Team) -> TeamScope {
        TeamScope {
            team_id: team.id,
            season: self.season,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamScope {
    pub team_id: u32,
    pub season: Season,
}

pub struct Cascade<'a, T: Transport = HttpTransport> {
    api: &'a FootballApi<T>,
    api_key: &'a str,
}

impl<'a, T: Transport> Cascade<'a, T> {
    pub fn new(api: &'a FootballApi<T>, api_key: &'a str) -> Self {
        Self { api, api_key }
    }

    pub fn leagues(&self) -> ApiResult<Vec<League>> {
        self.api.list_leagues(self.api_key)
    }

    pub fn seasons(&self) -> ApiResult<Vec<Season>> {
        let seasons = self.api.list_seasons(self.api_key)?;
        Ok(seasons_descending(seasons))
    }

    pub fn teams(&self, scope: &LeagueScope) -> ApiResult<Vec<Team>> {
        self.api
            .list_teams(self.api_key, scope.league_id, scope.season)
    }

    pub fn players(&self, scope: &TeamScope) -> ApiResult<Vec<Player>> {
        self.api
            .list_team_players(self.api_key, scope.team_id, scope.season)
    }

    pub fn player_stats(
        &self,
        scope: &TeamScope,
        player: &Player,
    ) -> ApiResult<Option<PlayerSeasonStats>> {
        self.api
            .get_player_stats(self.api_key, player.id, scope.team_id, scope.season)
    }

    pub fn fixtures(&self, scope: &LeagueScope) -> ApiResult<Vec<Fixture>> {
        self.api
            .list_fixtures(self.api_key, scope.league_id, scope.season)
    }

    pub fn finished_fixtures(&self, scope: &LeagueScope) -> ApiResult<Vec<FixtureLabel>> {
        let fixtures = self.fixtures(scope)?;
        Ok(shape::finished_fixture_labels(&fixtures))
    }

    pub fn rounds(&self, scope: &LeagueScope) -> ApiResult<Vec<String>> {
        self.api
            .list_rounds(self.api_key, scope.league_id, scope.season)
    }

    pub fn fixture_team_stats(&self, fixture_id: u32) -> ApiResult<Option<FixtureTeamStats>> {
        self.api.get_fixture_team_stats(self.api_key, fixture_id)
    }

    pub fn fixture_player_stats(&self, fixture_id: u32) -> ApiResult<Option<FixturePlayerStats>> {
        self.api.get_fixture_player_stats(self.api_key, fixture_id)
    }
}

pub fn seasons_descending(mut seasons: Vec<Season>) -> Vec<Season> {
    seasons.sort_unstable_by(|a, b| b.cmp(a));
    seasons.dedup();
    seasons
}

/// Requested league (by name or numeric id), else the default league, else
/// the first one listed.
pub fn pick_league<'l>(leagues: &'l [League], wanted: Option<&str>) -> Option<&'l League> {
    if let Some(wanted) = wanted.map(str::trim).filter(|w| !w.is_empty()) {
        return find_by_name_or_id(leagues, wanted, |l| (l.id, l.name.as_str()));
    }
    leagues
        .iter()
        .find(|l| l.name == DEFAULT_LEAGUE_NAME)
        .or_else(|| leagues.first())
}

/// `seasons` must already be newest first. Prefers the league's current
/// season, then the calendar year, then the newest listed.
pub fn default_season(
    seasons: &[Season],
    league: Option<&League>,
    current_year: Season,
) -> Option<Season> {
    let listed = |s: Season| seasons.contains(&s).then_some(s);
    league
        .and_then(|l| l.current_season)
        .and_then(listed)
        .or_else(|| listed(current_year))
        .or_else(|| seasons.first().copied())
}

pub fn find_team<'t>(teams: &'t [Team], wanted: &str) -> Option<&'t Team> {
    find_by_name_or_id(teams, wanted.trim(), |t| (t.id, t.name.as_str()))
}

pub fn find_player<'p>(players: &'p [Player], wanted: &str) -> Option<&'p Player> {
    find_by_name_or_id(players, wanted.trim(), |p| (p.id, p.name.as_str()))
}

fn find_by_name_or_id<'a, R>(
    items: &'a [R],
    wanted: &str,
    key: impl Fn(&R) -> (u32, &str),
) -> Option<&'a R> {
    if let Ok(id) = wanted.parse::<u32>() {
        if let Some(hit) = items.iter().find(|item| key(item).0 == id) {
            return Some(hit);
        }
    }
    items
        .iter()
        .find(|item| key(item).1 == wanted)
        .or_else(|| {
            items
                .iter()
                .find(|item| key(item).1.eq_ignore_ascii_case(wanted))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league(id: u32, name: &str, current: Option<Season>) -> League {
        League {
            id,
            name: name.to_string(),
            kind: None,
            country: None,
            current_season: current,
        }
    }

    #[test]
    fn default_league_then_first() {
        let leagues = vec![league(39, "Premier League", None), league(254, "NWSL Women", None)];
        assert_eq!(pick_league(&leagues, None).map(|l| l.id), Some(254));
        assert_eq!(pick_league(&leagues, Some("39")).map(|l| l.id), Some(39));
        assert_eq!(pick_league(&leagues, Some("premier league")).map(|l| l.id), Some(39));
        assert!(pick_league(&leagues, Some("Serie A")).is_none());
        assert_eq!(pick_league(&leagues[..1], None).map(|l| l.id), Some(39));
    }

    #[test]
    fn season_defaults() {
        let seasons = seasons_descending(vec![2023, 2025, 2024, 2025]);
        assert_eq!(seasons, vec![2025, 2024, 2023]);

        let nwsl = league(254, "NWSL Women", Some(2024));
        assert_eq!(default_season(&seasons, Some(&nwsl), 2026), Some(2024));
        assert_eq!(default_season(&seasons, None, 2023), Some(2023));
        assert_eq!(default_season(&seasons, None, 2030), Some(2025));
        assert_eq!(default_season(&[], None, 2025), None);
    }
}
