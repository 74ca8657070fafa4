use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use soccer_stats::cascade::{self, Cascade, LeagueScope, TeamScope};
use soccer_stats::config::AppConfig;
use soccer_stats::models::{
    FixturePlayerStats, FixtureTeamStats, League, PlayerSeasonStats, Season,
};
use soccer_stats::{ApiError, FootballApi};

#[derive(Parser, Debug)]
#[command(name = "soccer_stats", version, about = "Browse league, team, player and fixture statistics")]
struct Cli {
    /// API key (falls back to API_FOOTBALL_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct LeagueArgs {
    /// League name or id (default: NWSL Women)
    #[arg(short, long)]
    league: Option<String>,

    /// Season year (default: the league's current season)
    #[arg(short, long)]
    season: Option<Season>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available leagues
    Leagues,
    /// List seasons, newest first
    Seasons,
    /// List teams of a league season
    Teams(LeagueArgs),
    /// List a team's players for a season
    Players {
        #[command(flatten)]
        scope: LeagueArgs,
        /// Team name or id
        #[arg(short, long)]
        team: String,
    },
    /// Season statistics of one player for the selected team
    PlayerStats {
        #[command(flatten)]
        scope: LeagueArgs,
        #[arg(short, long)]
        team: String,
        /// Player name or id
        #[arg(short, long)]
        player: String,
    },
    /// Finished fixtures of a league season, most recent first
    Fixtures(LeagueArgs),
    /// Round labels of a league season
    Rounds(LeagueArgs),
    /// Team and player statistics of one fixture
    FixtureStats {
        /// Fixture id
        fixture: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        if err.downcast_ref::<ApiError>().is_some_and(ApiError::is_auth) {
            eprintln!("Check your API key. Free keys are available at https://www.api-football.com");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let api_key = cli
        .api_key
        .or(config.api_key.clone())
        .ok_or_else(|| anyhow!("no api key: pass --api-key or set API_FOOTBALL_KEY"))?;

    let api = FootballApi::new(&config.client_config())?;
    let cascade = Cascade::new(&api, &api_key);

    match cli.command {
        Command::Leagues => {
            let leagues = cascade.leagues().context("listing leagues")?;
            for l in &leagues {
                println!(
                    "{:>6}  {}  ({})",
                    l.id,
                    l.name,
                    l.country.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Seasons => {
            for season in cascade.seasons().context("listing seasons")? {
                println!("{season}");
            }
        }
        Command::Teams(args) => {
            let (_, scope) = resolve_league(&cascade, &args)?;
            for team in cascade.teams(&scope).context("listing teams")? {
                println!("{:>6}  {}", team.id, team.name);
            }
        }
        Command::Players { scope, team } => {
            let team_scope = resolve_team(&cascade, &scope, &team)?;
            for player in cascade.players(&team_scope).context("listing players")? {
                println!("{:>8}  {}", player.id, player.name);
            }
        }
        Command::PlayerStats {
            scope,
            team,
            player,
        } => {
            let team_scope = resolve_team(&cascade, &scope, &team)?;
            let players = cascade.players(&team_scope).context("listing players")?;
            let player = cascade::find_player(&players, &player)
                .ok_or_else(|| anyhow!("player {player:?} not found"))?;
            match cascade
                .player_stats(&team_scope, player)
                .context("fetching player statistics")?
            {
                Some(stats) => print_player_stats(&player.name, &stats),
                None => println!("No statistics for {} with this team.", player.name),
            }
        }
        Command::Fixtures(args) => {
            let (_, scope) = resolve_league(&cascade, &args)?;
            let labels = cascade
                .finished_fixtures(&scope)
                .context("listing fixtures")?;
            for label in &labels {
                println!("{:>8}  {}", label.fixture_id, label.label);
            }
        }
        Command::Rounds(args) => {
            let (_, scope) = resolve_league(&cascade, &args)?;
            for round in cascade.rounds(&scope).context("listing rounds")? {
                println!("{round}");
            }
        }
        Command::FixtureStats { fixture } => {
            match cascade
                .fixture_team_stats(fixture)
                .context("fetching fixture statistics")?
            {
                Some(stats) => print_team_stats(&stats),
                None => println!("No team statistics for fixture {fixture}."),
            }
            println!();
            match cascade
                .fixture_player_stats(fixture)
                .context("fetching fixture player statistics")?
            {
                Some(stats) => print_player_table(&stats),
                None => println!("No player statistics for fixture {fixture}."),
            }
        }
    }
    Ok(())
}

fn resolve_league(cascade: &Cascade<'_>, args: &LeagueArgs) -> Result<(League, LeagueScope)> {
    let leagues = cascade.leagues().context("listing leagues")?;
    let league = cascade::pick_league(&leagues, args.league.as_deref())
        .cloned()
        .ok_or_else(|| anyhow!("league {:?} not found", args.league.as_deref().unwrap_or("")))?;

    let season = match args.season {
        Some(season) => season,
        None => {
            let seasons = cascade.seasons().context("listing seasons")?;
            let year = Season::try_from(Utc::now().year()).unwrap_or(Season::MAX);
            cascade::default_season(&seasons, Some(&league), year)
                .ok_or_else(|| anyhow!("no seasons available"))?
        }
    };
    let scope = LeagueScope::new(&league, season);
    Ok((league, scope))
}

fn resolve_team(cascade: &Cascade<'_>, args: &LeagueArgs, team: &str) -> Result<TeamScope> {
    let (league, scope) = resolve_league(cascade, args)?;
    let teams = cascade.teams(&scope).context("listing teams")?;
    let team = cascade::find_team(&teams, team)
        .ok_or_else(|| anyhow!("team {team:?} not found in {} {}", league.name, scope.season))?;
    Ok(scope.team(team))
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_player_stats(name: &str, s: &PlayerSeasonStats) {
    println!(
        "{name} - {} ({} {})",
        s.team.name,
        s.league.name.as_deref().unwrap_or("-"),
        opt(s.league.season)
    );
    let rows = [
        ("Position", s.games.position.clone()),
        ("Appearances", s.games.appearances.map(|v| v.to_string())),
        ("Lineups", s.games.lineups.map(|v| v.to_string())),
        ("Minutes", s.games.minutes.map(|v| v.to_string())),
        ("Rating", s.games.rating.map(|v| format!("{v:.2}"))),
        ("Goals", s.goals.total.map(|v| v.to_string())),
        ("Assists", s.goals.assists.map(|v| v.to_string())),
        ("Shots (on)", s.shots.total.map(|t| format!("{t} ({})", opt(s.shots.on)))),
        ("Passes", s.passes.total.map(|v| v.to_string())),
        ("Key passes", s.passes.key.map(|v| v.to_string())),
        ("Tackles", s.tackles.total.map(|v| v.to_string())),
        ("Duels won", s.duels.won.map(|v| v.to_string())),
        ("Fouls committed", s.fouls.committed.map(|v| v.to_string())),
        ("Yellow cards", s.cards.yellow.map(|v| v.to_string())),
        ("Red cards", s.cards.red.map(|v| v.to_string())),
        ("Penalties scored", s.penalty.scored.map(|v| v.to_string())),
    ];
    for (label, value) in rows {
        println!("  {label:<18}{}", value.unwrap_or_else(|| "-".to_string()));
    }
}

fn print_team_stats(stats: &FixtureTeamStats) {
    let width = stats.rows.iter().map(|r| r.stat.len()).max().unwrap_or(0);
    print!("{:width$}", "");
    for team in &stats.teams {
        print!("  {team:>20}");
    }
    println!();
    for row in &stats.rows {
        print!("{:width$}", row.stat);
        for value in &row.values {
            print!("  {:>20}", opt(value.as_ref()));
        }
        println!();
    }
}

fn print_player_table(stats: &FixturePlayerStats) {
    println!(
        "{:<20} {:<24} {:>3} {:>3} {:>4} {:>5} {:>2} {:>2} {:>4} {:>4} {:>3} {:>3} {:>2} {:>2}",
        "Team", "Player", "Pos", "No", "Min", "Rtg", "G", "A", "Pas", "Acc", "Tkl", "Fls", "Y", "R"
    );
    for r in &stats.rows {
        println!(
            "{:<20} {:<24} {:>3} {:>3} {:>4} {:>5} {:>2} {:>2} {:>4} {:>4} {:>3} {:>3} {:>2} {:>2}",
            r.team,
            r.player_name,
            r.position,
            r.number,
            opt(r.minutes),
            opt(r.rating.map(|v| format!("{v:.1}"))),
            opt(r.goals),
            opt(r.assists),
            opt(r.passes_total),
            opt(r.passes_accuracy),
            opt(r.tackles),
            opt(r.fouls_committed),
            opt(r.yellow_cards),
            opt(r.red_cards),
        );
    }
}
