use async_trait::async_trait;
use serde::Deserialize;

use crate::league::mapping::{espn_code, map_status};
use crate::models::matchup::MatchupStatus;
use crate::models::week::{SeasonPhase, SeasonWeek};
use crate::providers::{
    GameRecord, HttpFetcher, OddsInfo, ProviderError, ScheduleProvider, VenueInfo, WeatherInfo,
};

// ESPN numbers the Pro Bowl as postseason week 4; the pool skips it.
const ESPN_SUPER_BOWL_WEEK: u8 = 5;

/// Schedule source backed by ESPN's public NFL scoreboard API
pub struct EspnProvider {
    fetcher: HttpFetcher,
    base_url: String,
    season_year: i32,
}

impl EspnProvider {
    pub fn new(fetcher: HttpFetcher, base_url: String, season_year: i32) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            season_year,
        }
    }

    fn scoreboard_url(&self, week: SeasonWeek) -> String {
        format!(
            "{}/scoreboard?seasontype={}&week={}&dates={}&limit=100",
            self.base_url,
            espn_code(week.phase),
            espn_week(week),
            self.season_year
        )
    }
}

fn espn_week(week: SeasonWeek) -> u8 {
    match week.phase {
        SeasonPhase::Postseason if week.week == 4 => ESPN_SUPER_BOWL_WEEK,
        _ => week.week,
    }
}

#[async_trait]
impl ScheduleProvider for EspnProvider {
    fn name(&self) -> &'static str {
        "espn"
    }

    async fn fetch_week_schedule(&self, week: SeasonWeek) -> Result<Vec<GameRecord>, ProviderError> {
        let url = self.scoreboard_url(week);
        tracing::debug!("Fetching ESPN scoreboard for {} from {}", week, url);

        let scoreboard: EspnScoreboard = self.fetcher.get_json(&url).await?;
        let games: Vec<GameRecord> = scoreboard
            .events
            .unwrap_or_default()
            .into_iter()
            .filter_map(map_event)
            .collect();

        tracing::info!("ESPN returned {} game(s) for {}", games.len(), week);
        Ok(games)
    }
}

/// Events without a competition are skipped; a competition with missing
/// teams still yields a record so the mapping layer can report it.
fn map_event(event: EspnEvent) -> Option<GameRecord> {
    let competition = event.competitions.unwrap_or_default().into_iter().next()?;
    let competitors = competition.competitors.unwrap_or_default();

    let side = |home_away: &str| {
        competitors
            .iter()
            .find(|c| c.home_away.as_deref() == Some(home_away))
    };
    let away = side("away");
    let home = side("home");

    let team_name = |c: Option<&EspnCompetitor>| {
        c.and_then(|c| c.team.as_ref())
            .and_then(|t| t.abbreviation.clone().or_else(|| t.display_name.clone()))
            .unwrap_or_default()
    };
    let score = |c: Option<&EspnCompetitor>| {
        c.and_then(|c| c.score.as_deref())
            .and_then(|s| s.trim().parse::<i32>().ok())
    };

    let status = event
        .status
        .as_ref()
        .or(competition.status.as_ref())
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.name.clone().or_else(|| t.state.clone()));

    // ESPN reports 0-0 placeholders until kickoff, also for postponed games
    let started = matches!(
        map_status(status.as_deref()),
        MatchupStatus::Live | MatchupStatus::Final
    );

    let venue = competition.venue.and_then(|v| {
        v.full_name.map(|name| VenueInfo {
            name,
            city: v.address.and_then(|a| a.city),
        })
    });

    let weather = event.weather.map(|w| WeatherInfo {
        temp_f: w.temperature,
        condition: w.display_value,
        wind_mph: None,
    });

    let odds = competition
        .odds
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|o| OddsInfo {
            spread: o.spread,
            over_under: o.over_under,
        });

    Some(GameRecord {
        away_team: team_name(away),
        home_team: team_name(home),
        kickoff: event.date.or(competition.date),
        status,
        away_score: if started { score(away) } else { None },
        home_score: if started { score(home) } else { None },
        venue,
        weather,
        odds,
    })
}

// ESPN wire types

#[derive(Debug, Deserialize, Default)]
struct EspnScoreboard {
    events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    date: Option<String>,
    status: Option<EspnStatus>,
    competitions: Option<Vec<EspnCompetition>>,
    weather: Option<EspnWeather>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    date: Option<String>,
    status: Option<EspnStatus>,
    competitors: Option<Vec<EspnCompetitor>>,
    venue: Option<EspnVenue>,
    odds: Option<Vec<EspnOdds>>,
}

#[derive(Debug, Deserialize)]
struct EspnStatus {
    #[serde(rename = "type")]
    status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    state: Option<String>, // "pre", "in", "post"
}

#[derive(Debug, Deserialize)]
struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    home_away: Option<String>,
    team: Option<EspnTeam>,
    score: Option<String>, // ESPN sends scores as strings
}

#[derive(Debug, Deserialize)]
struct EspnTeam {
    abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnVenue {
    #[serde(rename = "fullName")]
    full_name: Option<String>,
    address: Option<EspnAddress>,
}

#[derive(Debug, Deserialize)]
struct EspnAddress {
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnWeather {
    #[serde(rename = "displayValue")]
    display_value: Option<String>,
    temperature: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct EspnOdds {
    spread: Option<f64>,
    #[serde(rename = "overUnder")]
    over_under: Option<f64>,
}
