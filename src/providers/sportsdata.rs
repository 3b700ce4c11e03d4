use async_trait::async_trait;
use serde::Deserialize;

use crate::league::mapping::phase_from_sportsdata_code;
use crate::models::week::{SeasonPhase, SeasonWeek};
use crate::providers::{
    GameRecord, HttpFetcher, OddsInfo, ProviderError, ScheduleProvider, VenueInfo, WeatherInfo,
};

/// Keyed sports-data API. Richer than ESPN: forecasts and point spreads.
pub struct SportsDataProvider {
    fetcher: HttpFetcher,
    base_url: String,
    api_key: String,
    season_year: i32,
}

impl SportsDataProvider {
    pub fn new(fetcher: HttpFetcher, base_url: String, api_key: String, season_year: i32) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            season_year,
        }
    }

    fn season_code(&self, phase: SeasonPhase) -> String {
        let suffix = match phase {
            SeasonPhase::Preseason => "PRE",
            SeasonPhase::Regular => "REG",
            SeasonPhase::Postseason => "POST",
        };
        format!("{}{}", self.season_year, suffix)
    }

    fn scores_url(&self, week: SeasonWeek) -> String {
        format!(
            "{}/scores/json/ScoresByWeek/{}/{}?key={}",
            self.base_url,
            self.season_code(week.phase),
            week.week,
            self.api_key
        )
    }
}

#[async_trait]
impl ScheduleProvider for SportsDataProvider {
    fn name(&self) -> &'static str {
        "sportsdata"
    }

    async fn fetch_week_schedule(&self, week: SeasonWeek) -> Result<Vec<GameRecord>, ProviderError> {
        let games: Vec<SportsDataGame> = self.fetcher.get_json(&self.scores_url(week)).await?;

        let records: Vec<GameRecord> = games
            .into_iter()
            .filter(|game| !game.is_bye())
            .filter(|game| match game.season_type.map(phase_from_sportsdata_code) {
                Some(Ok(phase)) if phase != week.phase => {
                    tracing::warn!(
                        "Skipping {} @ {}: season type {} does not match {}",
                        game.away_team.as_deref().unwrap_or("?"),
                        game.home_team.as_deref().unwrap_or("?"),
                        phase,
                        week
                    );
                    false
                }
                _ => true,
            })
            .map(SportsDataGame::into_record)
            .collect();

        tracing::info!("SportsData returned {} game(s) for {}", records.len(), week);
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SportsDataGame {
    // Null or missing teams still yield a record so mapping reports them per game
    away_team: Option<String>,
    home_team: Option<String>,
    date_time: Option<String>,
    status: Option<String>,
    away_score: Option<i32>,
    home_score: Option<i32>,
    season_type: Option<u8>,
    stadium_details: Option<SportsDataStadium>,
    forecast_temp_high: Option<i32>,
    forecast_description: Option<String>,
    forecast_wind_speed: Option<i32>,
    point_spread: Option<f64>,
    over_under: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SportsDataStadium {
    name: Option<String>,
    city: Option<String>,
}

impl SportsDataGame {
    fn is_bye(&self) -> bool {
        [&self.away_team, &self.home_team]
            .iter()
            .any(|team| team.as_deref().is_some_and(|t| t.eq_ignore_ascii_case("BYE")))
    }

    fn into_record(self) -> GameRecord {
        let weather = if self.forecast_temp_high.is_some()
            || self.forecast_description.is_some()
            || self.forecast_wind_speed.is_some()
        {
            Some(WeatherInfo {
                temp_f: self.forecast_temp_high,
                condition: self.forecast_description,
                wind_mph: self.forecast_wind_speed,
            })
        } else {
            None
        };

        let odds = if self.point_spread.is_some() || self.over_under.is_some() {
            Some(OddsInfo {
                spread: self.point_spread,
                over_under: self.over_under,
            })
        } else {
            None
        };

        GameRecord {
            away_team: self.away_team.unwrap_or_default(),
            home_team: self.home_team.unwrap_or_default(),
            kickoff: self.date_time,
            status: self.status,
            away_score: self.away_score,
            home_score: self.home_score,
            venue: self.stadium_details.and_then(|s| {
                s.name.map(|name| VenueInfo { name, city: s.city })
            }),
            weather,
            odds,
        }
    }
}
