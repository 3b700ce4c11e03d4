//! External schedule sources.
//!
//! Every source yields the same raw `GameRecord` shape; normalization into
//! matchups happens in `league::mapping`. The active source is chosen from
//! configuration at startup and injected as `Arc<dyn ScheduleProvider>`.

pub mod espn;
pub mod http;
pub mod mock;
pub mod scrape;
pub mod sportsdata;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::schedule_source::ScheduleSourceSettings;
use crate::error::SyncError;
use crate::models::week::SeasonWeek;

pub use espn::EspnProvider;
pub use http::{HttpFetcher, RetryPolicy};
pub use mock::MockProvider;
pub use scrape::ScrapeProvider;
pub use sportsdata::SportsDataProvider;

/// One game as reported by a schedule source, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameRecord {
    pub away_team: String,
    pub home_team: String,
    pub kickoff: Option<String>,
    pub status: Option<String>,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    pub venue: Option<VenueInfo>,
    pub weather: Option<WeatherInfo>,
    pub odds: Option<OddsInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueInfo {
    pub name: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherInfo {
    pub temp_f: Option<i32>,
    pub condition: Option<String>,
    pub wind_mph: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OddsInfo {
    pub spread: Option<f64>,
    pub over_under: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} timed out after {attempts} attempt(s)")]
    Timeout { url: String, attempts: u32 },
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u16 },
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },
    #[error("could not parse response from {url}: {message}")]
    Parse { url: String, message: String },
    #[error("{0}")]
    InvalidRequest(String),
}

#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    /// Tag stored in `matchups.data_source`
    fn name(&self) -> &'static str;

    async fn fetch_week_schedule(&self, week: SeasonWeek) -> Result<Vec<GameRecord>, ProviderError>;
}

/// Build the configured provider, failing before any fetch when required
/// configuration is missing.
pub fn build_provider(
    settings: &ScheduleSourceSettings,
    default_preseason_start: &str,
) -> Result<Arc<dyn ScheduleProvider>, SyncError> {
    let retry = RetryPolicy::new(settings.max_retries, settings.retry_backoff());

    let provider: Arc<dyn ScheduleProvider> = match settings.provider.trim().to_lowercase().as_str() {
        "espn" => {
            let fetcher = HttpFetcher::new(settings.timeout(), retry)?;
            Arc::new(EspnProvider::new(fetcher, settings.espn_base_url.clone(), settings.season_year))
        }
        "sportsdata" => {
            let api_key = settings
                .sportsdata_api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    SyncError::Configuration("schedule_source.sportsdata_api_key is required for the sportsdata provider".into())
                })?;
            let fetcher = HttpFetcher::new(settings.timeout(), retry)?;
            Arc::new(SportsDataProvider::new(
                fetcher,
                settings.sportsdata_base_url.clone(),
                api_key,
                settings.season_year,
            ))
        }
        "scrape" => {
            let url_template = settings
                .scrape_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| {
                    SyncError::Configuration("schedule_source.scrape_url is required for the scrape provider".into())
                })?;
            let fetcher = HttpFetcher::new(settings.timeout(), retry)?;
            Arc::new(ScrapeProvider::new(fetcher, url_template, settings.season_year))
        }
        "mock" => Arc::new(MockProvider::generated(default_preseason_start)),
        other => {
            return Err(SyncError::Configuration(format!(
                "unknown schedule provider '{}' (expected espn, sportsdata, scrape or mock)",
                other
            )))
        }
    };

    tracing::info!("Using schedule provider '{}'", provider.name());
    Ok(provider)
}
