use serde::Deserialize;
use secrecy::SecretString;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleSourceSettings {
    /// One of `espn`, `sportsdata`, `scrape`, `mock`
    pub provider: String,
    pub season_year: i32,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub espn_base_url: String,
    pub sportsdata_base_url: String,
    #[serde(default)]
    pub sportsdata_api_key: Option<SecretString>,
    /// Template with `{season}`, `{phase}` and `{week}` placeholders
    #[serde(default)]
    pub scrape_url: Option<String>,
}

impl ScheduleSourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
