//! Persistence interface consumed by the schedule core.
//!
//! The server always runs on Postgres (`MatchupQueries`, `SettingsQueries`).
//! `InMemoryStore` is only wired by the integration tests.

pub mod matchup_queries;
pub mod memory;
pub mod settings_queries;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::matchup::{Matchup, MatchupChanges, MatchupRecord};

pub use matchup_queries::MatchupQueries;
pub use memory::InMemoryStore;
pub use settings_queries::SettingsQueries;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The (season_type, away_team, home_team) uniqueness constraint rejected an insert
    #[error("matchup {season_type} {away_team} @ {home_team} already exists")]
    Duplicate {
        season_type: String,
        away_team: String,
        home_team: String,
    },
    #[error("matchup {0} not found")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MatchupStore: Send + Sync {
    async fn find_matchup(
        &self,
        season_type: &str,
        away_team: &str,
        home_team: &str,
    ) -> StoreResult<Option<Matchup>>;

    /// Insert a new matchup under a freshly generated id and return it.
    /// Fails with `StoreError::Duplicate` when the matchup already exists.
    async fn insert_matchup(&self, record: &MatchupRecord) -> StoreResult<Uuid>;

    async fn update_matchup(&self, id: Uuid, changes: &MatchupChanges) -> StoreResult<()>;

    /// All matchups of one week, ordered by kickoff
    async fn list_week(&self, season_type: &str) -> StoreResult<Vec<Matchup>>;

    /// Administrative reset of one week; returns the number of rows removed
    async fn delete_week(&self, season_type: &str) -> StoreResult<u64>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set_setting(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Upsert several keys atomically: either all are written or none
    async fn set_settings(&self, entries: &[(&str, String)]) -> StoreResult<()>;
}
