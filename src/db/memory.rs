use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{MatchupStore, SettingsStore, StoreError, StoreResult};
use crate::models::matchup::{Matchup, MatchupChanges, MatchupRecord};

/// Process-local store with the same uniqueness rules as the Postgres schema
#[derive(Default)]
pub struct InMemoryStore {
    matchups: RwLock<HashMap<Uuid, Matchup>>,
    settings: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent write, as a lost database connection would
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn matchup_count(&self) -> usize {
        self.matchups.read().await.len()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("writes are disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MatchupStore for InMemoryStore {
    async fn find_matchup(
        &self,
        season_type: &str,
        away_team: &str,
        home_team: &str,
    ) -> StoreResult<Option<Matchup>> {
        let matchups = self.matchups.read().await;
        Ok(matchups
            .values()
            .find(|m| m.season_type == season_type && m.away_team == away_team && m.home_team == home_team)
            .cloned())
    }

    async fn insert_matchup(&self, record: &MatchupRecord) -> StoreResult<Uuid> {
        self.check_writable()?;
        let mut matchups = self.matchups.write().await;

        let exists = matchups.values().any(|m| {
            m.season_type == record.season_type
                && m.away_team == record.away_team
                && m.home_team == record.home_team
        });
        if exists {
            return Err(StoreError::Duplicate {
                season_type: record.season_type.clone(),
                away_team: record.away_team.clone(),
                home_team: record.home_team.clone(),
            });
        }

        let id = Uuid::new_v4();
        matchups.insert(id, record.clone().into_matchup(id, Utc::now()));
        Ok(id)
    }

    async fn update_matchup(&self, id: Uuid, changes: &MatchupChanges) -> StoreResult<()> {
        self.check_writable()?;
        let mut matchups = self.matchups.write().await;
        let matchup = matchups.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        matchup.apply(changes);
        Ok(())
    }

    async fn list_week(&self, season_type: &str) -> StoreResult<Vec<Matchup>> {
        let matchups = self.matchups.read().await;
        let mut week: Vec<Matchup> = matchups
            .values()
            .filter(|m| m.season_type == season_type)
            .cloned()
            .collect();
        week.sort_by(|a, b| a.game_time.cmp(&b.game_time).then_with(|| a.home_team.cmp(&b.home_team)));
        Ok(week)
    }

    async fn delete_week(&self, season_type: &str) -> StoreResult<u64> {
        self.check_writable()?;
        let mut matchups = self.matchups.write().await;
        let before = matchups.len();
        matchups.retain(|_, m| m.season_type != season_type);
        Ok((before - matchups.len()) as u64)
    }
}

#[async_trait]
impl SettingsStore for InMemoryStore {
    async fn get_setting(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_writable()?;
        self.settings.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_settings(&self, entries: &[(&str, String)]) -> StoreResult<()> {
        self.check_writable()?;
        let mut settings = self.settings.write().await;
        for (key, value) in entries {
            settings.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}
