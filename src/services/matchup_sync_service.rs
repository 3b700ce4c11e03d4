use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{MatchupStore, StoreError};
use crate::error::SyncError;
use crate::league::mapping::map_game;
use crate::models::matchup::{Matchup, MatchupRecord};
use crate::models::sync::{SyncSummary, WeekSyncReport};
use crate::models::week::SeasonWeek;
use crate::providers::ScheduleProvider;
use crate::services::week_service::WeekService;

/// What happened to a single game during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Created(Uuid),
    Updated(Uuid),
    Unchanged(Uuid),
}

/// Reconciles provider schedules into the matchup table.
///
/// Games are processed one at a time. The store's uniqueness constraint
/// settles races with a concurrent run: a rejected insert becomes an update.
#[derive(Clone)]
pub struct MatchupSyncService {
    provider: Arc<dyn ScheduleProvider>,
    matchups: Arc<dyn MatchupStore>,
    week_service: WeekService,
}

impl MatchupSyncService {
    pub fn new(
        provider: Arc<dyn ScheduleProvider>,
        matchups: Arc<dyn MatchupStore>,
        week_service: WeekService,
    ) -> Self {
        Self {
            provider,
            matchups,
            week_service,
        }
    }

    /// Synchronize the calculator's current week and the one after it
    pub async fn sync_current_and_next(&self) -> SyncSummary {
        let current = self.week_service.calculate_current_week().await.season_week();
        let weeks: Vec<SeasonWeek> = std::iter::once(current).chain(current.next()).collect();
        self.sync_weeks(&weeks).await
    }

    pub async fn sync_weeks(&self, weeks: &[SeasonWeek]) -> SyncSummary {
        let mut reports = Vec::with_capacity(weeks.len());
        let mut failed_fetches = 0;

        for week in weeks {
            match self.sync_week(*week).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    failed_fetches += 1;
                    reports.push(WeekSyncReport::fetch_failed(*week, e.to_string()));
                }
            }
        }

        let summary = SyncSummary::from_reports(reports, failed_fetches);
        tracing::info!("{}", summary.message);
        summary
    }

    /// One synchronization run for a single week.
    ///
    /// Fails only when the schedule source cannot be fetched; per-game
    /// problems are collected in the report.
    #[tracing::instrument(name = "Sync week", skip(self), fields(week = %week, provider = self.provider.name()))]
    pub async fn sync_week(&self, week: SeasonWeek) -> Result<WeekSyncReport, SyncError> {
        let games = self.provider.fetch_week_schedule(week).await.map_err(|e| {
            tracing::error!("❌ Schedule fetch for {} failed: {}", week, e);
            SyncError::SourceFetch(e)
        })?;

        let mut report = WeekSyncReport::new(week);
        report.games_found = games.len();
        let synced_at = Utc::now();

        for game in &games {
            let record = match map_game(game, week, self.provider.name()) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping {} @ {}: {}", game.away_team, game.home_team, e);
                    report.errors.push(format!("{} @ {}: {}", game.away_team, game.home_team, SyncError::from(e)));
                    continue;
                }
            };

            match self.reconcile(&record, synced_at).await {
                Ok(GameOutcome::Created(_)) => report.created += 1,
                Ok(GameOutcome::Updated(_)) => report.updated += 1,
                Ok(GameOutcome::Unchanged(_)) => report.unchanged += 1,
                Err(e) => {
                    tracing::error!("Failed to store {} @ {} for {}: {}", record.away_team, record.home_team, week, e);
                    report.errors.push(format!("{} @ {}: {}", record.away_team, record.home_team, SyncError::from(e)));
                }
            }
        }

        tracing::info!(
            "✅ {}: {} found, {} created, {} updated, {} unchanged, {} error(s)",
            week,
            report.games_found,
            report.created,
            report.updated,
            report.unchanged,
            report.errors.len()
        );

        Ok(report)
    }

    /// Insert or update one normalized record, preserving the stored id
    pub async fn reconcile(&self, record: &MatchupRecord, synced_at: DateTime<Utc>) -> Result<GameOutcome, StoreError> {
        let existing = self
            .matchups
            .find_matchup(&record.season_type, &record.away_team, &record.home_team)
            .await?;

        if let Some(existing) = existing {
            return self.update_existing(&existing, record, synced_at).await;
        }

        match self.matchups.insert_matchup(record).await {
            Ok(id) => {
                tracing::debug!("Created matchup {} for {} {} @ {}", id, record.season_type, record.away_team, record.home_team);
                Ok(GameOutcome::Created(id))
            }
            Err(StoreError::Duplicate { .. }) => {
                // Another run inserted the same game between our lookup and insert
                tracing::debug!(
                    "Matchup {} {} @ {} already exists, updating instead",
                    record.season_type, record.away_team, record.home_team
                );
                let existing = self
                    .matchups
                    .find_matchup(&record.season_type, &record.away_team, &record.home_team)
                    .await?
                    .ok_or_else(|| StoreError::Duplicate {
                        season_type: record.season_type.clone(),
                        away_team: record.away_team.clone(),
                        home_team: record.home_team.clone(),
                    })?;
                self.update_existing(&existing, record, synced_at).await
            }
            Err(e) => Err(e),
        }
    }

    async fn update_existing(
        &self,
        existing: &Matchup,
        record: &MatchupRecord,
        synced_at: DateTime<Utc>,
    ) -> Result<GameOutcome, StoreError> {
        match existing.reconcile(record, synced_at) {
            Some(changes) => {
                self.matchups.update_matchup(existing.id, &changes).await?;
                tracing::debug!("Updated matchup {} ({} @ {})", existing.id, existing.away_team, existing.home_team);
                Ok(GameOutcome::Updated(existing.id))
            }
            None => Ok(GameOutcome::Unchanged(existing.id)),
        }
    }

    pub async fn list_week(&self, week: SeasonWeek) -> Result<Vec<Matchup>, SyncError> {
        Ok(self.matchups.list_week(&week.tag()).await?)
    }

    /// Administrative reset: remove every matchup of one week
    pub async fn reset_week(&self, week: SeasonWeek) -> Result<u64, SyncError> {
        let deleted = self.matchups.delete_week(&week.tag()).await?;
        tracing::warn!("🗑️ Reset {}: deleted {} matchup(s)", week, deleted);
        Ok(deleted)
    }
}
