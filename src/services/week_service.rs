use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::db::SettingsStore;
use crate::error::SyncError;
use crate::league::timing::WeekCalculator;
use crate::models::settings::{
    parse_bool_setting, WeekUpdateResult, CURRENT_SEASON_TYPE_KEY, CURRENT_WEEK_KEY, POOL_LOCKED_KEY,
    PRESEASON_START_KEY,
};
use crate::models::week::{SeasonWeek, WeekDescriptor};

/// Reads and persists the pool's "current week" and related global settings
#[derive(Clone)]
pub struct WeekService {
    settings: Arc<dyn SettingsStore>,
    default_preseason_start: String,
}

impl WeekService {
    pub fn new(settings: Arc<dyn SettingsStore>, default_preseason_start: impl Into<String>) -> Self {
        Self {
            settings,
            default_preseason_start: default_preseason_start.into(),
        }
    }

    /// Stored preseason start, or the configured default
    pub async fn preseason_start(&self) -> String {
        match self.settings.get_setting(PRESEASON_START_KEY).await {
            Ok(Some(value)) if !value.trim().is_empty() => value,
            Ok(_) => self.default_preseason_start.clone(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}, using configured default", PRESEASON_START_KEY, e);
                self.default_preseason_start.clone()
            }
        }
    }

    pub async fn calculate_week_at(&self, now: DateTime<Utc>) -> WeekDescriptor {
        let preseason_start = self.preseason_start().await;
        WeekCalculator::new().calculate(now, &preseason_start)
    }

    pub async fn calculate_current_week(&self) -> WeekDescriptor {
        self.calculate_week_at(Utc::now()).await
    }

    pub async fn preview(&self, date: &str) -> WeekDescriptor {
        let preseason_start = self.preseason_start().await;
        WeekCalculator::new().preview(date, &preseason_start)
    }

    /// Recompute the current week and persist it
    pub async fn update_current_week(&self) -> Result<WeekUpdateResult, SyncError> {
        self.update_current_week_at(Utc::now()).await
    }

    #[tracing::instrument(name = "Update current week", skip(self))]
    pub async fn update_current_week_at(&self, now: DateTime<Utc>) -> Result<WeekUpdateResult, SyncError> {
        let descriptor = self.calculate_week_at(now).await;
        if let Some(reason) = &descriptor.fallback_reason {
            tracing::warn!("Persisting fallback week: {}", reason);
        }

        let stored_week = self.settings.get_setting(CURRENT_WEEK_KEY).await?;
        let stored_season_type = self.settings.get_setting(CURRENT_SEASON_TYPE_KEY).await?;
        let week_value = descriptor.week.to_string();

        if stored_week.as_deref() == Some(week_value.as_str())
            && stored_season_type.as_deref() == Some(descriptor.season_type.as_str())
        {
            tracing::debug!("Current week already {} ({}), nothing to write", descriptor.week, descriptor.season_type);
            return Ok(WeekUpdateResult {
                descriptor,
                changed: false,
            });
        }

        self.settings
            .set_settings(&[
                (CURRENT_WEEK_KEY, week_value),
                (CURRENT_SEASON_TYPE_KEY, descriptor.season_type.clone()),
            ])
            .await?;

        tracing::info!(
            "📅 Current week set to {} ({}, {})",
            descriptor.week,
            descriptor.season_type,
            descriptor.label
        );

        Ok(WeekUpdateResult {
            descriptor,
            changed: true,
        })
    }

    /// Stored current week; computed (without writing) when nothing usable is stored
    pub async fn current_week(&self) -> WeekDescriptor {
        match self.settings.get_setting(CURRENT_SEASON_TYPE_KEY).await {
            Ok(Some(tag)) => {
                if let Some(week) = SeasonWeek::parse(&tag) {
                    return WeekDescriptor::from_season_week(week);
                }
                tracing::warn!("Stored {} '{}' is invalid, recomputing", CURRENT_SEASON_TYPE_KEY, tag);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not read {}: {}, recomputing", CURRENT_SEASON_TYPE_KEY, e),
        }

        self.calculate_current_week().await
    }

    pub async fn is_pool_locked(&self) -> Result<bool, SyncError> {
        let value = self.settings.get_setting(POOL_LOCKED_KEY).await?;
        Ok(value.as_deref().map(parse_bool_setting).unwrap_or(false))
    }

    pub async fn set_pool_locked(&self, locked: bool) -> Result<(), SyncError> {
        self.settings
            .set_setting(POOL_LOCKED_KEY, if locked { "true" } else { "false" })
            .await?;
        tracing::info!("🔒 Pool lock set to {}", locked);
        Ok(())
    }

    pub async fn set_preseason_start(&self, date: NaiveDate) -> Result<(), SyncError> {
        let value = date.format("%Y-%m-%d").to_string();
        self.settings.set_setting(PRESEASON_START_KEY, &value).await?;
        tracing::info!("Preseason start date set to {}", value);
        Ok(())
    }
}
