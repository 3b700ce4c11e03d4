use serde::{Deserialize, Serialize};

use crate::models::week::SeasonWeek;

/// Outcome of one synchronization run for a single week
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekSyncReport {
    pub season_type: String,
    pub week: u8,
    pub games_found: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub errors: Vec<String>,
}

impl WeekSyncReport {
    pub fn new(season_week: SeasonWeek) -> Self {
        Self {
            season_type: season_week.tag(),
            week: season_week.unified(),
            ..Default::default()
        }
    }

    /// A run whose source fetch failed: nothing processed, one error
    pub fn fetch_failed(season_week: SeasonWeek, error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::new(season_week)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncTotals {
    pub games_found: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub errors: usize,
}

/// Result of a multi-week synchronization, returned to admin callers
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub success: bool,
    pub message: String,
    pub weeks: Vec<WeekSyncReport>,
    pub totals: SyncTotals,
    /// Weeks whose schedule could not be fetched at all
    pub failed_weeks: usize,
}

impl SyncSummary {
    pub fn from_reports(weeks: Vec<WeekSyncReport>, failed_fetches: usize) -> Self {
        let totals = weeks.iter().fold(SyncTotals::default(), |mut acc, week| {
            acc.games_found += week.games_found;
            acc.created += week.created;
            acc.updated += week.updated;
            acc.unchanged += week.unchanged;
            acc.errors += week.errors.len();
            acc
        });

        let message = if failed_fetches > 0 {
            format!("Schedule source failed for {} of {} week(s)", failed_fetches, weeks.len())
        } else if totals.errors > 0 {
            format!(
                "Synchronized with {} error(s): {} created, {} updated",
                totals.errors, totals.created, totals.updated
            )
        } else {
            format!(
                "Synchronized {} game(s): {} created, {} updated",
                totals.games_found, totals.created, totals.updated
            )
        };

        Self {
            success: failed_fetches == 0,
            message,
            weeks,
            totals,
            failed_weeks: failed_fetches,
        }
    }
}

/// Body of `POST /admin/sync/week`
#[derive(Debug, Deserialize)]
pub struct SyncWeekRequest {
    /// Phase tag such as `preseason-2`
    pub season_type: Option<String>,
    /// Unified week number (1-25)
    pub week: Option<u8>,
}

impl SyncSummary {
    /// Nothing could be fetched for any requested week
    pub fn all_fetches_failed(&self) -> bool {
        !self.weeks.is_empty() && self.failed_weeks == self.weeks.len()
    }
}

impl SyncWeekRequest {
    pub fn season_week(&self) -> Option<SeasonWeek> {
        match (&self.season_type, self.week) {
            (Some(tag), _) => SeasonWeek::parse(tag),
            (None, Some(week)) => SeasonWeek::from_unified(week),
            (None, None) => None,
        }
    }
}
