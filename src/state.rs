use std::sync::Arc;

use crate::db::{MatchupStore, SettingsStore};
use crate::providers::ScheduleProvider;
use crate::services::{MatchupSyncService, WeekService};

/// Everything a request handler or scheduled job needs, passed explicitly
#[derive(Clone)]
pub struct AppState {
    pub week_service: WeekService,
    pub sync_service: MatchupSyncService,
}

impl AppState {
    pub fn new(
        matchups: Arc<dyn MatchupStore>,
        settings: Arc<dyn SettingsStore>,
        provider: Arc<dyn ScheduleProvider>,
        default_preseason_start: &str,
    ) -> Self {
        let week_service = WeekService::new(settings, default_preseason_start);
        let sync_service = MatchupSyncService::new(provider, matchups, week_service.clone());

        Self {
            week_service,
            sync_service,
        }
    }
}
