use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PoolSettings {
    /// Preseason start used when no `preseason_start_date` setting is stored
    pub default_preseason_start: String,
    #[serde(default = "default_scheduler_enabled")]
    pub scheduler_enabled: bool,
    pub week_update_cron: String,
    pub sync_cron: String,
}

fn default_scheduler_enabled() -> bool {
    true
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            default_preseason_start: "2025-08-07".to_string(),
            scheduler_enabled: false,
            week_update_cron: "0 5 * * * *".to_string(),
            sync_cron: "0 0 */4 * * *".to_string(),
        }
    }
}
