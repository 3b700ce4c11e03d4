use serde::{Deserialize, Serialize};

use crate::models::week::WeekDescriptor;

pub const CURRENT_WEEK_KEY: &str = "current_week";
pub const CURRENT_SEASON_TYPE_KEY: &str = "current_season_type";
pub const POOL_LOCKED_KEY: &str = "pool_locked";
pub const PRESEASON_START_KEY: &str = "preseason_start_date";

/// Result of the current-week updater
#[derive(Debug, Clone, Serialize)]
pub struct WeekUpdateResult {
    pub descriptor: WeekDescriptor,
    /// False when the stored values already matched and nothing was written
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolStatus {
    pub locked: bool,
    pub current_week: WeekDescriptor,
}

#[derive(Debug, Deserialize)]
pub struct PoolLockRequest {
    pub locked: bool,
}

#[derive(Debug, Deserialize)]
pub struct PreseasonStartRequest {
    pub date: String,
}

pub fn parse_bool_setting(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
