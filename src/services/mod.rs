pub mod matchup_sync_service;
pub mod scheduler;
pub mod week_service;

pub use matchup_sync_service::{GameOutcome, MatchupSyncService};
pub use scheduler::SchedulerService;
pub use week_service::WeekService;
