use std::sync::Arc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use uuid::Uuid;

use crate::config::pool::PoolSettings;
use crate::services::matchup_sync_service::MatchupSyncService;
use crate::services::week_service::WeekService;

const WEEK_UPDATE_JOB: &str = "week-update";
const MATCHUP_SYNC_JOB: &str = "matchup-sync";

/// Cron triggers for the week updater and the current+next synchronization
pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    week_service: WeekService,
    sync_service: MatchupSyncService,
    // Track scheduled jobs by name -> job_id
    active_jobs: Arc<Mutex<HashMap<&'static str, Uuid>>>,
}

impl SchedulerService {
    pub async fn new(week_service: WeekService, sync_service: MatchupSyncService) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            week_service,
            sync_service,
            active_jobs: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        let scheduler = self.scheduler.lock().await;
        scheduler.start().await?;

        tracing::info!("✅ Scheduler service started successfully");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), JobSchedulerError> {
        let mut scheduler = self.scheduler.lock().await;
        scheduler.shutdown().await?;

        tracing::info!("🛑 Scheduler service stopped");
        Ok(())
    }

    /// Register both pool jobs from configuration
    pub async fn schedule_pool_jobs(&self, pool: &PoolSettings) -> Result<(), JobSchedulerError> {
        self.schedule_week_update(&pool.week_update_cron).await?;
        self.schedule_matchup_sync(&pool.sync_cron).await?;
        Ok(())
    }

    /// Recompute and persist the current week on `cron_expr`
    pub async fn schedule_week_update(&self, cron_expr: &str) -> Result<(), JobSchedulerError> {
        let week_service = self.week_service.clone();

        let job = Job::new_async(cron_expr, move |_uuid, _l| {
            let week_service = week_service.clone();

            Box::pin(async move {
                tracing::info!("📅 Running scheduled current-week update");
                match week_service.update_current_week().await {
                    Ok(result) => {
                        tracing::info!(
                            "✅ Current week is {} ({}), changed: {}",
                            result.descriptor.week, result.descriptor.season_type, result.changed
                        );
                    }
                    Err(e) => {
                        tracing::error!("❌ Scheduled current-week update failed: {}", e);
                    }
                }
            })
        })?;

        self.register(WEEK_UPDATE_JOB, job, cron_expr).await
    }

    /// Synchronize the current and next week on `cron_expr`
    pub async fn schedule_matchup_sync(&self, cron_expr: &str) -> Result<(), JobSchedulerError> {
        let sync_service = self.sync_service.clone();

        let job = Job::new_async(cron_expr, move |_uuid, _l| {
            let sync_service = sync_service.clone();

            Box::pin(async move {
                tracing::info!("🏈 Running scheduled matchup synchronization");
                let summary = sync_service.sync_current_and_next().await;
                if summary.success {
                    tracing::info!("✅ Scheduled sync: {}", summary.message);
                } else {
                    tracing::error!("❌ Scheduled sync: {}", summary.message);
                }
            })
        })?;

        self.register(MATCHUP_SYNC_JOB, job, cron_expr).await
    }

    /// Remove a previously scheduled job by name
    pub async fn unschedule(&self, name: &str) -> Result<(), JobSchedulerError> {
        let mut active_jobs = self.active_jobs.lock().await;

        if let Some(job_id) = active_jobs.remove(name) {
            let scheduler = self.scheduler.lock().await;
            scheduler.remove(&job_id).await?;
            tracing::info!("✅ Removed scheduled job '{}'", name);
        }

        Ok(())
    }

    pub async fn scheduled_jobs(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.active_jobs.lock().await.keys().copied().collect();
        names.sort_unstable();
        names
    }

    async fn register(&self, name: &'static str, job: Job, cron_expr: &str) -> Result<(), JobSchedulerError> {
        // Replace an existing job with the same name
        self.unschedule(name).await?;

        let job_id = job.guid();
        let scheduler = self.scheduler.lock().await;
        scheduler.add(job).await?;
        drop(scheduler);

        self.active_jobs.lock().await.insert(name, job_id);
        tracing::info!("✅ Scheduled '{}' ({})", name, cron_expr);
        Ok(())
    }
}
