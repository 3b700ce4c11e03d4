use loserpool_backend::config::pool::PoolSettings;
use loserpool_backend::services::SchedulerService;

mod common;
use common::utils::build_services;

#[tokio::test]
async fn pool_jobs_are_registered_once() {
    let services = build_services();
    let scheduler = SchedulerService::new(services.week_service.clone(), services.sync_service.clone())
        .await
        .expect("Failed to create scheduler");

    let pool = PoolSettings::default();
    scheduler.schedule_pool_jobs(&pool).await.unwrap();
    // Registering again replaces rather than duplicates
    scheduler.schedule_pool_jobs(&pool).await.unwrap();

    assert_eq!(scheduler.scheduled_jobs().await, vec!["matchup-sync", "week-update"]);

    scheduler.unschedule("matchup-sync").await.unwrap();
    assert_eq!(scheduler.scheduled_jobs().await, vec!["week-update"]);
}

#[tokio::test]
async fn invalid_cron_expression_is_rejected() {
    let services = build_services();
    let scheduler = SchedulerService::new(services.week_service.clone(), services.sync_service.clone())
        .await
        .expect("Failed to create scheduler");

    assert!(scheduler.schedule_week_update("every tuesday").await.is_err());
    assert!(scheduler.scheduled_jobs().await.is_empty());
}

#[tokio::test]
async fn scheduler_starts_and_stops() {
    let services = build_services();
    let scheduler = SchedulerService::new(services.week_service.clone(), services.sync_service.clone())
        .await
        .expect("Failed to create scheduler");

    scheduler.schedule_pool_jobs(&PoolSettings::default()).await.unwrap();
    scheduler.start().await.unwrap();
    scheduler.stop().await.unwrap();
}
