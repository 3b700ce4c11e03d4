use actix_web::{web, HttpResponse, Result};
use tracing::{info, warn};

use crate::handlers::sync_error_response;
use crate::models::common::ApiResponse;
use crate::models::sync::{SyncSummary, SyncWeekRequest};
use crate::models::week::SeasonWeek;
use crate::state::AppState;

/// POST /admin/sync/current - Synchronize the current and next week
pub async fn sync_current_and_next(state: web::Data<AppState>) -> Result<HttpResponse> {
    info!("Admin triggered current + next week synchronization");
    let summary = state.sync_service.sync_current_and_next().await;
    Ok(summary_response(summary))
}

/// POST /admin/sync/week - Synchronize one week given as phase tag or unified number
pub async fn sync_week(
    state: web::Data<AppState>,
    body: web::Json<SyncWeekRequest>,
) -> Result<HttpResponse> {
    let Some(week) = body.season_week() else {
        warn!("Rejected sync request with invalid week: {:?}", body);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<SyncSummary>::error(
            "Provide a valid season_type (e.g. \"regular-5\") or a week between 1 and 25",
        )));
    };

    info!("Admin triggered synchronization of {}", week);
    let summary = state.sync_service.sync_weeks(&[week]).await;
    Ok(summary_response(summary))
}

/// DELETE /admin/matchups/{season_type} - Remove every matchup of one week
pub async fn reset_week(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let season_type = path.into_inner();
    let Some(week) = SeasonWeek::parse(&season_type) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<u64>::error(format!(
            "'{}' is not a valid season type",
            season_type
        ))));
    };

    match state.sync_service.reset_week(week).await {
        Ok(deleted) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Deleted {} matchup(s) for {}", deleted, week.label()),
            deleted,
        ))),
        Err(e) => Ok(sync_error_response("Failed to reset week", &e)),
    }
}

/// Full or partial success is 200; 502 only when no week could be fetched
fn summary_response(summary: SyncSummary) -> HttpResponse {
    let message = summary.message.clone();
    if !summary.all_fetches_failed() {
        return HttpResponse::Ok().json(ApiResponse::success(message, summary));
    }

    let error = summary
        .weeks
        .iter()
        .flat_map(|week| week.errors.iter())
        .next()
        .cloned()
        .unwrap_or_else(|| message.clone());
    HttpResponse::BadGateway().json(ApiResponse::failure_with_data(message, error, summary))
}
