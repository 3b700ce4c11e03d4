use actix_web::{web, HttpResponse, Result};
use tracing::error;

use crate::handlers::sync_error_response;
use crate::models::common::ApiResponse;
use crate::models::settings::PoolStatus;
use crate::state::AppState;

/// Stored current week (computed when the updater has not run yet)
pub async fn get_current_week(state: web::Data<AppState>) -> Result<HttpResponse> {
    let descriptor = state.week_service.current_week().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(descriptor.label.clone(), descriptor)))
}

/// Pool lock flag together with the current week
pub async fn get_pool_status(state: web::Data<AppState>) -> Result<HttpResponse> {
    let locked = match state.week_service.is_pool_locked().await {
        Ok(locked) => locked,
        Err(e) => {
            error!("Failed to read pool lock: {}", e);
            return Ok(sync_error_response("Failed to read pool status", &e));
        }
    };

    let status = PoolStatus {
        locked,
        current_week: state.week_service.current_week().await,
    };
    let message = if locked { "Pool is locked" } else { "Pool is open" };
    Ok(HttpResponse::Ok().json(ApiResponse::success(message, status)))
}
