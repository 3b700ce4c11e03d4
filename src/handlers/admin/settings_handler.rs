use actix_web::{web, HttpResponse, Result};

use crate::handlers::sync_error_response;
use crate::league::timing::parse_preseason_start;
use crate::models::common::ApiResponse;
use crate::models::settings::{PoolLockRequest, PreseasonStartRequest};
use crate::state::AppState;

/// PUT /admin/settings/pool-lock - Manually lock or unlock picks
pub async fn set_pool_lock(
    state: web::Data<AppState>,
    body: web::Json<PoolLockRequest>,
) -> Result<HttpResponse> {
    match state.week_service.set_pool_locked(body.locked).await {
        Ok(()) => {
            let message = if body.locked { "Pool locked" } else { "Pool unlocked" };
            Ok(HttpResponse::Ok().json(ApiResponse::success(message, body.locked)))
        }
        Err(e) => Ok(sync_error_response("Failed to update pool lock", &e)),
    }
}

/// PUT /admin/settings/preseason-start - Override the configured preseason start date
pub async fn set_preseason_start(
    state: web::Data<AppState>,
    body: web::Json<PreseasonStartRequest>,
) -> Result<HttpResponse> {
    let Some(date) = parse_preseason_start(&body.date) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<String>::error(format!(
            "'{}' is not a valid date, expected YYYY-MM-DD",
            body.date
        ))));
    };

    match state.week_service.set_preseason_start(date).await {
        Ok(()) => {
            let value = date.format("%Y-%m-%d").to_string();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                format!("Preseason start set to {}", value),
                value,
            )))
        }
        Err(e) => Ok(sync_error_response("Failed to update preseason start", &e)),
    }
}
