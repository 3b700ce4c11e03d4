use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use tracing::info;

use crate::handlers::sync_error_response;
use crate::models::common::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WeekPreviewQuery {
    pub date: Option<String>,
}

/// POST /admin/week/update - Recompute the current week and persist it
pub async fn update_current_week(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.week_service.update_current_week().await {
        Ok(result) => {
            let message = if result.changed {
                format!("Current week updated to {}", result.descriptor.label)
            } else {
                format!("Current week unchanged ({})", result.descriptor.label)
            };
            info!("{}", message);
            Ok(HttpResponse::Ok().json(ApiResponse::success(message, result)))
        }
        Err(e) => Ok(sync_error_response("Failed to update current week", &e)),
    }
}

/// GET /admin/week/preview?date=YYYY-MM-DD - What the calculator returns for a date
pub async fn preview_week(
    state: web::Data<AppState>,
    query: web::Query<WeekPreviewQuery>,
) -> Result<HttpResponse> {
    let descriptor = match &query.date {
        Some(date) => state.week_service.preview(date).await,
        None => state.week_service.calculate_current_week().await,
    };

    let message = match &descriptor.fallback_reason {
        Some(reason) => format!("Fell back to {}: {}", descriptor.label, reason),
        None => descriptor.label.clone(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(message, descriptor)))
}
