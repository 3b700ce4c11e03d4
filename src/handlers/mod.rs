use actix_web::HttpResponse;

use crate::db::StoreError;
use crate::error::SyncError;
use crate::models::common::ApiResponse;

pub mod admin;
pub mod backend_health_handler;
pub mod matchup_handler;
pub mod week_handler;

/// Translate a core error into the JSON error response admins see
pub fn sync_error_response(context: &str, error: &SyncError) -> HttpResponse {
    let body = ApiResponse::<()>::error_with_message(context, error.to_string());
    match error {
        SyncError::SourceFetch(_) => HttpResponse::BadGateway().json(body),
        SyncError::Mapping(_) => HttpResponse::UnprocessableEntity().json(body),
        SyncError::Persistence(StoreError::Unavailable(_)) => HttpResponse::ServiceUnavailable().json(body),
        SyncError::Persistence(_) | SyncError::Configuration(_) => HttpResponse::InternalServerError().json(body),
    }
}
