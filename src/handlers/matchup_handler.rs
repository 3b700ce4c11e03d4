use actix_web::{web, HttpResponse, Result};
use tracing::error;

use crate::handlers::sync_error_response;
use crate::models::common::ApiResponse;
use crate::models::matchup::Matchup;
use crate::models::week::SeasonWeek;
use crate::state::AppState;

/// All matchups of one week, ordered by kickoff
pub async fn get_week_matchups(state: web::Data<AppState>, season_type: String) -> Result<HttpResponse> {
    let Some(week) = SeasonWeek::parse(&season_type) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<Vec<Matchup>>::error(format!(
            "'{}' is not a valid season type",
            season_type
        ))));
    };

    match state.sync_service.list_week(week).await {
        Ok(matchups) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("{} matchup(s) for {}", matchups.len(), week.label()),
            matchups,
        ))),
        Err(e) => {
            error!("Failed to list matchups for {}: {}", week, e);
            Ok(sync_error_response("Failed to load matchups", &e))
        }
    }
}
