use actix_web::{get, web, HttpResponse, Result};

use crate::handlers::matchup_handler;
use crate::state::AppState;

/// Matchups of one week, addressed by phase tag (e.g. `regular-5`)
#[get("/matchups/{season_type}")]
async fn get_week_matchups(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    matchup_handler::get_week_matchups(state, path.into_inner()).await
}
