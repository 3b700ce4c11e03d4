use actix_web::{get, web, HttpResponse, Result};

use crate::handlers::week_handler;
use crate::state::AppState;

/// Current pool week
#[get("/week/current")]
async fn get_current_week(state: web::Data<AppState>) -> Result<HttpResponse> {
    week_handler::get_current_week(state).await
}

/// Whether picks are locked
#[get("/pool/status")]
async fn get_pool_status(state: web::Data<AppState>) -> Result<HttpResponse> {
    week_handler::get_pool_status(state).await
}
