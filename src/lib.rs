use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use secrecy::SecretString;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
pub mod telemetry;
pub mod error;
pub mod models;
pub mod league;
pub mod providers;
pub mod db;
pub mod services;
pub mod state;
mod routes;
mod handlers;
mod middleware;

use crate::routes::admin::init_admin_routes;
use crate::routes::init_routes;
use crate::state::AppState;

pub fn run(
    listener: TcpListener,
    state: AppState,
    admin_token: SecretString,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let state = web::Data::new(state);
    let admin_token = Arc::new(admin_token);

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        let admin_token = admin_token.clone();
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(state.clone())
            .configure(init_routes)
            .configure(move |cfg| init_admin_routes(cfg, admin_token))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
