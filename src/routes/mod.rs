use actix_web::web;

pub mod admin;
pub mod backend_health;
pub mod matchups;
pub mod week;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(week::get_current_week)
        .service(week::get_pool_status)
        .service(matchups::get_week_matchups);
}
