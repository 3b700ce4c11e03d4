use actix_web::web;
use secrecy::SecretString;
use std::sync::Arc;

use crate::handlers::admin::{settings_handler, sync_handler, week_handler};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig, admin_token: Arc<SecretString>) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware::new(admin_token))
            // Synchronization triggers
            .service(
                web::resource("/sync/current")
                    .route(web::post().to(sync_handler::sync_current_and_next))
            )
            .service(
                web::resource("/sync/week")
                    .route(web::post().to(sync_handler::sync_week))
            )
            .service(
                web::resource("/matchups/{season_type}")
                    .route(web::delete().to(sync_handler::reset_week))
            )

            // Current week
            .service(
                web::resource("/week/update")
                    .route(web::post().to(week_handler::update_current_week))
            )
            .service(
                web::resource("/week/preview")
                    .route(web::get().to(week_handler::preview_week))
            )

            // Pool settings
            .service(
                web::resource("/settings/pool-lock")
                    .route(web::put().to(settings_handler::set_pool_lock))
            )
            .service(
                web::resource("/settings/preseason-start")
                    .route(web::put().to(settings_handler::set_preseason_start))
            )
    );
}
