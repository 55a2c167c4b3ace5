mod fan_out;
pub mod run_tick;

use crate::error::method_not_allowed;
use actix_web::web;
use run_tick::run_tick_controller;

pub use run_tick::{RunTickUseCase, TickSummary};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/dispatch/tick")
            .route(web::post().to(run_tick_controller))
            .default_service(web::to(method_not_allowed)),
    );
}
