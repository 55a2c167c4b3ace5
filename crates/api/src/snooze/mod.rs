mod schedule_snooze;

use crate::error::method_not_allowed;
use actix_web::web;
use schedule_snooze::schedule_snooze_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/{user_id}/snooze")
            .route(web::post().to(schedule_snooze_controller))
            .default_service(web::to(method_not_allowed)),
    );
}
