mod delete_subscription;
mod register_subscription;

use crate::error::method_not_allowed;
use actix_web::web;
use delete_subscription::delete_subscription_controller;
use register_subscription::register_subscription_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/subscription")
            .route(web::post().to(register_subscription_controller))
            .default_service(web::to(method_not_allowed)),
    );
    cfg.service(
        web::resource("/subscription/{user_id}")
            .route(web::delete().to(delete_subscription_controller))
            .default_service(web::to(method_not_allowed)),
    );
}
