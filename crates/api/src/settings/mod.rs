mod get_reminder_settings;
mod update_reminder_settings;

use crate::error::method_not_allowed;
use actix_web::web;
use get_reminder_settings::get_reminder_settings_controller;
use update_reminder_settings::update_reminder_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/{user_id}/reminder-settings")
            .route(web::get().to(get_reminder_settings_controller))
            .route(web::put().to(update_reminder_settings_controller))
            .default_service(web::to(method_not_allowed)),
    );
}
