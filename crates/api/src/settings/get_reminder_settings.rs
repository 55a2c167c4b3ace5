use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use tally_reminders_api_structs::get_reminder_settings::*;
use tally_reminders_domain::{ReminderSettings, ID};
use tally_reminders_infra::TallyContext;

pub async fn get_reminder_settings_controller(
    ctx: web::Data<TallyContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path_params.user_id.clone();
    let usecase = GetReminderSettingsUseCase {
        user_id: user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(user_id, &settings)))
        .map_err(|e| match e {
            UseCaseError::NotFound(user_id) => ApiError::NotFound(format!(
                "No reminder settings were found for user: {}",
                user_id
            )),
        })
}

#[derive(Debug)]
pub struct GetReminderSettingsUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderSettingsUseCase {
    type Response = ReminderSettings;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetReminderSettings";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .recipients
            .find(&self.user_id)
            .await
            .map(|recipient| recipient.settings)
            .ok_or_else(|| UseCaseError::NotFound(self.user_id.clone()))
    }
}
