use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use tally_reminders_api_structs::update_reminder_settings::*;
use tally_reminders_domain::{
    Frequency, InvalidSettingsError, ReminderSettings, ReminderTime, ID,
};
use tally_reminders_infra::TallyContext;

pub async fn update_reminder_settings_controller(
    ctx: web::Data<TallyContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path_params.user_id.clone();
    let body = body.0;
    let usecase = UpdateReminderSettingsUseCase {
        user_id: user_id.clone(),
        enabled: body.enabled,
        time: body.time,
        frequency: body.frequency,
        custom_days: body.custom_days,
        reminder_text: body.reminder_text,
        timezone: body.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(user_id, &settings)))
        .map_err(|e| match e {
            UseCaseError::InvalidSettings(e) => ApiError::BadClientData(e.to_string()),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

#[derive(Debug)]
pub struct UpdateReminderSettingsUseCase {
    pub user_id: ID,
    pub enabled: bool,
    pub time: String,
    pub frequency: String,
    pub custom_days: Option<Vec<u8>>,
    pub reminder_text: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidSettings(InvalidSettingsError),
    StorageError,
}

impl UpdateReminderSettingsUseCase {
    fn settings(&self) -> Result<ReminderSettings, InvalidSettingsError> {
        let time = self.time.parse::<ReminderTime>()?;
        let reminder_text = self
            .reminder_text
            .as_ref()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let settings = ReminderSettings {
            enabled: self.enabled,
            time: Some(time),
            frequency: Frequency::from_tag(&self.frequency, self.custom_days.clone()),
            reminder_text,
            timezone: self.timezone.clone().unwrap_or_else(|| "UTC".into()),
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderSettingsUseCase {
    type Response = ReminderSettings;

    type Errors = UseCaseError;

    const NAME: &'static str = "UpdateReminderSettings";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Errors> {
        let settings = self.settings().map_err(UseCaseError::InvalidSettings)?;

        ctx.repos
            .recipients
            .save_settings(&self.user_id, &settings)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(settings)
    }
}
