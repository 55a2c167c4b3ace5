use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use tally_reminders_api_structs::schedule_snooze::*;
use tally_reminders_domain::{
    InvalidSnoozeError, ScheduledSnooze, SnoozeRequest, DEFAULT_REMINDER_TEXT, ID,
};
use tally_reminders_infra::TallyContext;

pub async fn schedule_snooze_controller(
    ctx: web::Data<TallyContext>,
    path_params: web::Path<PathParams>,
    body: Option<web::Json<RequestBody>>,
) -> Result<HttpResponse, ApiError> {
    let body = body.map(|b| b.0).unwrap_or_default();
    let usecase = ScheduleSnoozeUseCase {
        user_id: path_params.user_id.clone(),
        snooze_minutes: body.snooze_minutes,
        message: body.message,
    };

    execute(usecase, &ctx)
        .await
        .map(|snooze| HttpResponse::Ok().json(APIResponse::new(&snooze)))
        .map_err(|e| match e {
            UseCaseError::NotSubscribed(user_id) => ApiError::NotFound(format!(
                "User: {} has no push subscription to deliver the snooze to",
                user_id
            )),
            UseCaseError::InvalidSnooze(e) => ApiError::BadClientData(e.to_string()),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

/// Persists a snooze on the server so it fires even when the device that
/// asked for it has gone away. The dispatch tick delivers it once due.
#[derive(Debug)]
pub struct ScheduleSnoozeUseCase {
    pub user_id: ID,
    pub snooze_minutes: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotSubscribed(ID),
    InvalidSnooze(InvalidSnoozeError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleSnoozeUseCase {
    type Response = ScheduledSnooze;

    type Errors = UseCaseError;

    const NAME: &'static str = "ScheduleSnooze";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.recipients.find(&self.user_id).await {
            Some(recipient) if recipient.subscription.is_some() => (),
            _ => return Err(UseCaseError::NotSubscribed(self.user_id.clone())),
        }

        let message = self.message.as_deref().unwrap_or(DEFAULT_REMINDER_TEXT);
        let request = SnoozeRequest::new(
            self.user_id.as_str(),
            message,
            ctx.sys.now(),
            self.snooze_minutes,
        )
        .map_err(UseCaseError::InvalidSnooze)?;
        let snooze = ScheduledSnooze::new(
            self.user_id.clone(),
            request.fire_at.timestamp_millis(),
            request.message,
        );

        ctx.repos
            .scheduled_snoozes
            .insert(&snooze)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(snooze)
    }
}
