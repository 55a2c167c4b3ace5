use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use tally_reminders_api_structs::delete_subscription::*;
use tally_reminders_domain::{Subscription, ID};
use tally_reminders_infra::TallyContext;

pub async fn delete_subscription_controller(
    ctx: web::Data<TallyContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, ApiError> {
    let usecase = DeleteSubscriptionUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse::ok()))
        .map_err(|e| match e {
            UseCaseError::NotFound(user_id) => ApiError::NotFound(format!(
                "No subscription was found for user: {}",
                user_id
            )),
        })
}

#[derive(Debug)]
pub struct DeleteSubscriptionUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSubscriptionUseCase {
    type Response = Subscription;

    type Errors = UseCaseError;

    const NAME: &'static str = "DeleteSubscription";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .recipients
            .remove_subscription(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.user_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tally_reminders_domain::SubscriptionKeys;

    #[actix_web::test]
    async fn removes_existing_subscription_once() {
        let ctx = TallyContext::create_inmemory();
        let user_id: ID = "user1".parse().unwrap();
        let subscription = Subscription {
            endpoint: "https://push.example.com/1".into(),
            keys: SubscriptionKeys {
                p256dh: "p256dh".into(),
                auth: "auth".into(),
            },
        };
        ctx.repos
            .recipients
            .save_subscription(&user_id, &subscription)
            .await
            .unwrap();

        let mut usecase = DeleteSubscriptionUseCase {
            user_id: user_id.clone(),
        };
        assert_eq!(usecase.execute(&ctx).await, Ok(subscription));
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(user_id))
        );
    }
}
