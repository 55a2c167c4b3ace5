use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use tally_reminders_api_structs::register_subscription::*;
use tally_reminders_domain::{Subscription, ID};
use tally_reminders_infra::TallyContext;

pub async fn register_subscription_controller(
    ctx: web::Data<TallyContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = RegisterSubscriptionUseCase {
        user_id: body.user_id,
        subscription: body.subscription.into_domain(),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse::ok()))
        .map_err(|e| match e {
            UseCaseError::InvalidSubscription => ApiError::BadClientData(
                "The subscription needs an http(s) endpoint and both p256dh and auth keys".into(),
            ),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

#[derive(Debug)]
pub struct RegisterSubscriptionUseCase {
    pub user_id: ID,
    pub subscription: Subscription,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidSubscription,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterSubscriptionUseCase {
    type Response = ();

    type Errors = UseCaseError;

    const NAME: &'static str = "RegisterSubscription";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Errors> {
        if !self.subscription.is_valid() {
            return Err(UseCaseError::InvalidSubscription);
        }

        ctx.repos
            .recipients
            .save_subscription(&self.user_id, &self.subscription)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tally_reminders_domain::SubscriptionKeys;

    fn subscription(endpoint: &str) -> Subscription {
        Subscription {
            endpoint: endpoint.into(),
            keys: SubscriptionKeys {
                p256dh: "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM".into(),
                auth: "tBHItJI5svbpez7KI4CCXg".into(),
            },
        }
    }

    #[actix_web::test]
    async fn registers_subscription_for_new_user() {
        let ctx = TallyContext::create_inmemory();
        let user_id: ID = "user1".parse().unwrap();

        let mut usecase = RegisterSubscriptionUseCase {
            user_id: user_id.clone(),
            subscription: subscription("https://fcm.googleapis.com/fcm/send/abc"),
        };
        assert!(usecase.execute(&ctx).await.is_ok());

        let recipient = ctx.repos.recipients.find(&user_id).await.unwrap();
        assert_eq!(
            recipient.subscription.unwrap().endpoint,
            "https://fcm.googleapis.com/fcm/send/abc"
        );
        // Registering alone does not opt the user in
        assert!(!recipient.settings.enabled);
    }

    #[actix_web::test]
    async fn rejects_incomplete_subscription() {
        let ctx = TallyContext::create_inmemory();
        let user_id: ID = "user1".parse().unwrap();

        for endpoint in &["", "not a url", "ftp://push.example.com/1"] {
            let mut usecase = RegisterSubscriptionUseCase {
                user_id: user_id.clone(),
                subscription: subscription(endpoint),
            };
            assert_eq!(
                usecase.execute(&ctx).await.unwrap_err(),
                UseCaseError::InvalidSubscription
            );
        }

        let mut missing_keys = subscription("https://push.example.com/1");
        missing_keys.keys.auth = String::new();
        let mut usecase = RegisterSubscriptionUseCase {
            user_id: user_id.clone(),
            subscription: missing_keys,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidSubscription
        );
        assert!(ctx.repos.recipients.find(&user_id).await.is_none());
    }
}
