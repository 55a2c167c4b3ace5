use crate::error::ApiError;
use actix_web::{http::header, HttpRequest};
use tally_reminders_infra::TallyContext;
use tally_reminders_utils::secrets_match;

/// Only the external scheduler holding the cron secret may trigger ticks
pub fn protect_cron_route(req: &HttpRequest, ctx: &TallyContext) -> Result<(), ApiError> {
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing bearer token in the `Authorization` header".into())
        })?;

    if secrets_match(&ctx.config.cron_secret, provided.trim()) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid cron secret".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn it_checks_the_bearer_secret() {
        let mut ctx = TallyContext::create_inmemory();
        ctx.config.cron_secret = "s3cret".into();

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer s3cret"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer wrong"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());

        let req = TestRequest::default().to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());
    }
}
