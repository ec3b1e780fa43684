use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service;
use crate::utils::error::AppError;

pub use crate::services::token_service::Claims;

/// First guard of the authorization chain: requires a valid bearer token.
/// Missing header, bad signature or an expired token all answer 401 and
/// halt; on success the decoded `Claims` are attached to the request
/// extensions for downstream guards and handlers (`web::ReqData<Claims>`).
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::to_owned);

        let Some(token) = token else {
            return Box::pin(async move { Err(AppError::Unauthorized.into()) });
        };

        match token_service::verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => {
                log::debug!("token rejected: {:?}", e);
                Box::pin(async move { Err(AppError::Unauthorized.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(claims: web::ReqData<Claims>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "email": claims.email }))
    }

    macro_rules! test_app {
        () => {
            test::init_service(App::new().service(
                web::resource("/probe").wrap(AuthMiddleware).route(web::get().to(whoami)),
            ))
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_header_is_401() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/probe").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_401() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/probe")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_foreign_secret_is_401() {
        let app = test_app!();
        let token =
            token_service::issue_with_secret("mallory@example.com", "some-other-secret").unwrap();
        let req = test::TestRequest::get()
            .uri("/probe")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_token_passes_claims_through() {
        std::env::set_var("ACCESS_SECRET_TOKEN", "middleware-test-secret");
        let app = test_app!();
        let token = token_service::issue("alice@example.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/probe")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["email"], "alice@example.com");
    }
}
