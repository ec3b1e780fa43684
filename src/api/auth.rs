use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::services::token_service;
use crate::utils::error::AppError;

/// Body of `POST /jwt`. The front-end sends the signed-in user's profile;
/// only the email goes into the claims.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /jwt - issues a 4-hour session token for the given identity.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed session token")
    )
)]
pub async fn issue_token(body: web::Json<TokenRequest>) -> Result<HttpResponse, AppError> {
    let token = token_service::issue(&body.email).map_err(AppError::Upstream)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token })))
}
