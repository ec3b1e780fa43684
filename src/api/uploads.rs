use actix_web::HttpResponse;

use crate::services::imagekit_service::{self, UploadSignature};
use crate::utils::error::AppError;

/// GET /get-signature - short-lived ImageKit upload credentials so the
/// client can upload images directly; the bytes never pass through here.
#[utoipa::path(
    get,
    path = "/get-signature",
    tag = "Uploads",
    responses(
        (status = 200, description = "{ token, expire, signature }", body = UploadSignature)
    )
)]
pub async fn get_signature() -> Result<HttpResponse, AppError> {
    let params = imagekit_service::auth_params()?;
    Ok(HttpResponse::Ok().json(params))
}
