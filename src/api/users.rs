use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::models::{SetRoleRequest, User};
use crate::services::user_service::{self, CreateUserOutcome, ROLE_ADMIN, ROLE_MODERATOR};
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub struct RoleFilter {
    pub role: Option<String>,
}

/// POST /users - records a user on first sign-in. Insert-if-absent: an
/// existing email reports `insertedId: null` and changes nothing.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = User,
    responses(
        (status = 200, description = "Insert acknowledgement, or insertedId null when the email already exists")
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    match user_service::create_if_absent(&db, &body).await? {
        CreateUserOutcome::Inserted(id) => Ok(HttpResponse::Ok().json(super::inserted_id_ack(&id))),
        CreateUserOutcome::AlreadyExists => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "user already exist",
            "insertedId": null,
        }))),
    }
}

/// GET /users - admin-only listing, optionally filtered by role.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users, optionally filtered by ?role="),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn get_users(
    db: web::Data<MongoDB>,
    query: web::Query<RoleFilter>,
) -> Result<HttpResponse, AppError> {
    let users = user_service::list(&db, query.role.as_deref()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/:email - a single user document, or null.
pub async fn get_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let user = user_service::find_by_email(&db, &email).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/admin/:id - admin assigns a role.
#[utoipa::path(
    put,
    path = "/users/admin/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Update acknowledgement"),
        (status = 400, description = "userRole missing from body"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn set_user_role(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<SetRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let role = body
        .user_role
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("userRole is required".to_string()))?;

    let result = user_service::set_role(&db, &id, role).await?;
    Ok(HttpResponse::Ok().json(super::update_ack(&result)))
}

/// DELETE /users/:id - admin removes an account.
pub async fn delete_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = user_service::delete(&db, &id).await?;
    Ok(HttpResponse::Ok().json(super::delete_ack(&result)))
}

/// GET /users/admin/:email - lets a signed-in user ask about their OWN
/// admin status; asking about anyone else's is a 401.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "{ admin: bool }"),
        (status = 401, description = "Path email differs from token email")
    )
)]
pub async fn check_admin(
    db: web::Data<MongoDB>,
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    if email != claims.email {
        return Err(AppError::Unauthorized);
    }

    let role = user_service::find_role(&db, &email).await?;
    let admin = role.as_deref() == Some(ROLE_ADMIN);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "admin": admin })))
}

/// GET /users/moderator/:email - same self-check for the moderator role.
pub async fn check_moderator(
    db: web::Data<MongoDB>,
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    if email != claims.email {
        return Err(AppError::Unauthorized);
    }

    let role = user_service::find_role(&db, &email).await?;
    let moderator = role.as_deref() == Some(ROLE_MODERATOR);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "moderator": moderator })))
}
