use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{AppliedScholarship, ModerateApplicationRequest, UpdateApplicationRequest};
use crate::services::application_service::{self, ApplyOutcome};
use crate::utils::error::AppError;

/// POST /appliedScholarship - submits an application. A second application
/// for the same (userEmail, scholarshipId) pair is a 403 conflict.
#[utoipa::path(
    post,
    path = "/appliedScholarship",
    tag = "Applications",
    request_body = AppliedScholarship,
    responses(
        (status = 200, description = "Insert acknowledgement"),
        (status = 403, description = "Applicant already applied for this schoalrship")
    )
)]
pub async fn apply(
    db: web::Data<MongoDB>,
    body: web::Json<AppliedScholarship>,
) -> Result<HttpResponse, AppError> {
    match application_service::apply(&db, &body).await? {
        ApplyOutcome::Inserted(id) => Ok(HttpResponse::Ok().json(super::inserted_id_ack(&id))),
        ApplyOutcome::AlreadyApplied => Err(application_service::conflict_error()),
    }
}

/// GET /appliedScholarship - moderation listing of every application.
pub async fn get_applications(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let applications = application_service::list(&db).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// GET /appliedScholarship/:email - one user's applications.
pub async fn applications_for_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let applications = application_service::list_for_user(&db, &email).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// GET /appliedapplication/:id - an application looked up by its
/// scholarship reference (null body when absent).
pub async fn application_by_scholarship(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scholarship_id = path.into_inner();
    let application = application_service::find_by_scholarship(&db, &scholarship_id).await?;
    Ok(HttpResponse::Ok().json(application))
}

/// PATCH /appliedapplication/:id - applicant edits the profile fields on
/// their application.
pub async fn update_application(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateApplicationRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = application_service::update_profile(&db, &id, &body).await?;
    Ok(HttpResponse::Ok().json(super::update_ack(&result)))
}

/// PATCH /appliedScholarship/:id - moderator sets status and/or feedback.
#[utoipa::path(
    patch,
    path = "/appliedScholarship/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    request_body = ModerateApplicationRequest,
    responses(
        (status = 200, description = "Update acknowledgement"),
        (status = 400, description = "Neither applicationStatus nor feedback present"),
        (status = 403, description = "Caller is not moderator or admin")
    )
)]
pub async fn moderate_application(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<ModerateApplicationRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = application_service::moderate(&db, &id, &body).await?;
    Ok(HttpResponse::Ok().json(super::update_ack(&result)))
}

/// DELETE /appliedScholarship/:id - applicant cancels an application.
pub async fn delete_application(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = application_service::delete(&db, &id).await?;
    Ok(HttpResponse::Ok().json(super::delete_ack(&result)))
}
