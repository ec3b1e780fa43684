use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::{Scholarship, UpdateScholarshipRequest};
use crate::services::scholarship_service;
use crate::utils::error::AppError;

/// Query string of `/allsholarship` and `/scholarship-count`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// GET /top-sholarship - 6 most recent listings, cheapest fee first on
/// ties. Public.
#[utoipa::path(
    get,
    path = "/top-sholarship",
    tag = "Scholarships",
    responses(
        (status = 200, description = "Up to 6 scholarships, newest post date first")
    )
)]
pub async fn top_scholarships(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let scholarships = scholarship_service::top(&db).await?;
    Ok(HttpResponse::Ok().json(scholarships))
}

/// GET /allsholarship - free-text search plus optional pagination. Public.
#[utoipa::path(
    get,
    path = "/allsholarship",
    tag = "Scholarships",
    responses(
        (status = 200, description = "Matching scholarships"),
        (status = 400, description = "Invalid page/size combination")
    )
)]
pub async fn all_scholarships(
    db: web::Data<MongoDB>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let scholarships =
        scholarship_service::list(&db, query.search.as_deref(), query.page, query.size).await?;
    Ok(HttpResponse::Ok().json(scholarships))
}

/// GET /scholarship-count - total match count for the same search filter,
/// used client-side to compute page numbers. Public.
#[utoipa::path(
    get,
    path = "/scholarship-count",
    tag = "Scholarships",
    responses(
        (status = 200, description = "{ count: n }")
    )
)]
pub async fn scholarship_count(
    db: web::Data<MongoDB>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let count = scholarship_service::count(&db, query.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "count": count })))
}

/// POST /scholarships - moderator/admin creates a listing.
#[utoipa::path(
    post,
    path = "/scholarships",
    tag = "Scholarships",
    security(("bearer_auth" = [])),
    request_body = Scholarship,
    responses(
        (status = 200, description = "Insert acknowledgement"),
        (status = 403, description = "Caller is not moderator or admin")
    )
)]
pub async fn create_scholarship(
    db: web::Data<MongoDB>,
    body: web::Json<Scholarship>,
) -> Result<HttpResponse, AppError> {
    let result = scholarship_service::create(&db, &body).await?;
    Ok(HttpResponse::Ok().json(super::insert_ack(&result)))
}

/// GET /scholarships/:id - one listing (null body when absent).
pub async fn get_scholarship(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let scholarship = scholarship_service::find_by_id(&db, &id).await?;
    Ok(HttpResponse::Ok().json(scholarship))
}

/// PATCH /scholarships/:id - moderator/admin partial update.
pub async fn update_scholarship(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateScholarshipRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = scholarship_service::update(&db, &id, &body).await?;
    Ok(HttpResponse::Ok().json(super::update_ack(&result)))
}

/// DELETE /scholarships/:id - moderator/admin removes a listing. Reviews
/// and applications referencing it are left in place (no cascade).
pub async fn delete_scholarship(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = scholarship_service::delete(&db, &id).await?;
    Ok(HttpResponse::Ok().json(super::delete_ack(&result)))
}
