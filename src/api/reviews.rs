use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{Review, UpdateReviewRequest};
use crate::services::review_service;
use crate::utils::error::AppError;

/// POST /reviews - any signed-in user posts a review.
pub async fn create_review(
    db: web::Data<MongoDB>,
    body: web::Json<Review>,
) -> Result<HttpResponse, AppError> {
    let result = review_service::create(&db, &body).await?;
    Ok(HttpResponse::Ok().json(super::insert_ack(&result)))
}

/// GET /reviews - moderation listing of every review.
pub async fn get_reviews(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let reviews = review_service::list(&db).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// GET /top-reviews - 9 highest-rated reviews for the landing page. Public.
#[utoipa::path(
    get,
    path = "/top-reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "Up to 9 reviews, best rating first")
    )
)]
pub async fn top_reviews(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let reviews = review_service::top(&db).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// GET /reviews/:id - reviews for one scholarship (the id is the
/// scholarship reference).
pub async fn reviews_for_scholarship(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scholarship_id = path.into_inner();
    let reviews = review_service::list_for_scholarship(&db, &scholarship_id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// PATCH /reviews/:id - author edits their review.
pub async fn update_review(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = review_service::update(&db, &id, &body).await?;
    Ok(HttpResponse::Ok().json(super::update_ack(&result)))
}

/// DELETE /reviews/:id
pub async fn delete_review(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = review_service::delete(&db, &id).await?;
    Ok(HttpResponse::Ok().json(super::delete_ack(&result)))
}

/// GET /myreviews/:email - the caller's dashboard listing.
pub async fn my_reviews(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let reviews = review_service::list_for_user(&db, &email).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// GET /average-rating/:scholarshipID - server-side average, 0 when the
/// scholarship has no reviews. Public.
#[utoipa::path(
    get,
    path = "/average-rating/{scholarshipID}",
    tag = "Reviews",
    responses(
        (status = 200, description = "{ averageRating: x }")
    )
)]
pub async fn average_rating(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scholarship_id = path.into_inner();
    let average = review_service::average_rating(&db, &scholarship_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "averageRating": average })))
}
