use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};

use crate::database::MongoDB;
use crate::models::{Review, UpdateReviewRequest};
use crate::services::user_service::parse_object_id;
use crate::utils::error::AppError;

const TOP_REVIEW_LIMIT: i64 = 9;

pub async fn create(
    db: &MongoDB,
    review: &Review,
) -> Result<mongodb::results::InsertOneResult, AppError> {
    let result = db.reviews().insert_one(review).await?;
    Ok(result)
}

/// All reviews, for the moderator dashboard.
pub async fn list(db: &MongoDB) -> Result<Vec<Review>, AppError> {
    let reviews = db.reviews().find(Document::new()).await?.try_collect().await?;
    Ok(reviews)
}

/// `GET /top-reviews` - highest rating first, capped at 9.
pub async fn top(db: &MongoDB) -> Result<Vec<Review>, AppError> {
    let pipeline = vec![
        doc! { "$sort": { "ratingPoint": -1 } },
        doc! { "$limit": TOP_REVIEW_LIMIT },
    ];

    let reviews = db
        .reviews()
        .aggregate(pipeline)
        .with_type::<Review>()
        .await?
        .try_collect()
        .await?;

    Ok(reviews)
}

/// Reviews posted for one scholarship (`GET /reviews/:id` - the id here is
/// the scholarship reference, not the review `_id`).
pub async fn list_for_scholarship(db: &MongoDB, scholarship_id: &str) -> Result<Vec<Review>, AppError> {
    let reviews = db
        .reviews()
        .find(doc! { "scholarshipId": scholarship_id })
        .await?
        .try_collect()
        .await?;
    Ok(reviews)
}

/// Reviews authored by one user (`GET /myreviews/:email`).
pub async fn list_for_user(db: &MongoDB, email: &str) -> Result<Vec<Review>, AppError> {
    let reviews = db
        .reviews()
        .find(doc! { "userEmail": email })
        .await?
        .try_collect()
        .await?;
    Ok(reviews)
}

pub fn update_document(req: &UpdateReviewRequest) -> Document {
    let mut set = Document::new();
    if let Some(v) = &req.review_comment {
        set.insert("reviewComment", v);
    }
    if let Some(v) = req.rating_point {
        set.insert("ratingPoint", v);
    }
    set
}

/// `PATCH /reviews/:id` - author edits comment and/or rating.
pub async fn update(
    db: &MongoDB,
    id: &str,
    req: &UpdateReviewRequest,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let oid = parse_object_id(id)?;
    let set = update_document(req);
    if set.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }

    let result = db
        .reviews()
        .update_one(doc! { "_id": oid }, doc! { "$set": set })
        .await?;
    Ok(result)
}

pub async fn delete(db: &MongoDB, id: &str) -> Result<mongodb::results::DeleteResult, AppError> {
    let oid = parse_object_id(id)?;
    let result = db.reviews().delete_one(doc! { "_id": oid }).await?;
    Ok(result)
}

/// Server-side average rating for one scholarship; 0.0 when it has no
/// reviews yet.
pub async fn average_rating(db: &MongoDB, scholarship_id: &str) -> Result<f64, AppError> {
    let pipeline = vec![
        doc! { "$match": { "scholarshipId": scholarship_id } },
        doc! { "$group": { "_id": null, "averageRating": { "$avg": "$ratingPoint" } } },
    ];

    let results: Vec<Document> = db
        .reviews()
        .aggregate(pipeline)
        .await?
        .try_collect()
        .await?;

    let average = results
        .first()
        .and_then(|d| d.get("averageRating"))
        .and_then(Bson::as_f64)
        .unwrap_or(0.0);

    Ok(average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_partial() {
        let req = UpdateReviewRequest {
            review_comment: Some("revised opinion".to_string()),
            rating_point: None,
        };
        let set = update_document(&req);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("reviewComment").unwrap(), "revised opinion");
    }

    #[test]
    fn test_update_document_both_fields() {
        let req = UpdateReviewRequest {
            review_comment: Some("better than I thought".to_string()),
            rating_point: Some(4.5),
        };
        let set = update_document(&req);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_f64("ratingPoint").unwrap(), 4.5);
    }
}
