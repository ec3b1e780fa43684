use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use crate::database::MongoDB;
use crate::models::{Scholarship, UpdateScholarshipRequest};
use crate::services::user_service::parse_object_id;
use crate::utils::error::AppError;

const TOP_SCHOLARSHIP_LIMIT: i64 = 6;

/// Free-text search filter over name/university/degree, case-insensitive
/// substring match. Empty or absent search -> match everything.
pub fn search_filter(search: Option<&str>) -> Document {
    match search {
        Some(q) if !q.is_empty() => doc! {
            "$or": [
                { "scholarshipName": { "$regex": q, "$options": "i" } },
                { "universityName": { "$regex": q, "$options": "i" } },
                { "degree": { "$regex": q, "$options": "i" } },
            ]
        },
        _ => Document::new(),
    }
}

/// Validated one-based pagination window. Both parameters must come
/// together and be positive; anything else is a 400.
pub fn pagination_window(
    page: Option<i64>,
    size: Option<i64>,
) -> Result<Option<(u64, i64)>, AppError> {
    match (page, size) {
        (None, None) => Ok(None),
        (Some(page), Some(size)) if page >= 1 && size >= 1 => {
            let skip = (page - 1)
                .checked_mul(size)
                .ok_or_else(|| AppError::BadRequest("page window out of range".to_string()))?;
            Ok(Some((skip as u64, size)))
        }
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "page and size must be positive".to_string(),
        )),
        _ => Err(AppError::BadRequest(
            "page and size must be given together".to_string(),
        )),
    }
}

/// `GET /allsholarship` - optional search plus optional pagination.
pub async fn list(
    db: &MongoDB,
    search: Option<&str>,
    page: Option<i64>,
    size: Option<i64>,
) -> Result<Vec<Scholarship>, AppError> {
    let filter = search_filter(search);

    let scholarships = match pagination_window(page, size)? {
        Some((skip, limit)) => {
            db.scholarships()
                .find(filter)
                .skip(skip)
                .limit(limit)
                .await?
                .try_collect()
                .await?
        }
        None => db.scholarships().find(filter).await?.try_collect().await?,
    };

    Ok(scholarships)
}

/// `GET /scholarship-count` - total match count for the same filter, used
/// by the front-end to compute page counts.
pub async fn count(db: &MongoDB, search: Option<&str>) -> Result<u64, AppError> {
    let n = db
        .scholarships()
        .count_documents(search_filter(search))
        .await?;
    Ok(n)
}

/// `GET /top-sholarship` - most recently posted first, cheapest application
/// fee breaking ties, capped at 6. `postDate` is stored as a string, so it
/// is converted before sorting.
pub async fn top(db: &MongoDB) -> Result<Vec<Scholarship>, AppError> {
    let pipeline = vec![
        doc! { "$addFields": { "postDateISO": { "$toDate": "$postDate" } } },
        doc! { "$sort": { "postDateISO": -1, "applicationFees": 1 } },
        doc! { "$limit": TOP_SCHOLARSHIP_LIMIT },
    ];

    let scholarships = db
        .scholarships()
        .aggregate(pipeline)
        .with_type::<Scholarship>()
        .await?
        .try_collect()
        .await?;

    Ok(scholarships)
}

pub async fn create(
    db: &MongoDB,
    scholarship: &Scholarship,
) -> Result<mongodb::results::InsertOneResult, AppError> {
    let result = db.scholarships().insert_one(scholarship).await?;
    Ok(result)
}

pub async fn find_by_id(db: &MongoDB, id: &str) -> Result<Option<Scholarship>, AppError> {
    let oid = parse_object_id(id)?;
    let scholarship = db.scholarships().find_one(doc! { "_id": oid }).await?;
    Ok(scholarship)
}

/// Builds the `$set` document from the fields actually present in the body.
pub fn update_document(req: &UpdateScholarshipRequest) -> Document {
    let mut set = Document::new();
    if let Some(v) = &req.scholarship_name {
        set.insert("scholarshipName", v);
    }
    if let Some(v) = &req.university_name {
        set.insert("universityName", v);
    }
    if let Some(v) = &req.image_url {
        set.insert("imageUrl", v);
    }
    if let Some(v) = &req.university_country {
        set.insert("universityCountry", v);
    }
    if let Some(v) = &req.university_city {
        set.insert("universityCity", v);
    }
    if let Some(v) = req.university_world_rank {
        set.insert("universityWorldRank", v);
    }
    if let Some(v) = &req.subject_category {
        set.insert("subjectCategory", v);
    }
    if let Some(v) = &req.scholarship_category {
        set.insert("scholarshipCategory", v);
    }
    if let Some(v) = &req.degree {
        set.insert("degree", v);
    }
    if let Some(v) = req.tuition_fees {
        set.insert("tuitionFees", v);
    }
    if let Some(v) = req.application_fees {
        set.insert("applicationFees", v);
    }
    if let Some(v) = req.service_charge {
        set.insert("serviceCharge", v);
    }
    if let Some(v) = &req.stipend {
        set.insert("stipend", v);
    }
    if let Some(v) = &req.application_deadline {
        set.insert("applicationDeadline", v);
    }
    if let Some(v) = &req.scholarship_details_field {
        set.insert("ScholarshipDetailsField", v);
    }
    set
}

/// `PATCH /scholarships/:id` - partial-field merge; a body with nothing to
/// set is rejected rather than issuing an empty update.
pub async fn update(
    db: &MongoDB,
    id: &str,
    req: &UpdateScholarshipRequest,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let oid = parse_object_id(id)?;
    let set = update_document(req);
    if set.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }

    let result = db
        .scholarships()
        .update_one(doc! { "_id": oid }, doc! { "$set": set })
        .await?;
    Ok(result)
}

pub async fn delete(db: &MongoDB, id: &str) -> Result<mongodb::results::DeleteResult, AppError> {
    let oid = parse_object_id(id)?;
    let result = db.scholarships().delete_one(doc! { "_id": oid }).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_empty() {
        assert!(search_filter(None).is_empty());
        assert!(search_filter(Some("")).is_empty());
    }

    #[test]
    fn test_search_filter_covers_three_fields() {
        let filter = search_filter(Some("harvard"));
        let or = filter.get_array("$or").unwrap();
        assert_eq!(or.len(), 3);
        let first = or[0].as_document().unwrap();
        let regex = first.get_document("scholarshipName").unwrap();
        assert_eq!(regex.get_str("$regex").unwrap(), "harvard");
        assert_eq!(regex.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_pagination_window() {
        assert_eq!(pagination_window(None, None).unwrap(), None);
        assert_eq!(pagination_window(Some(1), Some(5)).unwrap(), Some((0, 5)));
        assert_eq!(pagination_window(Some(3), Some(5)).unwrap(), Some((10, 5)));
    }

    #[test]
    fn test_pagination_window_rejects_bad_input() {
        assert!(pagination_window(Some(0), Some(5)).is_err());
        assert!(pagination_window(Some(1), Some(0)).is_err());
        assert!(pagination_window(Some(1), None).is_err());
        assert!(pagination_window(None, Some(5)).is_err());
    }

    #[test]
    fn test_pagination_window_rejects_overflowing_product() {
        assert!(pagination_window(Some(i64::MAX), Some(i64::MAX)).is_err());
        assert!(pagination_window(Some(i64::MAX), Some(2)).is_err());
    }

    #[test]
    fn test_update_document_partial() {
        let req = UpdateScholarshipRequest {
            scholarship_name: Some("AWS Scholars Grant".to_string()),
            application_fees: Some(50.0),
            ..Default::default()
        };
        let set = update_document(&req);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("scholarshipName").unwrap(), "AWS Scholars Grant");
        assert_eq!(set.get_f64("applicationFees").unwrap(), 50.0);
        assert!(!set.contains_key("universityName"));
    }

    #[test]
    fn test_update_document_empty() {
        assert!(update_document(&UpdateScholarshipRequest::default()).is_empty());
    }
}
