use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use crate::database::MongoDB;
use crate::models::{AppliedScholarship, ModerateApplicationRequest, UpdateApplicationRequest};
use crate::services::user_service::{is_duplicate_key, parse_object_id};
use crate::utils::error::AppError;

// The misspelling is what the front-end matches on; do not correct it.
const ALREADY_APPLIED: &str = "Applicant already applied for this schoalrship";

/// Outcome of `POST /appliedScholarship`.
pub enum ApplyOutcome {
    Inserted(mongodb::bson::Bson),
    AlreadyApplied,
}

/// Inserts an application unless one already exists for the same
/// (userEmail, scholarshipId) pair. The existence check is only a fast
/// path; the unique compound index is what actually guarantees the
/// invariant, so a concurrent duplicate insert comes back as a
/// duplicate-key error and is mapped to the same conflict.
pub async fn apply(
    db: &MongoDB,
    application: &AppliedScholarship,
) -> Result<ApplyOutcome, AppError> {
    let existing = db
        .applied_scholarships()
        .find_one(doc! {
            "userEmail": &application.user_email,
            "scholarshipId": &application.scholarship_id,
        })
        .await?;
    if existing.is_some() {
        return Ok(ApplyOutcome::AlreadyApplied);
    }

    match db.applied_scholarships().insert_one(application).await {
        Ok(result) => Ok(ApplyOutcome::Inserted(result.inserted_id)),
        Err(e) if is_duplicate_key(&e) => Ok(ApplyOutcome::AlreadyApplied),
        Err(e) => Err(e.into()),
    }
}

pub fn conflict_error() -> AppError {
    AppError::Conflict(ALREADY_APPLIED.to_string())
}

/// All applications, for the moderator dashboard.
pub async fn list(db: &MongoDB) -> Result<Vec<AppliedScholarship>, AppError> {
    let applications = db
        .applied_scholarships()
        .find(Document::new())
        .await?
        .try_collect()
        .await?;
    Ok(applications)
}

/// One user's applications (`GET /appliedScholarship/:email`).
pub async fn list_for_user(db: &MongoDB, email: &str) -> Result<Vec<AppliedScholarship>, AppError> {
    let applications = db
        .applied_scholarships()
        .find(doc! { "userEmail": email })
        .await?
        .try_collect()
        .await?;
    Ok(applications)
}

/// `GET /appliedapplication/:id` - looks up by the scholarship reference,
/// not the application `_id`.
pub async fn find_by_scholarship(
    db: &MongoDB,
    scholarship_id: &str,
) -> Result<Option<AppliedScholarship>, AppError> {
    let application = db
        .applied_scholarships()
        .find_one(doc! { "scholarshipId": scholarship_id })
        .await?;
    Ok(application)
}

pub fn moderation_document(req: &ModerateApplicationRequest) -> Document {
    let mut set = Document::new();
    if let Some(v) = &req.application_status {
        set.insert("applicationStatus", v);
    }
    if let Some(v) = &req.feedback {
        set.insert("feedback", v);
    }
    set
}

/// Moderator update: status and/or feedback, partial-field merge.
pub async fn moderate(
    db: &MongoDB,
    id: &str,
    req: &ModerateApplicationRequest,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let oid = parse_object_id(id)?;
    let set = moderation_document(req);
    if set.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }

    let result = db
        .applied_scholarships()
        .update_one(doc! { "_id": oid }, doc! { "$set": set })
        .await?;
    Ok(result)
}

pub fn profile_document(req: &UpdateApplicationRequest) -> Document {
    let mut set = Document::new();
    if let Some(v) = &req.applicant_phone {
        set.insert("applicantPhone", v);
    }
    if let Some(v) = &req.image_url {
        set.insert("imageUrl", v);
    }
    if let Some(v) = &req.applicant_address {
        set.insert("applicantAddress", v);
    }
    if let Some(v) = &req.applicant_gender {
        set.insert("applicantGender", v);
    }
    if let Some(v) = &req.applicant_aspired_degree {
        set.insert("applicantAspiredDegree", v);
    }
    if let Some(v) = &req.applicant_ssc_result {
        set.insert("applicantSscResult", v);
    }
    if let Some(v) = &req.applicant_hsc_result {
        set.insert("applicantHscResult", v);
    }
    if let Some(v) = &req.applicant_study_gap {
        set.insert("applicantStudyGap", v);
    }
    if let Some(v) = &req.university_name {
        set.insert("universityName", v);
    }
    if let Some(v) = &req.scholarship_category {
        set.insert("scholarshipCategory", v);
    }
    if let Some(v) = &req.subject_category {
        set.insert("subjectCategory", v);
    }
    set
}

/// Applicant update of the profile fields on their application.
pub async fn update_profile(
    db: &MongoDB,
    id: &str,
    req: &UpdateApplicationRequest,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let oid = parse_object_id(id)?;
    let set = profile_document(req);
    if set.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }

    let result = db
        .applied_scholarships()
        .update_one(doc! { "_id": oid }, doc! { "$set": set })
        .await?;
    Ok(result)
}

pub async fn delete(db: &MongoDB, id: &str) -> Result<mongodb::results::DeleteResult, AppError> {
    let oid = parse_object_id(id)?;
    let result = db
        .applied_scholarships()
        .delete_one(doc! { "_id": oid })
        .await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_conflict_is_403_with_message() {
        let err = conflict_error();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        // Pinned verbatim, misspelling included: the front-end matches on it
        assert_eq!(err.to_string(), "Applicant already applied for this schoalrship");
    }

    #[test]
    fn test_moderation_document_partial() {
        let status_only = ModerateApplicationRequest {
            application_status: Some("completed".to_string()),
            feedback: None,
        };
        let set = moderation_document(&status_only);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("applicationStatus").unwrap(), "completed");

        let feedback_only = ModerateApplicationRequest {
            application_status: None,
            feedback: Some("missing transcripts".to_string()),
        };
        let set = moderation_document(&feedback_only);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("feedback").unwrap(), "missing transcripts");
    }

    #[test]
    fn test_profile_document_only_named_fields() {
        let req = UpdateApplicationRequest {
            applicant_phone: Some("01700000000".to_string()),
            applicant_gender: Some("female".to_string()),
            ..Default::default()
        };
        let set = profile_document(&req);
        assert_eq!(set.len(), 2);
        assert!(set.contains_key("applicantPhone"));
        assert!(set.contains_key("applicantGender"));
        assert!(!set.contains_key("universityName"));
    }
}
