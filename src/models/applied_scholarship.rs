use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A user's application for a scholarship (the `appliedScholarships`
/// collection). At most one document may exist per
/// (userEmail, scholarshipId) pair - backed by a unique compound index.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedScholarship {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::serialize_oid_as_hex",
        default
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    pub scholarship_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<f64>,

    // Applicant profile as captured on the application form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_aspired_degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_ssc_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_hsc_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_study_gap: Option<String>,

    /// "pending" | "processing" | "completed" | "rejected" - free-form,
    /// set by moderators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_date: Option<String>,
}

/// Moderator-side partial update (`PATCH /appliedScholarship/:id`):
/// application status and/or feedback.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModerateApplicationRequest {
    pub application_status: Option<String>,
    pub feedback: Option<String>,
}

/// Applicant-side partial update (`PATCH /appliedapplication/:id`) - edits
/// the profile fields captured on the form.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub applicant_phone: Option<String>,
    pub image_url: Option<String>,
    pub applicant_address: Option<String>,
    pub applicant_gender: Option<String>,
    pub applicant_aspired_degree: Option<String>,
    pub applicant_ssc_result: Option<String>,
    pub applicant_hsc_result: Option<String>,
    pub applicant_study_gap: Option<String>,
    pub university_name: Option<String>,
    pub scholarship_category: Option<String>,
    pub subject_category: Option<String>,
}
