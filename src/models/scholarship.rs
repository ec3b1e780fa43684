use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Scholarship listing (stored in the `scholarships` collection).
///
/// Field names mirror the documents the front-end already reads, including
/// the capitalized `ScholarshipDetailsField` the listings were seeded with.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::serialize_oid_as_hex",
        default
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    pub scholarship_name: String,
    pub university_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_world_rank: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_category: Option<String>,
    pub degree: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuition_fees: Option<f64>,
    pub application_fees: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,

    /// Free-text listing details
    #[serde(rename = "ScholarshipDetailsField", skip_serializing_if = "Option::is_none")]
    pub scholarship_details_field: Option<String>,

    /// Listing date as an ISO-ish string; `/top-sholarship` converts it
    /// with `$toDate` when ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_date: Option<String>,
}

/// Partial update for `PATCH /scholarships/:id`. Only fields present in the
/// body are written; everything else on the document is untouched.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScholarshipRequest {
    pub scholarship_name: Option<String>,
    pub university_name: Option<String>,
    pub image_url: Option<String>,
    pub university_country: Option<String>,
    pub university_city: Option<String>,
    pub university_world_rank: Option<i32>,
    pub subject_category: Option<String>,
    pub scholarship_category: Option<String>,
    pub degree: Option<String>,
    pub tuition_fees: Option<f64>,
    pub application_fees: Option<f64>,
    pub service_charge: Option<f64>,
    pub stipend: Option<String>,
    pub application_deadline: Option<String>,
    #[serde(rename = "ScholarshipDetailsField")]
    pub scholarship_details_field: Option<String>,
}
