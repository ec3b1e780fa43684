use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User review of a scholarship (stored in the `reviews` collection).
/// `scholarship_id` is a plain string reference; integrity is by convention,
/// not a database constraint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::serialize_oid_as_hex",
        default
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    pub scholarship_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,

    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_image: Option<String>,

    pub rating_point: f64,
    pub review_comment: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_date: Option<String>,
}

/// Partial update for `PATCH /reviews/:id` - authors may revise the comment
/// and/or the rating.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub review_comment: Option<String>,
    pub rating_point: Option<f64>,
}
