use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Record of a completed card payment (the `payments` collection). Written
/// only after the reported transaction has been verified against Stripe.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::serialize_oid_as_hex",
        default
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    pub email: String,
    pub price: f64,

    /// Stripe payment-intent id reported by the client
    pub transaction_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}
