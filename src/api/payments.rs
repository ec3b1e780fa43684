use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{Payment, PaymentIntentRequest};
use crate::services::payment_service;
use crate::utils::error::AppError;

/// POST /create-payment-intent - creates a Stripe intent for the given
/// price and hands the client secret back for the card form.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "{ clientSecret: ... }"),
        (status = 400, description = "Non-positive price")
    )
)]
pub async fn create_payment_intent(
    body: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    let client_secret = payment_service::create_payment_intent(body.price).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "clientSecret": client_secret })))
}

/// POST /payments - records a completed payment after verifying the
/// reported transaction against Stripe.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    request_body = Payment,
    responses(
        (status = 200, description = "Insert acknowledgement"),
        (status = 400, description = "Transaction missing or not verified")
    )
)]
pub async fn record_payment(
    db: web::Data<MongoDB>,
    body: web::Json<Payment>,
) -> Result<HttpResponse, AppError> {
    let result = payment_service::record(&db, &body).await?;
    Ok(HttpResponse::Ok().json(super::insert_ack(&result)))
}
