use crate::database::MongoDB;
use crate::models::Payment;
use crate::utils::error::AppError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

fn stripe_secret_key() -> Result<String, AppError> {
    std::env::var("STRIPE_SECRET_KEY")
        .map_err(|_| AppError::Upstream("STRIPE_SECRET_KEY not configured".to_string()))
}

/// Converts a major-unit price to Stripe's minor units (cents). Rounds
/// instead of truncating so 49.99 becomes 4999, not the float-error 4998.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Creates a card-only usd payment intent for the given price and returns
/// the client secret. The payment itself is confirmed by the front-end;
/// nothing is recorded here.
pub async fn create_payment_intent(price: f64) -> Result<String, AppError> {
    if price <= 0.0 {
        return Err(AppError::BadRequest("price must be positive".to_string()));
    }
    let secret = stripe_secret_key()?;
    let amount = to_minor_units(price);

    let params = [
        ("amount", amount.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let response = reqwest::Client::new()
        .post(format!("{}/payment_intents", STRIPE_API_BASE))
        .basic_auth(&secret, None::<&str>)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to create payment intent: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!(
            "Stripe rejected payment intent: {} {}",
            status, body
        )));
    }

    let intent: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to parse Stripe response: {}", e)))?;

    intent["client_secret"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| AppError::Upstream("No client_secret in Stripe response".to_string()))
}

/// How the Stripe intent-lookup status maps: an unknown intent id is an
/// unverified payment, but any other failure is Stripe's, not the payer's.
#[derive(Debug, PartialEq, Eq)]
enum IntentLookup {
    Found,
    Missing,
    Failed,
}

fn classify_intent_lookup(status: reqwest::StatusCode) -> IntentLookup {
    if status.is_success() {
        IntentLookup::Found
    } else if status == reqwest::StatusCode::NOT_FOUND {
        IntentLookup::Missing
    } else {
        IntentLookup::Failed
    }
}

/// Checks the reported payment intent against Stripe and returns whether it
/// actually succeeded. Client-reported transaction ids are never trusted
/// on their own.
pub async fn verify_transaction(transaction_id: &str) -> Result<bool, AppError> {
    let secret = stripe_secret_key()?;

    let response = reqwest::Client::new()
        .get(format!("{}/payment_intents/{}", STRIPE_API_BASE, transaction_id))
        .basic_auth(&secret, None::<&str>)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to fetch payment intent: {}", e)))?;

    match classify_intent_lookup(response.status()) {
        IntentLookup::Missing => return Ok(false),
        IntentLookup::Failed => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Stripe intent lookup failed: {} {}",
                status, body
            )));
        }
        IntentLookup::Found => {}
    }

    let intent: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to parse Stripe response: {}", e)))?;

    Ok(intent["status"].as_str() == Some("succeeded"))
}

/// `POST /payments` - verifies the transaction server-side and then
/// persists the record.
pub async fn record(
    db: &MongoDB,
    payment: &Payment,
) -> Result<mongodb::results::InsertOneResult, AppError> {
    if payment.transaction_id.is_empty() {
        return Err(AppError::BadRequest("transactionId is required".to_string()));
    }

    if !verify_transaction(&payment.transaction_id).await? {
        return Err(AppError::BadRequest(
            "payment could not be verified".to_string(),
        ));
    }

    let result = db.payments().insert_one(payment).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(25.0), 2500);
        assert_eq!(to_minor_units(49.99), 4999);
        assert_eq!(to_minor_units(0.5), 50);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let err = create_payment_intent(-5.0).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_intent_lookup_classification() {
        use reqwest::StatusCode;

        assert_eq!(classify_intent_lookup(StatusCode::OK), IntentLookup::Found);
        // Unknown intent id: the payment is unverified, not a server fault
        assert_eq!(classify_intent_lookup(StatusCode::NOT_FOUND), IntentLookup::Missing);
        // Stripe outage or auth problem must never read as "payment invalid"
        assert_eq!(
            classify_intent_lookup(StatusCode::INTERNAL_SERVER_ERROR),
            IntentLookup::Failed
        );
        assert_eq!(classify_intent_lookup(StatusCode::BAD_GATEWAY), IntentLookup::Failed);
        assert_eq!(classify_intent_lookup(StatusCode::UNAUTHORIZED), IntentLookup::Failed);
    }
}
