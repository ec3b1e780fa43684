use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity claims embedded in the session token. The email is the business
/// key; the role is deliberately NOT carried here - guards re-fetch it from
/// storage so a role change takes effect without re-login.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Token verification failures. `Expired` is split out so callers can tell
/// a stale session from a forged one in the logs.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    InvalidToken,
    Expired,
}

/// Session lifetime. No refresh mechanism exists - the front-end re-issues
/// via POST /jwt after expiry.
const TOKEN_TTL_HOURS: i64 = 4;

fn get_secret() -> String {
    std::env::var("ACCESS_SECRET_TOKEN").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Signs a session token for the given email, expiring in 4 hours.
pub fn issue(email: &str) -> Result<String, String> {
    issue_with_secret(email, &get_secret())
}

pub fn issue_with_secret(email: &str, secret: &str) -> Result<String, String> {
    let now = Utc::now();
    let claims = Claims {
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Decodes and validates signature + expiration.
pub fn verify(token: &str) -> Result<Claims, AuthError> {
    verify_with_secret(token, &get_secret())
}

pub fn verify_with_secret(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::get_current_timestamp;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let token = issue_with_secret("alice@example.com", "test-secret").unwrap();
        let claims = verify_with_secret(&token, "test-secret").unwrap();
        assert_eq!(claims.email, "alice@example.com");
        // exp is 4 hours out, give or take test scheduling
        let expected = get_current_timestamp() as usize + 4 * 3600;
        assert!(claims.exp.abs_diff(expected) < 10);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = issue_with_secret("alice@example.com", "secret-a").unwrap();
        let err = verify_with_secret(&token, "secret-b").unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn test_expired_token() {
        let past = Utc::now() - Duration::hours(5);
        let claims = Claims {
            email: "alice@example.com".to_string(),
            iat: past.timestamp() as usize,
            exp: (past + Duration::hours(4)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = verify_with_secret(&token, "test-secret").unwrap_err();
        assert_eq!(err, AuthError::Expired);
    }

    #[test]
    fn test_garbage_token() {
        let err = verify_with_secret("not.a.token", "test-secret").unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }
}
