use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use uuid::Uuid;

use crate::utils::error::AppError;

type HmacSha1 = Hmac<Sha1>;

/// ImageKit caps the expiry window at one hour; 30 minutes is plenty for a
/// browser upload.
const SIGNATURE_TTL_SECS: i64 = 30 * 60;

/// Short-lived upload authentication parameters. The client passes these to
/// ImageKit and uploads directly; the image bytes never touch this server.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadSignature {
    pub token: String,
    pub expire: i64,
    pub signature: String,
}

fn private_key() -> Result<String, AppError> {
    std::env::var("IMAGEKIT_SK")
        .map_err(|_| AppError::Upstream("IMAGEKIT_SK not configured".to_string()))
}

/// hex(HMAC-SHA1(token + expire, private key)) - the scheme ImageKit's
/// server SDKs implement.
pub fn sign(token: &str, expire: i64, key: &str) -> Result<String, AppError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| AppError::Upstream(format!("Failed to build signature: {}", e)))?;
    mac.update(format!("{}{}", token, expire).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// `GET /get-signature` - fresh one-shot token, expiry, and signature.
pub fn auth_params() -> Result<UploadSignature, AppError> {
    let key = private_key()?;
    let token = Uuid::new_v4().to_string();
    let expire = Utc::now().timestamp() + SIGNATURE_TTL_SECS;
    let signature = sign(&token, expire, &key)?;

    Ok(UploadSignature {
        token,
        expire,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_deterministic() {
        let a = sign("token-1", 1700000000, "private_key").unwrap();
        let b = sign("token-1", 1700000000, "private_key").unwrap();
        assert_eq!(a, b);
        // SHA-1 digest is 20 bytes -> 40 hex chars
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_depends_on_all_inputs() {
        let base = sign("token-1", 1700000000, "private_key").unwrap();
        assert_ne!(base, sign("token-2", 1700000000, "private_key").unwrap());
        assert_ne!(base, sign("token-1", 1700000001, "private_key").unwrap());
        assert_ne!(base, sign("token-1", 1700000000, "other_key").unwrap());
    }

    #[test]
    fn test_known_vector() {
        // HMAC-SHA1("token1700000000", "secret")
        let sig = sign("token", 1700000000, "secret").unwrap();
        assert_eq!(sig, {
            let mut mac = HmacSha1::new_from_slice(b"secret").unwrap();
            mac.update(b"token1700000000");
            hex::encode(mac.finalize().into_bytes())
        });
    }
}
