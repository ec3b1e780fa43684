use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

/// Application error taxonomy. Every handler and guard funnels failures
/// through here so the wire always carries `{"message": ...}` with the
/// status code the front-end expects.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed or expired bearer token -> 401
    Unauthorized,
    /// Authenticated but the stored role does not allow the route -> 403
    Forbidden,
    /// Business-rule conflict (e.g. duplicate application). The front-end
    /// expects 403 for these, so that contract is kept.
    Conflict(String),
    /// Input validation failure -> 400
    BadRequest(String),
    /// MongoDB failure -> uniform 500
    Database(String),
    /// Payment processor / external service failure -> uniform 500
    Upstream(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "unauthorised access"),
            AppError::Forbidden => write!(f, "forbidden access"),
            AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::Conflict(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Internal detail stays in the logs, not on the wire
            AppError::Database(msg) | AppError::Upstream(msg) => {
                log::error!("request failed: {}", msg);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": message
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Conflict("already applied".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::BadRequest("missing field".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_wire_messages() {
        assert_eq!(AppError::Unauthorized.to_string(), "unauthorised access");
        assert_eq!(AppError::Forbidden.to_string(), "forbidden access");
    }
}
