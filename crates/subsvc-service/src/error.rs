//! API error types and responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use subsvc_core::SubscriptionError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - the write would break the one-active-plan rule.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::UserNotFound { .. }
            | SubscriptionError::SubscriptionNotFound { .. } => Self::NotFound(err.to_string()),
            SubscriptionError::DuplicateActiveSubscription { .. } => Self::Conflict(err.to_string()),
            SubscriptionError::Storage(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subsvc_core::{SubscriptionId, UserId};

    #[test]
    fn classifies_domain_errors() {
        let not_found: ApiError = SubscriptionError::UserNotFound {
            user_id: UserId::new(1),
        }
        .into();
        assert!(matches!(not_found, ApiError::NotFound(ref m) if m == "user not found: 1"));

        let missing_sub: ApiError = SubscriptionError::SubscriptionNotFound {
            subscription_id: SubscriptionId::new(2),
        }
        .into();
        assert!(matches!(missing_sub, ApiError::NotFound(_)));

        let conflict: ApiError = SubscriptionError::DuplicateActiveSubscription {
            user_id: UserId::new(1),
            plan: "pro".into(),
        }
        .into();
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let internal: ApiError = SubscriptionError::Storage("io".into()).into();
        assert!(matches!(internal, ApiError::Internal(_)));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("secret".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
