//! Request and response types for the subscription client.

use serde::{Deserialize, Serialize};
use subsvc_core::{SubscriptionId, UserId};

/// Create user request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    /// Email address.
    pub email: String,
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
}

/// Create subscription request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubscriptionRequest {
    /// Subscribing user.
    pub user_id: UserId,
    /// Plan name.
    pub plan: String,
}

/// A subscription as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionResponse {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Subscribing user.
    pub user_id: UserId,
    /// Plan name.
    pub plan: String,
    /// Whether the subscription is active.
    pub active: bool,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetails {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}
