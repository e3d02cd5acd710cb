//! Client error types.

use subsvc_core::{SubscriptionId, UserId};

/// Errors that can occur when using the subscription client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// User not found.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// The user ID.
        user_id: UserId,
    },

    /// Subscription not found.
    #[error("subscription not found: {subscription_id}")]
    SubscriptionNotFound {
        /// The subscription ID.
        subscription_id: SubscriptionId,
    },

    /// The user already has an active subscription for the plan.
    #[error("duplicate active subscription: user={user_id}, plan={plan}")]
    DuplicateActiveSubscription {
        /// The user ID.
        user_id: UserId,
        /// The plan.
        plan: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
