//! Error types for subsvc.

use crate::ids::{SubscriptionId, UserId};

/// Result type for subscription operations.
pub type Result<T> = std::result::Result<T, SubscriptionError>;

/// Errors that can occur in subscription operations.
///
/// `UserNotFound`, `SubscriptionNotFound` and `DuplicateActiveSubscription`
/// are caller errors and are surfaced as-is. Everything the store cannot
/// classify ends up in `Storage`.
#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    /// Referenced user does not exist.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// The user ID that was not found.
        user_id: UserId,
    },

    /// Referenced subscription does not exist.
    #[error("subscription not found: {subscription_id}")]
    SubscriptionNotFound {
        /// The subscription ID that was not found.
        subscription_id: SubscriptionId,
    },

    /// The user already has an active subscription for this plan.
    #[error("duplicate active subscription: user={user_id}, plan={plan}")]
    DuplicateActiveSubscription {
        /// The subscribing user.
        user_id: UserId,
        /// The plan that is already active.
        plan: String,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl SubscriptionError {
    /// Whether the error is a missing-entity error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. } | Self::SubscriptionNotFound { .. }
        )
    }

    /// Whether the error is a uniqueness violation.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateActiveSubscription { .. })
    }
}
