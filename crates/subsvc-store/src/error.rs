//! Error types for subsvc storage.

use subsvc_core::{SubscriptionError, SubscriptionId, UserId};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record ("user" or "subscription").
        entity: &'static str,
        /// The identifier that was looked up.
        id: u64,
    },

    /// The conditional write was refused because an active subscription for
    /// the same plan already exists.
    #[error("active subscription already exists: user={user_id}, plan={plan}")]
    Conflict {
        /// The subscribing user.
        user_id: UserId,
        /// The plan that is already active.
        plan: String,
    },
}

impl StoreError {
    /// Missing user.
    #[must_use]
    pub fn user_not_found(user_id: UserId) -> Self {
        Self::NotFound {
            entity: "user",
            id: user_id.get(),
        }
    }

    /// Missing subscription.
    #[must_use]
    pub fn subscription_not_found(subscription_id: SubscriptionId) -> Self {
        Self::NotFound {
            entity: "subscription",
            id: subscription_id.get(),
        }
    }
}

impl From<StoreError> for SubscriptionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                entity: "subscription",
                id,
            } => Self::SubscriptionNotFound {
                subscription_id: SubscriptionId::new(id),
            },
            StoreError::NotFound { id, .. } => Self::UserNotFound {
                user_id: UserId::new(id),
            },
            StoreError::Conflict { user_id, plan } => {
                Self::DuplicateActiveSubscription { user_id, plan }
            }
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_by_entity() {
        let err: SubscriptionError = StoreError::user_not_found(UserId::new(3)).into();
        assert!(matches!(err, SubscriptionError::UserNotFound { user_id } if user_id.get() == 3));

        let err: SubscriptionError =
            StoreError::subscription_not_found(SubscriptionId::new(4)).into();
        assert!(matches!(
            err,
            SubscriptionError::SubscriptionNotFound { subscription_id } if subscription_id.get() == 4
        ));
    }

    #[test]
    fn conflict_maps_to_duplicate() {
        let err: SubscriptionError = StoreError::Conflict {
            user_id: UserId::new(1),
            plan: "pro".into(),
        }
        .into();
        assert!(err.is_conflict());
    }

    #[test]
    fn backend_failures_become_storage_errors() {
        let err: SubscriptionError = StoreError::Database("disk full".into()).into();
        assert!(matches!(err, SubscriptionError::Storage(msg) if msg == "disk full"));
    }
}
