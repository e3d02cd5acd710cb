//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// A persisted user.
///
/// Users are created on explicit request and are never mutated or deleted.
/// Subscriptions reference a user by id; the user does not track them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// Email address as supplied by the caller (not validated).
    pub email: String,

    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,
}

impl NewUser {
    /// Create user input from an email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Materialize the record once the store has assigned an id.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            created_at: Utc::now(),
        }
    }
}
