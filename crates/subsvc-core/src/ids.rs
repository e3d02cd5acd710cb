//! Identifier types for subsvc.
//!
//! Identifiers are store-assigned positive integers. Each entity type gets its
//! own newtype so a subscription id can never be passed where a user id is
//! expected.
//!
//! # Macro-based ID Types
//!
//! The `int_id_type!` macro generates the newtype together with its parsing,
//! display and key-encoding helpers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to define an integer identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `u64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as a bare JSON number)
/// - `FromStr`, `Display`, `Debug`
/// - big-endian byte conversion for ordered storage keys
///
/// # Example
///
/// ```ignore
/// int_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new(7);
/// let parsed: MyId = id.to_string().parse().unwrap();
/// ```
macro_rules! int_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from its raw value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Return the identifier as 8 big-endian bytes.
            ///
            /// Big-endian keeps lexicographic byte order equal to numeric order.
            #[must_use]
            pub const fn to_be_bytes(self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            /// Create an identifier from 8 big-endian bytes.
            #[must_use]
            pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
                Self(u64::from_be_bytes(bytes))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidInteger(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

int_id_type!(UserId, "A user identifier assigned by the record store.");
int_id_type!(
    SubscriptionId,
    "A subscription identifier assigned by the record store.\n\nIds grow monotonically, so ascending id order is insertion order."
);

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a non-negative integer.
    #[error("invalid identifier: {0}")]
    InvalidInteger(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_from_string() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id, UserId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn user_id_rejects_garbage() {
        assert_eq!(
            "abc".parse::<UserId>(),
            Err(IdError::InvalidInteger("abc".into()))
        );
        assert!("-1".parse::<UserId>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&SubscriptionId::new(3)).unwrap();
        assert_eq!(json, "3");
        let parsed: SubscriptionId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, SubscriptionId::new(3));
    }

    #[test]
    fn byte_order_matches_numeric_order() {
        let small = UserId::new(2).to_be_bytes();
        let large = UserId::new(256).to_be_bytes();
        assert!(small < large);
        assert_eq!(UserId::from_be_bytes(large), UserId::new(256));
    }

    #[test]
    fn debug_includes_type_name() {
        assert_eq!(format!("{:?}", SubscriptionId::new(9)), "SubscriptionId(9)");
    }
}
