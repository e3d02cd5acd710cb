//! Key encoding utilities for `RocksDB`.
//!
//! Identifiers are encoded big-endian so that key order equals id order.

use subsvc_core::{SubscriptionId, UserId};

use crate::error::{Result, StoreError};

/// Sequence key for user ids in the `meta` column family.
pub const USER_SEQUENCE: &[u8] = b"seq:user";

/// Sequence key for subscription ids in the `meta` column family.
pub const SUBSCRIPTION_SEQUENCE: &[u8] = b"seq:subscription";

/// Create a user key from a user ID.
#[must_use]
pub fn user_key(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Create a subscription key from a subscription ID.
#[must_use]
pub fn subscription_key(subscription_id: SubscriptionId) -> [u8; 8] {
    subscription_id.to_be_bytes()
}

/// Create a user-subscription index key.
///
/// Format: `user_id (8 bytes) || subscription_id (8 bytes)`
///
/// Subscription ids grow monotonically, so a user's entries sort by insertion.
#[must_use]
pub fn user_subscription_key(user_id: UserId, subscription_id: SubscriptionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&user_id.to_be_bytes());
    key.extend_from_slice(&subscription_id.to_be_bytes());
    key
}

/// Create a prefix for iterating all subscriptions of a user.
#[must_use]
pub fn user_subscriptions_prefix(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Extract the subscription ID from a user-subscription index key.
///
/// # Errors
///
/// Returns `StoreError::Database` if the key is not 16 bytes long.
pub fn extract_subscription_id_from_user_key(key: &[u8]) -> Result<SubscriptionId> {
    if key.len() != 16 {
        return Err(StoreError::Database(format!("malformed index key: {key:?}")));
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[8..16]);
    Ok(SubscriptionId::from_be_bytes(bytes))
}

/// Encode a sequence value.
#[must_use]
pub fn encode_sequence(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode a sequence value.
///
/// # Errors
///
/// Returns `StoreError::Database` if the value is not 8 bytes long.
pub fn decode_sequence(value: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = value
        .try_into()
        .map_err(|_| StoreError::Database(format!("malformed sequence value: {value:?}")))?;
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_subscription_key_format() {
        let key = user_subscription_key(UserId::new(1), SubscriptionId::new(2));

        assert_eq!(key.len(), 16);
        assert_eq!(&key[..8], &user_subscriptions_prefix(UserId::new(1)));
        assert_eq!(&key[8..], &subscription_key(SubscriptionId::new(2)));
    }

    #[test]
    fn extract_subscription_id_from_index_key() {
        let key = user_subscription_key(UserId::new(5), SubscriptionId::new(300));
        let extracted = extract_subscription_id_from_user_key(&key).unwrap();
        assert_eq!(extracted, SubscriptionId::new(300));
    }

    #[test]
    fn extract_rejects_short_keys() {
        assert!(extract_subscription_id_from_user_key(&[0u8; 12]).is_err());
        assert!(extract_subscription_id_from_user_key(&[0u8; 17]).is_err());
    }

    #[test]
    fn index_keys_sort_by_subscription_id() {
        let user = UserId::new(1);
        let earlier = user_subscription_key(user, SubscriptionId::new(9));
        let later = user_subscription_key(user, SubscriptionId::new(10));
        assert!(earlier < later);
    }

    #[test]
    fn sequence_values() {
        assert_eq!(decode_sequence(&encode_sequence(41)).unwrap(), 41);
        assert!(decode_sequence(b"short").is_err());
    }
}
