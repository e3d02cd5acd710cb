//! Storage layer for subsvc.
//!
//! This crate provides persistent storage for users and subscriptions. Two
//! backends implement the [`Store`] trait:
//!
//! - [`RocksStore`]: durable `RocksDB` storage with column families (feature
//!   `rocksdb-backend`, enabled by default)
//! - [`MemoryStore`]: process-local maps, for tests and throwaway instances
//!
//! # Architecture
//!
//! The `RocksDB` backend uses the following column families:
//!
//! - `users`: User records, keyed by big-endian `user_id`
//! - `subscriptions`: Subscription records, keyed by big-endian `subscription_id`
//! - `subscriptions_by_user`: Index for listing subscriptions by user
//! - `meta`: Identifier sequences
//!
//! # Uniqueness
//!
//! [`Store::insert_subscription`] is a conditional write: the duplicate-active
//! check and the insert happen inside one writer session, so two concurrent
//! creates for the same `(user_id, plan)` cannot both succeed.
//!
//! # Example
//!
//! ```
//! use subsvc_store::{MemoryStore, Store};
//! use subsvc_core::{NewSubscription, NewUser};
//!
//! let store = MemoryStore::new();
//!
//! let user = store.insert_user(&NewUser::new("alice@example.com")).unwrap();
//! let sub = store
//!     .insert_subscription(&NewSubscription::new(user.id, "pro"))
//!     .unwrap();
//! assert!(sub.active);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;

#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use subsvc_core::{
    NewSubscription, NewUser, Subscription, SubscriptionFilter, SubscriptionId, User, UserId,
};

/// The storage trait defining all record operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing). Once a method returns `Ok`, its
/// effect is visible to every subsequent call on the same store.
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert a user and return the persisted record with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_user(&self, user: &NewUser) -> Result<User>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: UserId) -> Result<Option<User>>;

    // =========================================================================
    // Subscription Operations
    // =========================================================================

    /// Insert an active subscription unless the user is missing or already
    /// holds an active subscription for the same plan.
    ///
    /// Both checks and the write run in one writer session.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the user doesn't exist.
    /// - `StoreError::Conflict` if an active subscription for the plan exists.
    fn insert_subscription(&self, subscription: &NewSubscription) -> Result<Subscription>;

    /// Get a subscription by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_subscription(&self, subscription_id: SubscriptionId) -> Result<Option<Subscription>>;

    /// List all subscriptions of a user in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_subscriptions_by_user(&self, user_id: UserId) -> Result<Vec<Subscription>>;

    /// List a user's subscriptions matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_subscriptions(
        &self,
        user_id: UserId,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<Subscription>> {
        Ok(self
            .list_subscriptions_by_user(user_id)?
            .into_iter()
            .filter(|subscription| filter.matches(subscription))
            .collect())
    }

    /// Set the active flag of a subscription and return the updated record.
    ///
    /// The uniqueness rule is not re-checked here.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the subscription doesn't exist.
    fn set_subscription_active(
        &self,
        subscription_id: SubscriptionId,
        active: bool,
    ) -> Result<Subscription>;
}
