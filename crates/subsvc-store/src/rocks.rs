//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Reads go straight to the database. Every mutation runs inside a writer
//! session and lands as a single `WriteBatch`.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use subsvc_core::{
    NewSubscription, NewUser, Subscription, SubscriptionFilter, SubscriptionId, User, UserId,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    writer: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// Missing column families are created, so a fresh directory is ready to
    /// use immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "RocksDB store opened");

        Ok(Self {
            db: Arc::new(db),
            writer: Mutex::new(()),
        })
    }

    /// Start a writer session.
    ///
    /// The session ends when the guard is dropped.
    fn writer(&self) -> Result<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|_| StoreError::Database("writer lock poisoned".into()))
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Read the next value of a sequence. Must be called inside a writer session.
    fn next_sequence(&self, key: &[u8]) -> Result<u64> {
        let cf = self.cf(cf::META)?;
        let current = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| keys::decode_sequence(&data))
            .transpose()?
            .unwrap_or(0);
        Ok(current + 1)
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn insert_user(&self, user: &NewUser) -> Result<User> {
        let _session = self.writer()?;

        let cf_users = self.cf(cf::USERS)?;
        let cf_meta = self.cf(cf::META)?;

        let id = self.next_sequence(keys::USER_SEQUENCE)?;
        let user = user.clone().into_user(UserId::new(id));

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, keys::user_key(user.id), Self::serialize(&user)?);
        batch.put_cf(&cf_meta, keys::USER_SEQUENCE, keys::encode_sequence(id));
        self.write(batch)?;

        Ok(user)
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS)?;

        self.db
            .get_cf(&cf, keys::user_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Subscription Operations
    // =========================================================================

    fn insert_subscription(&self, subscription: &NewSubscription) -> Result<Subscription> {
        let _session = self.writer()?;

        if self.get_user(subscription.user_id)?.is_none() {
            return Err(StoreError::user_not_found(subscription.user_id));
        }

        let active_plan = SubscriptionFilter::active_plan(subscription.plan.as_str());
        if !self
            .find_subscriptions(subscription.user_id, &active_plan)?
            .is_empty()
        {
            return Err(StoreError::Conflict {
                user_id: subscription.user_id,
                plan: subscription.plan.clone(),
            });
        }

        let cf_subs = self.cf(cf::SUBSCRIPTIONS)?;
        let cf_by_user = self.cf(cf::SUBSCRIPTIONS_BY_USER)?;
        let cf_meta = self.cf(cf::META)?;

        let id = self.next_sequence(keys::SUBSCRIPTION_SEQUENCE)?;
        let subscription = subscription
            .clone()
            .into_subscription(SubscriptionId::new(id));

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &cf_subs,
            keys::subscription_key(subscription.id),
            Self::serialize(&subscription)?,
        );
        batch.put_cf(
            &cf_by_user,
            keys::user_subscription_key(subscription.user_id, subscription.id),
            b"",
        ); // Index entry (empty value)
        batch.put_cf(
            &cf_meta,
            keys::SUBSCRIPTION_SEQUENCE,
            keys::encode_sequence(id),
        );
        self.write(batch)?;

        Ok(subscription)
    }

    fn get_subscription(&self, subscription_id: SubscriptionId) -> Result<Option<Subscription>> {
        let cf = self.cf(cf::SUBSCRIPTIONS)?;

        self.db
            .get_cf(&cf, keys::subscription_key(subscription_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_subscriptions_by_user(&self, user_id: UserId) -> Result<Vec<Subscription>> {
        let cf_by_user = self.cf(cf::SUBSCRIPTIONS_BY_USER)?;
        let prefix = keys::user_subscriptions_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf_by_user, IteratorMode::From(&prefix, Direction::Forward));

        let mut subscriptions = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let subscription_id = keys::extract_subscription_id_from_user_key(&key)?;
            if let Some(subscription) = self.get_subscription(subscription_id)? {
                subscriptions.push(subscription);
            }
        }

        Ok(subscriptions)
    }

    fn set_subscription_active(
        &self,
        subscription_id: SubscriptionId,
        active: bool,
    ) -> Result<Subscription> {
        let _session = self.writer()?;

        let mut subscription = self
            .get_subscription(subscription_id)?
            .ok_or_else(|| StoreError::subscription_not_found(subscription_id))?;
        subscription.set_active(active);

        let cf = self.cf(cf::SUBSCRIPTIONS)?;
        self.db
            .put_cf(
                &cf,
                keys::subscription_key(subscription_id),
                Self::serialize(&subscription)?,
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn assigns_sequential_user_ids() {
        let (store, _dir) = create_test_store();
        contract::assigns_sequential_user_ids(&store);
    }

    #[test]
    fn rejects_subscription_for_missing_user() {
        let (store, _dir) = create_test_store();
        contract::rejects_subscription_for_missing_user(&store);
    }

    #[test]
    fn rejects_duplicate_active_plan() {
        let (store, _dir) = create_test_store();
        contract::rejects_duplicate_active_plan(&store);
    }

    #[test]
    fn allows_plan_again_after_deactivation() {
        let (store, _dir) = create_test_store();
        contract::allows_plan_again_after_deactivation(&store);
    }

    #[test]
    fn lists_in_insertion_order_per_user() {
        let (store, _dir) = create_test_store();
        contract::lists_in_insertion_order_per_user(&store);
    }

    #[test]
    fn toggles_status_in_place() {
        let (store, _dir) = create_test_store();
        contract::toggles_status_in_place(&store);
    }

    #[test]
    fn reactivation_skips_uniqueness_check() {
        let (store, _dir) = create_test_store();
        contract::reactivation_skips_uniqueness_check(&store);
    }

    #[test]
    fn finds_by_predicate() {
        let (store, _dir) = create_test_store();
        contract::finds_by_predicate(&store);
    }

    #[test]
    fn concurrent_duplicates_yield_one_winner() {
        let (store, _dir) = create_test_store();
        contract::concurrent_duplicates_yield_one_winner(Arc::new(store));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = RocksStore::open(dir.path()).unwrap();
            let user = store.insert_user(&NewUser::new("alice@example.com")).unwrap();
            let sub = store
                .insert_subscription(&NewSubscription::new(user.id, "pro"))
                .unwrap();
            store.set_subscription_active(sub.id, false).unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        let sub = store.get_subscription(SubscriptionId::new(1)).unwrap().unwrap();
        assert!(!sub.active);

        // Sequences continue where they left off.
        let bob = store.insert_user(&NewUser::new("bob@example.com")).unwrap();
        assert_eq!(bob.id, UserId::new(2));
    }
}
