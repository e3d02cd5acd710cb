//! In-memory storage implementation.
//!
//! Nothing survives the process. Useful for tests and for running the service
//! without a data directory.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use subsvc_core::{
    NewSubscription, NewUser, Subscription, SubscriptionFilter, SubscriptionId, User, UserId,
};

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    last_user_id: u64,
    last_subscription_id: u64,
}

impl Tables {
    fn subscriptions_of(&self, user_id: UserId) -> impl Iterator<Item = &Subscription> {
        self.subscriptions
            .values()
            .filter(move |subscription| subscription.user_id == user_id)
    }
}

/// Map-backed storage implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session. The session ends when the guard is dropped.
    fn session(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn insert_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.session()?;

        tables.last_user_id += 1;
        let user = user.clone().into_user(UserId::new(tables.last_user_id));
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.session()?.users.get(&user_id).cloned())
    }

    fn insert_subscription(&self, subscription: &NewSubscription) -> Result<Subscription> {
        let mut tables = self.session()?;

        if !tables.users.contains_key(&subscription.user_id) {
            return Err(StoreError::user_not_found(subscription.user_id));
        }

        let active_plan = SubscriptionFilter::active_plan(subscription.plan.as_str());
        if tables
            .subscriptions_of(subscription.user_id)
            .any(|existing| active_plan.matches(existing))
        {
            return Err(StoreError::Conflict {
                user_id: subscription.user_id,
                plan: subscription.plan.clone(),
            });
        }

        tables.last_subscription_id += 1;
        let subscription = subscription
            .clone()
            .into_subscription(SubscriptionId::new(tables.last_subscription_id));
        tables
            .subscriptions
            .insert(subscription.id, subscription.clone());

        Ok(subscription)
    }

    fn get_subscription(&self, subscription_id: SubscriptionId) -> Result<Option<Subscription>> {
        Ok(self
            .session()?
            .subscriptions
            .get(&subscription_id)
            .cloned())
    }

    fn list_subscriptions_by_user(&self, user_id: UserId) -> Result<Vec<Subscription>> {
        Ok(self
            .session()?
            .subscriptions_of(user_id)
            .cloned()
            .collect())
    }

    fn set_subscription_active(
        &self,
        subscription_id: SubscriptionId,
        active: bool,
    ) -> Result<Subscription> {
        let mut tables = self.session()?;

        let subscription = tables
            .subscriptions
            .get_mut(&subscription_id)
            .ok_or_else(|| StoreError::subscription_not_found(subscription_id))?;
        subscription.set_active(active);

        Ok(subscription.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract;
    use std::sync::Arc;

    #[test]
    fn assigns_sequential_user_ids() {
        contract::assigns_sequential_user_ids(&MemoryStore::new());
    }

    #[test]
    fn rejects_subscription_for_missing_user() {
        contract::rejects_subscription_for_missing_user(&MemoryStore::new());
    }

    #[test]
    fn rejects_duplicate_active_plan() {
        contract::rejects_duplicate_active_plan(&MemoryStore::new());
    }

    #[test]
    fn allows_plan_again_after_deactivation() {
        contract::allows_plan_again_after_deactivation(&MemoryStore::new());
    }

    #[test]
    fn lists_in_insertion_order_per_user() {
        contract::lists_in_insertion_order_per_user(&MemoryStore::new());
    }

    #[test]
    fn toggles_status_in_place() {
        contract::toggles_status_in_place(&MemoryStore::new());
    }

    #[test]
    fn reactivation_skips_uniqueness_check() {
        contract::reactivation_skips_uniqueness_check(&MemoryStore::new());
    }

    #[test]
    fn finds_by_predicate() {
        contract::finds_by_predicate(&MemoryStore::new());
    }

    #[test]
    fn concurrent_duplicates_yield_one_winner() {
        contract::concurrent_duplicates_yield_one_winner(Arc::new(MemoryStore::new()));
    }
}
