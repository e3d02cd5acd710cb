//! Subscription lifecycle and validation.
//!
//! Every operation runs to completion against the shared store before it
//! returns. The duplicate-active check is delegated to
//! [`Store::insert_subscription`], which performs it atomically with the write.

use std::sync::Arc;

use subsvc_core::{
    NewSubscription, NewUser, Result, Subscription, SubscriptionError, SubscriptionId, User,
    UserId,
};
use subsvc_store::Store;

/// The four operations of the subscription service.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn Store>,
}

impl SubscriptionService {
    /// Create a service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a user. The email is stored as given.
    pub fn create_user(&self, email: impl Into<String>) -> Result<User> {
        let user = self.store.insert_user(&NewUser::new(email))?;

        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    /// Subscribe a user to a plan.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist (checked first).
    /// - `DuplicateActiveSubscription` if the user already has this plan active.
    pub fn create_subscription(
        &self,
        user_id: UserId,
        plan: impl Into<String>,
    ) -> Result<Subscription> {
        self.require_user(user_id)?;

        let plan: String = plan.into();
        let subscription = self
            .store
            .insert_subscription(&NewSubscription::new(user_id, plan.clone()))
            .map_err(|e| {
                let err = SubscriptionError::from(e);
                if err.is_conflict() {
                    tracing::warn!(user_id = %user_id, plan = %plan, "Duplicate active subscription");
                }
                err
            })?;

        tracing::info!(
            user_id = %user_id,
            subscription_id = %subscription.id,
            plan = %subscription.plan,
            "Subscription created"
        );

        Ok(subscription)
    }

    /// All subscriptions of a user, active or not, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user doesn't exist.
    pub fn list_user_subscriptions(&self, user_id: UserId) -> Result<Vec<Subscription>> {
        self.require_user(user_id)?;

        let subscriptions = self.store.list_subscriptions_by_user(user_id)?;

        tracing::debug!(user_id = %user_id, count = subscriptions.len(), "Listed subscriptions");

        Ok(subscriptions)
    }

    /// Activate or deactivate a subscription.
    ///
    /// Reactivating does not re-check the one-active-plan rule, so it can leave
    /// a user with two active subscriptions for the same plan.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionNotFound` if the subscription doesn't exist.
    pub fn update_subscription_status(
        &self,
        subscription_id: SubscriptionId,
        active: bool,
    ) -> Result<Subscription> {
        let subscription = self
            .store
            .set_subscription_active(subscription_id, active)?;

        tracing::info!(
            subscription_id = %subscription.id,
            status = %subscription.status(),
            "Subscription status updated"
        );

        Ok(subscription)
    }

    fn require_user(&self, user_id: UserId) -> Result<User> {
        self.store
            .get_user(user_id)?
            .ok_or(SubscriptionError::UserNotFound { user_id })
    }
}
