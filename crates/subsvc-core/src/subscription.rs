//! Subscription records and the lifecycle state they carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{SubscriptionId, UserId};

/// A user's subscription to a plan.
///
/// A subscription starts active. The only transition is an explicit status
/// update, which may move it in either direction. Subscriptions are never
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Store-assigned identifier.
    pub id: SubscriptionId,

    /// The subscribing user.
    pub user_id: UserId,

    /// Free-form plan name (e.g. "pro", "enterprise").
    pub plan: String,

    /// Whether the subscription is currently active.
    pub active: bool,

    /// When the subscription was created.
    pub created_at: DateTime<Utc>,

    /// When the status was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SubscriptionStatus {
        if self.active {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::Inactive
        }
    }

    /// Set the active flag and bump `updated_at`.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }
}

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Counts against the uniqueness rule.
    Active,
    /// Cancelled or paused; may be reactivated.
    Inactive,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

/// Input for creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
    /// The subscribing user.
    pub user_id: UserId,
    /// Plan name.
    pub plan: String,
}

impl NewSubscription {
    /// Create subscription input.
    #[must_use]
    pub fn new(user_id: UserId, plan: impl Into<String>) -> Self {
        Self {
            user_id,
            plan: plan.into(),
        }
    }

    /// Materialize an active record once the store has assigned an id.
    #[must_use]
    pub fn into_subscription(self, id: SubscriptionId) -> Subscription {
        let now = Utc::now();
        Subscription {
            id,
            user_id: self.user_id,
            plan: self.plan,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Predicate for filtered subscription lookups.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    /// Match only this plan.
    pub plan: Option<String>,
    /// Match only this active flag.
    pub active: Option<bool>,
}

impl SubscriptionFilter {
    /// Filter for the active subscription of a plan.
    #[must_use]
    pub fn active_plan(plan: impl Into<String>) -> Self {
        Self {
            plan: Some(plan.into()),
            active: Some(true),
        }
    }

    /// Check whether a subscription satisfies the filter.
    #[must_use]
    pub fn matches(&self, subscription: &Subscription) -> bool {
        self.plan
            .as_deref()
            .map_or(true, |plan| subscription.plan == plan)
            && self.active.map_or(true, |active| subscription.active == active)
    }
}
