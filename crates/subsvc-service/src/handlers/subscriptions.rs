//! Subscription handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use subsvc_core::{Subscription, SubscriptionId, UserId};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Subscription response.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Subscribing user.
    pub user_id: UserId,
    /// Plan name.
    pub plan: String,
    /// Whether the subscription is active.
    pub active: bool,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            plan: subscription.plan,
            active: subscription.active,
        }
    }
}

/// Create subscription request.
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Subscribing user.
    pub user_id: UserId,
    /// Plan name (free-form).
    pub plan: String,
}

/// Query parameters for a status update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusQuery {
    /// Target status. Omitting it means "activate".
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Subscribe a user to a plan.
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateSubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = state
        .subscriptions
        .create_subscription(body.user_id, body.plan)?;

    Ok(Json(subscription.into()))
}

/// List every subscription of a user in creation order.
pub async fn list_user_subscriptions(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Vec<SubscriptionResponse>>, ApiError> {
    let subscriptions = state.subscriptions.list_user_subscriptions(user_id)?;

    Ok(Json(subscriptions.into_iter().map(Into::into).collect()))
}

/// Activate or deactivate a subscription.
pub async fn update_subscription_status(
    State(state): State<Arc<AppState>>,
    ApiPath(subscription_id): ApiPath<SubscriptionId>,
    ApiQuery(query): ApiQuery<UpdateStatusQuery>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = state
        .subscriptions
        .update_subscription_status(subscription_id, query.active)?;

    Ok(Json(subscription.into()))
}
