//! Application state.

use std::sync::Arc;

use subsvc_store::Store;

use crate::config::ServiceConfig;
use crate::subscriptions::SubscriptionService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Subscription operations over the configured store.
    pub subscriptions: SubscriptionService,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self {
            subscriptions: SubscriptionService::new(store),
            config,
        }
    }
}
