//! Subscription management HTTP API service.
//!
//! This crate provides the HTTP API for subsvc, including:
//!
//! - User registration
//! - Subscription creation with the one-active-plan-per-user rule
//! - Listing a user's subscriptions
//! - Activating and deactivating subscriptions
//!
//! The validation and lifecycle logic lives in [`SubscriptionService`]; the
//! handlers only translate between HTTP and service calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers call the synchronous store

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod subscriptions;

pub use config::{ServiceConfig, StorageBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use subscriptions::SubscriptionService;
