//! Subscription service client SDK.
//!
//! This crate provides a client library for services that manage users and
//! subscriptions through the subsvc HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use subsvc_client::{ClientError, SubscriptionClient};
//!
//! # async fn example() -> Result<(), ClientError> {
//! let client = SubscriptionClient::new("http://subsvc.internal:8080")?;
//!
//! let user = client.create_user("alice@example.com").await?;
//! let pro = client.create_subscription(user.id, "pro").await?;
//!
//! match client.create_subscription(user.id, "pro").await {
//!     Err(ClientError::DuplicateActiveSubscription { .. }) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//!
//! client.update_subscription_status(pro.id, false).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, SubscriptionClient};
pub use error::ClientError;
pub use types::*;
