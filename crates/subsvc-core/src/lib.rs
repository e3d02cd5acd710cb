//! Core types and utilities for subsvc.
//!
//! This crate provides the foundational types shared by the store, the HTTP
//! service and the client SDK:
//!
//! - **Identifiers**: `UserId`, `SubscriptionId`
//! - **Users**: `User`, `NewUser`
//! - **Subscriptions**: `Subscription`, `NewSubscription`, `SubscriptionFilter`
//! - **Errors**: `SubscriptionError`
//!
//! # Uniqueness rule
//!
//! For any `(user_id, plan)` pair at most one subscription may be active at a
//! time. The rule applies only to active records; inactive history is kept
//! forever.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod subscription;
pub mod user;

pub use error::{Result, SubscriptionError};
pub use ids::{IdError, SubscriptionId, UserId};
pub use subscription::{NewSubscription, Subscription, SubscriptionFilter, SubscriptionStatus};
pub use user::{NewUser, User};
