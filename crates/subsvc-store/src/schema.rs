//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage. All of
//! them are created when the database is opened.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User records, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Subscription records, keyed by `subscription_id`.
    pub const SUBSCRIPTIONS: &str = "subscriptions";

    /// Index: subscriptions by user, keyed by `user_id || subscription_id`.
    /// Value is empty (index only).
    pub const SUBSCRIPTIONS_BY_USER: &str = "subscriptions_by_user";

    /// Identifier sequences, keyed by sequence name.
    pub const META: &str = "meta";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::SUBSCRIPTIONS,
        cf::SUBSCRIPTIONS_BY_USER,
        cf::META,
    ]
}
