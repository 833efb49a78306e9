//! Database operations for the pantry `PostgreSQL` store.
//!
//! # Tables
//!
//! - `pantry_user` - User registry keyed by opaque user id; carries the
//!   contact address for reminder emails
//! - `pantry_item` - Pantry items, one row per entry; duplicates by name are
//!   permitted and the serial `id` preserves insertion order
//!
//! The pool is created once at startup and injected into every repository
//! call; nothing in this module holds global connection state.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shelfsense-cli -- migrate
//! ```

pub mod pantry;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use pantry::{AddOutcome, FailedItem, PantryRepository};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store could not complete the operation. Often
    /// transient; the caller may retry.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// The user key does not exist in the store (distinct from a user with
    /// an empty pantry).
    #[error("user `{0}` not found")]
    UserNotFound(String),

    /// No pantry item matched the requested name.
    #[error("no pantry item named `{name}` for user `{user}`")]
    ItemNotFound {
        /// The user whose pantry was searched.
        user: String,
        /// The name that failed to match.
        name: String,
    },

    /// A stored row no longer parses into domain types.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Retry policy for transient store failures during item persistence.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts before giving up (including the first).
    pub max_attempts: usize,
    /// Backoff grows linearly: `base_backoff_ms * attempt`.
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 120,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::UserNotFound("ankit.roy".to_string());
        assert_eq!(err.to_string(), "user `ankit.roy` not found");

        let err = StoreError::ItemNotFound {
            user: "ankit.roy".to_string(),
            name: "kale".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no pantry item named `kale` for user `ankit.roy`"
        );
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_backoff_ms, 120);
    }
}
