//! Pantry repository for database operations.
//!
//! Owns the contract for add, remove, list, and edit against a per-user
//! pantry collection. Queries use the sqlx runtime API with explicit row
//! types converted into domain types, so a stored row that no longer parses
//! surfaces as `DataCorruption` instead of leaking raw strings.
//!
//! Name matching for removal and edit is case-insensitive. Removal affects
//! every match; edit rewrites only the earliest-inserted match.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{instrument, warn};

use shelfsense_core::{ExpirationDate, FoodName, PantryItem, Quantity, Unit, UserId};

use super::{RetryPolicy, StoreError};

/// Internal row type for pantry item queries.
#[derive(Debug, sqlx::FromRow)]
struct PantryItemRow {
    food_item: String,
    quantity: Decimal,
    unit: String,
    expiration_date: NaiveDate,
}

impl TryFrom<PantryItemRow> for PantryItem {
    type Error = StoreError;

    fn try_from(row: PantryItemRow) -> Result<Self, Self::Error> {
        let food_item = FoodName::parse(&row.food_item).map_err(|e| {
            StoreError::DataCorruption(format!("invalid food name in database: {e}"))
        })?;
        let quantity = Quantity::from_decimal(row.quantity).map_err(|e| {
            StoreError::DataCorruption(format!("invalid quantity in database: {e}"))
        })?;

        Ok(Self {
            food_item,
            quantity,
            unit: Unit::from_raw(&row.unit),
            expiration_date: ExpirationDate::from(row.expiration_date),
        })
    }
}

/// Outcome of a batch append: how many items landed plus the items that did
/// not, each with its own error. Item persistence is independent; one
/// failure never rolls back siblings.
#[derive(Debug, Default)]
pub struct AddOutcome {
    /// Number of items successfully appended.
    pub inserted: usize,
    /// Items that failed to persist after retries.
    pub failed: Vec<FailedItem>,
}

/// A single item that failed to persist.
#[derive(Debug)]
pub struct FailedItem {
    /// The item that was not stored.
    pub item: PantryItem,
    /// Why persistence failed.
    pub error: StoreError,
}

/// Repository for pantry database operations.
pub struct PantryRepository<'a> {
    pool: &'a PgPool,
    retry: RetryPolicy,
}

impl<'a> PantryRepository<'a> {
    /// Create a new pantry repository with the default retry policy.
    #[must_use]
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a repository with a custom retry policy.
    #[must_use]
    pub const fn with_retry_policy(pool: &'a PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    /// Append items to a user's pantry, creating the user's pantry on first
    /// write if absent.
    ///
    /// Items are persisted independently and in input order; a failure on
    /// one item is recorded in the outcome and the batch continues. An empty
    /// batch is a successful no-op. Transient store errors are retried with
    /// bounded linear backoff before an item is reported failed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` only when the user row itself
    /// cannot be written; per-item failures are reported in the outcome.
    #[instrument(skip(self, items), fields(user = %user, count = items.len()))]
    pub async fn add_items(
        &self,
        user: &UserId,
        items: &[PantryItem],
    ) -> Result<AddOutcome, StoreError> {
        if items.is_empty() {
            return Ok(AddOutcome::default());
        }

        self.ensure_user(user).await?;

        let mut outcome = AddOutcome::default();
        for item in items {
            match self.insert_item_with_retry(user, item).await {
                Ok(()) => outcome.inserted += 1,
                Err(error) => {
                    warn!(
                        user = %user,
                        food_item = %item.food_item,
                        error = %error,
                        "failed to persist pantry item"
                    );
                    outcome.failed.push(FailedItem {
                        item: item.clone(),
                        error,
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Remove every item matching the name, case-insensitively.
    ///
    /// Returns the number of removed items; zero matches is success, not an
    /// error - removal is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the query fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn remove_item(&self, user: &UserId, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r"
            DELETE FROM pantry_item
            WHERE user_id = $1 AND LOWER(food_item) = LOWER($2)
            ",
        )
        .bind(user.as_str())
        .bind(name.trim())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List a user's full pantry, soonest-expiring first (stable: items
    /// sharing a date keep insertion order).
    ///
    /// A known user with no items yields an empty vec; this never fails
    /// solely because the pantry is empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if the user key does not exist,
    /// `StoreError::DataCorruption` if a stored row is invalid, and
    /// `StoreError::Unavailable` if the query fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn list_pantry(&self, user: &UserId) -> Result<Vec<PantryItem>, StoreError> {
        if !self.user_exists(user).await? {
            return Err(StoreError::UserNotFound(user.to_string()));
        }

        let rows: Vec<PantryItemRow> = sqlx::query_as(
            r"
            SELECT food_item, quantity, unit, expiration_date
            FROM pantry_item
            WHERE user_id = $1
            ORDER BY expiration_date ASC, id ASC
            ",
        )
        .bind(user.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PantryItem::try_from).collect()
    }

    /// Replace the fields of the earliest-inserted item matching the name,
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if the user key does not exist,
    /// `StoreError::ItemNotFound` if no item matches, and
    /// `StoreError::Unavailable` if the query fails.
    #[instrument(skip(self, updated), fields(user = %user))]
    pub async fn edit_item(
        &self,
        user: &UserId,
        name: &str,
        updated: &PantryItem,
    ) -> Result<(), StoreError> {
        if !self.user_exists(user).await? {
            return Err(StoreError::UserNotFound(user.to_string()));
        }

        let result = sqlx::query(
            r"
            UPDATE pantry_item
            SET food_item = $3, quantity = $4, unit = $5, expiration_date = $6
            WHERE id = (
                SELECT id FROM pantry_item
                WHERE user_id = $1 AND LOWER(food_item) = LOWER($2)
                ORDER BY id ASC
                LIMIT 1
            )
            ",
        )
        .bind(user.as_str())
        .bind(name.trim())
        .bind(updated.food_item.as_str())
        .bind(updated.quantity.as_decimal())
        .bind(updated.unit.as_str())
        .bind(updated.expiration_date.as_date())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ItemNotFound {
                user: user.to_string(),
                name: name.trim().to_owned(),
            });
        }

        Ok(())
    }

    /// Register or update a user's contact address for reminder emails,
    /// creating the user row if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the query fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn set_contact(&self, user: &UserId, email: &str) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO pantry_user (user_id, contact_email)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET contact_email = EXCLUDED.contact_email
            ",
        )
        .bind(user.as_str())
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List every user with a registered contact address (sweep input).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the query fails.
    pub async fn users_with_contact(&self) -> Result<Vec<(UserId, String)>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r"
            SELECT user_id, contact_email
            FROM pantry_user
            WHERE contact_email IS NOT NULL
            ORDER BY user_id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user, email)| (UserId::new(user), email))
            .collect())
    }

    /// Check whether a user key exists in the store.
    async fn user_exists(&self, user: &UserId) -> Result<bool, StoreError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM pantry_user WHERE user_id = $1")
            .bind(user.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Create the user row if it does not exist yet (first-write
    /// auto-vivification).
    async fn ensure_user(&self, user: &UserId) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO pantry_user (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user.as_str())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Persist a single item, retrying transient failures with linear
    /// backoff.
    async fn insert_item_with_retry(
        &self,
        user: &UserId,
        item: &PantryItem,
    ) -> Result<(), StoreError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.insert_item(user, item).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retry.max_attempts && is_transient(&e) => {
                    warn!(
                        user = %user,
                        food_item = %item.food_item,
                        attempt,
                        error = %e,
                        "transient store error, retrying"
                    );
                }
                Err(e) => return Err(StoreError::Unavailable(e)),
            }
            tokio::time::sleep(std::time::Duration::from_millis(
                self.retry.base_backoff_ms.saturating_mul(attempt as u64),
            ))
            .await;
        }
    }

    async fn insert_item(&self, user: &UserId, item: &PantryItem) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            INSERT INTO pantry_item (user_id, food_item, quantity, unit, expiration_date)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.as_str())
        .bind(item.food_item.as_str())
        .bind(item.quantity.as_decimal())
        .bind(item.unit.as_str())
        .bind(item.expiration_date.as_date())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// Whether a sqlx error is worth retrying.
fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}
