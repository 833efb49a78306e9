//! Scheduled expiration sweep.
//!
//! Runs on a recurring interval, independent of request handling. Each run
//! reads a snapshot of every registered user's pantry, partitions it with
//! the core classifier, and sends one reminder email per user with anything
//! actionable. A failure for one user is logged and the run continues with
//! the next - a broken mailbox never aborts the whole schedule.
//!
//! Sweeps do not deduplicate across runs: an item that stays in the warning
//! window is re-notified on every pass.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, instrument};

use shelfsense_core::{UserId, sweep_report};

use crate::db::{PantryRepository, StoreError};
use crate::services::email::{EmailError, ReminderMailer};

/// Failures that can occur while sweeping a single user.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Reading the pantry snapshot failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Composing or sending the reminder failed.
    #[error(transparent)]
    Email(#[from] EmailError),
}

/// The recurring expiration sweep job.
pub struct SweepJob {
    pool: PgPool,
    mailer: ReminderMailer,
    period: Duration,
}

impl SweepJob {
    /// Create a sweep job.
    #[must_use]
    pub fn new(pool: PgPool, mailer: ReminderMailer, interval_hours: u64) -> Self {
        Self {
            pool,
            mailer,
            period: Duration::from_secs(interval_hours * 60 * 60),
        }
    }

    /// Run the sweep forever on the configured interval.
    ///
    /// The first sweep fires one full period after startup, not
    /// immediately.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval's first tick completes immediately; consume it so the
        // first real sweep happens a full period after startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.run_once(Utc::now().date_naive()).await;
        }
    }

    /// Run a single sweep pass over every user with a contact address.
    #[instrument(skip(self))]
    pub async fn run_once(&self, today: NaiveDate) {
        let repo = PantryRepository::new(&self.pool);

        let users = match repo.users_with_contact().await {
            Ok(users) => users,
            Err(e) => {
                error!(error = %e, "Sweep could not list users; skipping this run");
                return;
            }
        };

        info!(users = users.len(), %today, "Expiration sweep started");

        let mut notified = 0_usize;
        for (user, address) in users {
            match self.sweep_user(&repo, &user, &address, today).await {
                Ok(true) => notified += 1,
                Ok(false) => {}
                Err(e) => {
                    // Fault isolation: one user's failure never aborts the run
                    error!(user = %user, error = %e, "Sweep failed for user; continuing");
                }
            }
        }

        info!(notified, "Expiration sweep finished");
    }

    /// Sweep one user; returns whether a reminder was sent.
    async fn sweep_user(
        &self,
        repo: &PantryRepository<'_>,
        user: &UserId,
        address: &str,
        today: NaiveDate,
    ) -> Result<bool, SweepError> {
        let pantry = repo.list_pantry(user).await?;

        let Some(report) = sweep_report(&pantry, today) else {
            return Ok(false);
        };

        let payload = ReminderMailer::compose(address, user, &report)?;
        self.mailer.send(&payload).await?;

        info!(
            user = %user,
            expiring_soon = report.expiring_soon.len(),
            expired = report.expired.len(),
            "Reminder sent"
        );
        Ok(true)
    }
}
