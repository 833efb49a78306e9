//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shelfsense-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SHELFSENSE_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! Migration files live in `crates/server/migrations/` and are embedded into
//! the binary at compile time.

use sqlx::PgPool;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run pantry database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SHELFSENSE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("SHELFSENSE_DATABASE_URL"))?;

    tracing::info!("Connecting to pantry database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running pantry migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Pantry migrations complete!");
    Ok(())
}
