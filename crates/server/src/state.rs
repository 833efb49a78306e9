//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::email::ReminderMailer;
use crate::services::interpreter::TranscriptInterpreter;
use crate::services::recipes::RecipeClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources like the database pool and the optional collaborator clients.
/// A `None` client means that feature was not configured for this
/// deployment.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    interpreter: Option<TranscriptInterpreter>,
    recipes: Option<RecipeClient>,
    mailer: Option<ReminderMailer>,
}

impl AppState {
    /// Create a new application state, building collaborator clients from
    /// the configured optional groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(
        config: ServerConfig,
        pool: PgPool,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let interpreter = config.interpreter.as_ref().map(TranscriptInterpreter::new);
        let recipes = config.recipes.as_ref().map(RecipeClient::new);
        let mailer = config
            .email
            .as_ref()
            .map(ReminderMailer::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                interpreter,
                recipes,
                mailer,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the transcript interpreter client, if configured.
    #[must_use]
    pub fn interpreter(&self) -> Option<&TranscriptInterpreter> {
        self.inner.interpreter.as_ref()
    }

    /// Get the recipe search client, if configured.
    #[must_use]
    pub fn recipes(&self) -> Option<&RecipeClient> {
        self.inner.recipes.as_ref()
    }

    /// Get the reminder mailer, if configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&ReminderMailer> {
        self.inner.mailer.as_ref()
    }
}
