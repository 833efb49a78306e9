//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHELFSENSE_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! ## Optional
//! - `SHELFSENSE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHELFSENSE_PORT` - Listen port (default: 3000)
//! - `SWEEP_INTERVAL_HOURS` - Hours between expiration sweeps (default: 24)
//!
//! ## Optional (SMTP - enables expiration reminder emails)
//! - `SMTP_HOST` - SMTP server hostname
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SMTP_USERNAME` - SMTP authentication username
//! - `SMTP_PASSWORD` - SMTP authentication password
//! - `SMTP_FROM` - Email sender address
//!
//! ## Optional (interpreter - enables the voice transcript endpoint)
//! - `ANTHROPIC_API_KEY` - Anthropic API key
//! - `INTERPRETER_MODEL` - Model ID (default: claude-sonnet-4-20250514)
//!
//! ## Optional (recipes - enables the recipe lookup endpoint)
//! - `SPOONACULAR_API_KEY` - Spoonacular API key
//!
//! An absent optional group disables the corresponding feature at startup
//! rather than failing; a partially-set group is a configuration error.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_INTERPRETER_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Hours between expiration sweep runs
    pub sweep_interval_hours: u64,
    /// SMTP configuration (optional - enables reminder emails)
    pub email: Option<EmailConfig>,
    /// Transcript interpreter configuration (optional - enables `/interpret-voice`)
    pub interpreter: Option<InterpreterConfig>,
    /// Recipe search configuration (optional - enables `/recipes`)
    pub recipes: Option<RecipeConfig>,
}

/// Email (SMTP) configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Email sender address (From header)
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Transcript interpreter (language model) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct InterpreterConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model ID
    pub model: String,
}

impl std::fmt::Debug for InterpreterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterpreterConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Recipe search (Spoonacular) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct RecipeConfig {
    /// Spoonacular API key
    pub api_key: SecretString,
}

impl std::fmt::Debug for RecipeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if an optional group is only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SHELFSENSE_DATABASE_URL")?;
        let host = get_env_or_default("SHELFSENSE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHELFSENSE_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("SHELFSENSE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHELFSENSE_PORT".to_string(), e.to_string())
            })?;
        let sweep_interval_hours = get_env_or_default("SWEEP_INTERVAL_HOURS", "24")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SWEEP_INTERVAL_HOURS".to_string(), e.to_string())
            })?;

        let email = EmailConfig::from_env()?;
        let interpreter = InterpreterConfig::from_env();
        let recipes = RecipeConfig::from_env();

        Ok(Self {
            database_url,
            host,
            port,
            sweep_interval_hours,
            email,
            interpreter,
            recipes,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    /// Load SMTP configuration from environment.
    ///
    /// Returns `None` when `SMTP_HOST` is not set (reminder emails
    /// disabled); the remaining SMTP variables are then required.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(smtp_host) = get_optional_env("SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_port = get_env_or_default("SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            smtp_username: get_required_env("SMTP_USERNAME")?,
            smtp_password: SecretString::from(get_required_env("SMTP_PASSWORD")?),
            from_address: get_required_env("SMTP_FROM")?,
        }))
    }
}

impl InterpreterConfig {
    /// Load interpreter configuration from environment.
    ///
    /// Returns `None` if `ANTHROPIC_API_KEY` is not set (voice
    /// interpretation disabled).
    fn from_env() -> Option<Self> {
        get_optional_env("ANTHROPIC_API_KEY").map(|key| Self {
            api_key: SecretString::from(key),
            model: get_env_or_default("INTERPRETER_MODEL", DEFAULT_INTERPRETER_MODEL),
        })
    }
}

impl RecipeConfig {
    /// Load recipe search configuration from environment.
    ///
    /// Returns `None` if `SPOONACULAR_API_KEY` is not set (recipe lookup
    /// disabled).
    fn from_env() -> Option<Self> {
        get_optional_env("SPOONACULAR_API_KEY").map(|key| Self {
            api_key: SecretString::from(key),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
