//! User management commands.
//!
//! The reminder sweep only emails users with a registered contact address;
//! this is where that address gets registered.

use shelfsense_core::UserId;
use shelfsense_server::config::ServerConfig;
use shelfsense_server::db::{self, PantryRepository, StoreError};

/// Errors that can occur while managing users.
#[derive(Debug, thiserror::Error)]
pub enum UserCommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] shelfsense_server::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid user id: must not be empty")]
    EmptyUserId,
}

/// Register or update the contact address a user's reminders go to.
///
/// # Errors
///
/// Returns an error for an empty user id, an implausible email address, or
/// a store failure.
pub async fn set_contact(user_id: &str, email: &str) -> Result<(), UserCommandError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(UserCommandError::EmptyUserId);
    }

    let email = email.trim();
    if !is_valid_email(email) {
        return Err(UserCommandError::InvalidEmail(email.to_owned()));
    }

    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let repo = PantryRepository::new(&pool);
    let user = UserId::new(user_id);
    repo.set_contact(&user, email).await?;

    tracing::info!(user = %user, email, "Contact address registered");
    Ok(())
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    // Simple validation: contains @, has content before and after @
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@domain")); // no TLD
        assert!(!is_valid_email("test"));
    }
}
