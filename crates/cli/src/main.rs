//! ShelfSense CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! shelfsense-cli migrate
//!
//! # Register a user's reminder address
//! shelfsense-cli user set-contact -u ankit.roy -e ankit@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user set-contact` - Register the contact address for reminder emails

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shelfsense-cli")]
#[command(author, version, about = "ShelfSense CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage pantry users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register or update a user's reminder email address
    SetContact {
        /// User id the pantry is stored under
        #[arg(short, long)]
        user_id: String,

        /// Contact email address for expiration reminders
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::SetContact { user_id, email } => {
                commands::users::set_contact(&user_id, &email).await?;
            }
        },
    }
    Ok(())
}
