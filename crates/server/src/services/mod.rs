//! Outbound collaborator clients.
//!
//! Everything here is thin I/O glue around the core: the transcript
//! interpreter and recipe search are external HTTP services, and the
//! reminder mailer is the SMTP leg of the expiration sweep.

pub mod email;
pub mod interpreter;
pub mod recipes;

pub use email::{EmailError, ReminderMailer, ReminderPayload};
pub use interpreter::{InterpreterError, TranscriptInterpreter};
pub use recipes::{Recipe, RecipeClient, RecipeError};
