//! ShelfSense Core - Pantry domain library.
//!
//! This crate provides the domain types and pure logic shared by all
//! ShelfSense components:
//! - `server` - HTTP API, pantry store, and scheduled reminder sweep
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Everything that touches a wall clock
//! takes the current date as an argument, which keeps classification and
//! sweep logic deterministic and testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user ids, food names, quantities,
//!   units, and expiration dates
//! - [`item`] - The canonical [`PantryItem`] record and input normalization
//! - [`extract`] - Validation boundary for voice-transcript candidates
//! - [`classify`] - Expiration urgency classification
//! - [`sweep`] - Pantry partitioning for reminder notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod classify;
pub mod extract;
pub mod item;
pub mod sweep;
pub mod types;

pub use classify::{Classification, ExpirationStatus, classify, sort_soonest_first};
pub use extract::{DroppedCandidate, Extraction, ExtractionError, validate_candidates};
pub use item::{NormalizeError, PantryItem, QuantityInput, RawItemInput};
pub use sweep::{SweepEntry, SweepReport, sweep_report};
pub use types::*;
