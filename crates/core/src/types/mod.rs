//! Core types for ShelfSense.
//!
//! This module provides type-safe wrappers for the pantry domain concepts.

pub mod expiration;
pub mod food_name;
pub mod quantity;
pub mod unit;
pub mod user_id;

pub use expiration::{ExpirationDate, ExpirationDateError};
pub use food_name::{FoodName, FoodNameError};
pub use quantity::{Quantity, QuantityError};
pub use unit::{DEFAULT_UNIT, Unit};
pub use user_id::UserId;
