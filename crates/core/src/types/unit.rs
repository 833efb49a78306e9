//! Measurement unit type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The sentinel unit substituted when input carries no explicit unit.
pub const DEFAULT_UNIT: &str = "count";

/// A free-form measurement unit ("lbs", "oz", "gallon", ...).
///
/// Units are not validated against a fixed list; the source application lets
/// users type anything. Empty input is replaced by the [`DEFAULT_UNIT`]
/// sentinel so every stored item carries a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    /// Build a `Unit` from raw input, trimming whitespace and substituting
    /// the default sentinel when nothing remains.
    #[must_use]
    pub fn from_raw(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// Returns the unit as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self(DEFAULT_UNIT.to_owned())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Unit {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
