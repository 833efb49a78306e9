//! Food item display name.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`FoodName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodNameError {
    /// The input string is empty after trimming.
    #[error("food item name cannot be empty")]
    Empty,
}

/// A food item's display name.
///
/// The name is case-preserving for display ("Whole Milk" stays "Whole Milk")
/// but removal and edit lookups compare names case-insensitively, so
/// `matches("whole milk")` is true for that item. Duplicate names are allowed
/// within a pantry; they are distinct entries and are never merged.
///
/// ## Constraints
///
/// - Leading and trailing whitespace is trimmed
/// - Must be non-empty after trimming
///
/// ## Examples
///
/// ```
/// use shelfsense_core::FoodName;
///
/// let name = FoodName::parse("  Whole Milk ").unwrap();
/// assert_eq!(name.as_str(), "Whole Milk");
/// assert!(name.matches("whole milk"));
///
/// assert!(FoodName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FoodName(String);

impl FoodName {
    /// Parse a `FoodName` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`FoodNameError::Empty`] if the input is empty after trimming.
    pub fn parse(s: &str) -> Result<Self, FoodNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FoodNameError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `FoodName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Case-insensitive name comparison used for removal and edit lookups.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for FoodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FoodName {
    type Err = FoodNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FoodName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
