//! Item quantity type.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is not a number.
    #[error("`{0}` is not a number")]
    NotANumber(String),
    /// The input is a negative number.
    #[error("quantity cannot be negative, got `{0}`")]
    Negative(String),
}

/// A non-negative item quantity.
///
/// Quantities arrive either as JSON numbers (voice-transcript candidates) or
/// as numeric strings (form input); both are accepted. Decimal quantities
/// like `0.5` are kept exact, so a stored item reads back with the same
/// quantity it was written with.
///
/// ## Examples
///
/// ```
/// use shelfsense_core::Quantity;
///
/// assert!(Quantity::parse("1.5").is_ok());
/// assert!(Quantity::parse("0").is_ok());
///
/// assert!(Quantity::parse("-2").is_err());
/// assert!(Quantity::parse("a dozen").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Parse a `Quantity` from a numeric string.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotANumber`] for non-numeric input and
    /// [`QuantityError::Negative`] for negative values.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let trimmed = s.trim();
        let value: Decimal = trimmed
            .parse()
            .map_err(|_| QuantityError::NotANumber(trimmed.to_owned()))?;
        Self::from_decimal(value)
    }

    /// Create a `Quantity` from a JSON number.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotANumber`] for values with no decimal
    /// representation (NaN, infinities) and [`QuantityError::Negative`] for
    /// negative values.
    pub fn from_number(n: f64) -> Result<Self, QuantityError> {
        let value = Decimal::try_from(n).map_err(|_| QuantityError::NotANumber(n.to_string()))?;
        Self::from_decimal(value)
    }

    /// Create a `Quantity` from an already-parsed decimal.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Negative`] for negative values.
    pub fn from_decimal(value: Decimal) -> Result<Self, QuantityError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(QuantityError::Negative(value.to_string()));
        }
        Ok(Self(value.normalize()))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let quantity = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from_number(n),
            Raw::Text(s) => Self::parse(&s),
        };
        quantity.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        let q = Quantity::parse("3").unwrap();
        assert_eq!(q.to_string(), "3");
    }

    #[test]
    fn test_parse_decimal() {
        let q = Quantity::parse("1.5").unwrap();
        assert_eq!(q.to_string(), "1.5");
    }

    #[test]
    fn test_parse_zero() {
        assert!(Quantity::parse("0").is_ok());
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(
            Quantity::parse("-2"),
            Err(QuantityError::Negative(_))
        ));
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(
            Quantity::parse("a dozen"),
            Err(QuantityError::NotANumber(_))
        ));
        assert!(matches!(
            Quantity::parse(""),
            Err(QuantityError::NotANumber(_))
        ));
    }

    #[test]
    fn test_from_number() {
        let q = Quantity::from_number(2.25).unwrap();
        assert_eq!(q.to_string(), "2.25");

        assert!(matches!(
            Quantity::from_number(-1.0),
            Err(QuantityError::Negative(_))
        ));
        assert!(matches!(
            Quantity::from_number(f64::NAN),
            Err(QuantityError::NotANumber(_))
        ));
    }

    #[test]
    fn test_deserialize_from_number_and_string() {
        let from_number: Quantity = serde_json::from_str("2").unwrap();
        let from_string: Quantity = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(from_number, from_string);

        assert!(serde_json::from_str::<Quantity>("\"-4\"").is_err());
        assert!(serde_json::from_str::<Quantity>("\"soon\"").is_err());
    }

    #[test]
    fn test_trailing_zeros_normalized() {
        let a = Quantity::parse("1.50").unwrap();
        let b = Quantity::parse("1.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "1.5");
    }
}
