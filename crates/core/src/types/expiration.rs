//! Expiration date type.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format for expiration dates (`01/15/2024`), matching the source
/// application's `mm/dd/yyyy` convention.
const WIRE_FORMAT: &str = "%m/%d/%Y";

/// Accepted input formats, tried in order. The second covers the
/// `yyyy-mm-dd` strings produced by HTML date inputs on the edit path.
const INPUT_FORMATS: [&str; 2] = [WIRE_FORMAT, "%Y-%m-%d"];

/// Errors that can occur when parsing an [`ExpirationDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpirationDateError {
    /// The input is not a real calendar date.
    #[error("`{0}` is not a valid calendar date")]
    Unparseable(String),
}

/// A calendar expiration date with no time component.
///
/// Stored and compared as a plain date so that classification is immune to
/// time-of-day clock skew. Serializes as `mm/dd/yyyy`; parses that format
/// plus ISO `yyyy-mm-dd`. Impossible dates (Feb 30, month 13) are rejected.
///
/// ## Examples
///
/// ```
/// use shelfsense_core::ExpirationDate;
///
/// let date = ExpirationDate::parse("01/15/2024").unwrap();
/// assert_eq!(date.to_string(), "01/15/2024");
///
/// // HTML date inputs produce ISO dates
/// assert_eq!(ExpirationDate::parse("2024-01-15").unwrap(), date);
///
/// assert!(ExpirationDate::parse("13/40/2024").is_err());
/// assert!(ExpirationDate::parse("02/30/2024").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpirationDate(NaiveDate);

impl ExpirationDate {
    /// Parse an `ExpirationDate` from a `mm/dd/yyyy` or `yyyy-mm-dd` string.
    ///
    /// # Errors
    ///
    /// Returns [`ExpirationDateError::Unparseable`] if the input matches
    /// neither format or does not name a real calendar date.
    pub fn parse(s: &str) -> Result<Self, ExpirationDateError> {
        let trimmed = s.trim();
        INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .map(Self)
            .ok_or_else(|| ExpirationDateError::Unparseable(trimmed.to_owned()))
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ExpirationDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl std::str::FromStr for ExpirationDate {
    type Err = ExpirationDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ExpirationDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ExpirationDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_format() {
        let date = ExpirationDate::parse("01/15/2024").unwrap();
        assert_eq!(
            date.as_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_unpadded() {
        let date = ExpirationDate::parse("1/5/2024").unwrap();
        assert_eq!(date.as_date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_iso_format() {
        let wire = ExpirationDate::parse("01/15/2024").unwrap();
        let iso = ExpirationDate::parse("2024-01-15").unwrap();
        assert_eq!(wire, iso);
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(matches!(
            ExpirationDate::parse("13/40/2024"),
            Err(ExpirationDateError::Unparseable(_))
        ));
        assert!(matches!(
            ExpirationDate::parse("02/30/2024"),
            Err(ExpirationDateError::Unparseable(_))
        ));
        assert!(ExpirationDate::parse("not a date").is_err());
        assert!(ExpirationDate::parse("").is_err());
    }

    #[test]
    fn test_leap_day() {
        assert!(ExpirationDate::parse("02/29/2024").is_ok());
        assert!(ExpirationDate::parse("02/29/2023").is_err());
    }

    #[test]
    fn test_display_zero_pads() {
        let date = ExpirationDate::parse("1/5/2024").unwrap();
        assert_eq!(date.to_string(), "01/05/2024");
    }

    #[test]
    fn test_ordering() {
        let earlier = ExpirationDate::parse("01/09/2024").unwrap();
        let later = ExpirationDate::parse("01/12/2024").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serde_roundtrip() {
        let date = ExpirationDate::parse("01/15/2024").unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"01/15/2024\"");

        let parsed: ExpirationDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<ExpirationDate>("\"14/01/2024\"").is_err());
    }
}
