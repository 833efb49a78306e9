//! The canonical pantry item record and input normalization.
//!
//! All entry paths (the structured form and the voice-transcript extractor)
//! funnel heterogeneous input through [`PantryItem::normalize`], the only
//! place allowed to substitute defaults. Nothing unnormalized reaches the
//! pantry store.

use serde::{Deserialize, Serialize};

use crate::types::{
    ExpirationDate, ExpirationDateError, FoodName, FoodNameError, Quantity, QuantityError, Unit,
};

/// Normalization failures, always caller-correctable.
///
/// These are detected before anything touches the store and surfaced to the
/// original caller; they are never retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The food item name is empty after trimming.
    #[error(transparent)]
    EmptyName(#[from] FoodNameError),

    /// The quantity is not a non-negative number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// The expiration date is not a real calendar date.
    #[error("invalid expiration date: {0}")]
    InvalidDate(#[from] ExpirationDateError),
}

/// A quantity as it arrives on the wire: a JSON number from the
/// voice-transcript path or a numeric string from the form path.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    /// JSON number.
    Number(f64),
    /// Numeric string.
    Text(String),
}

impl QuantityInput {
    fn normalize(&self) -> Result<Quantity, QuantityError> {
        match self {
            Self::Number(n) => Quantity::from_number(*n),
            Self::Text(s) => Quantity::parse(s),
        }
    }
}

impl From<f64> for QuantityInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for QuantityInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// A raw item as submitted by a caller, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItemInput {
    /// Display name, may carry surrounding whitespace.
    pub food_item: String,
    /// Number-like quantity.
    pub quantity: QuantityInput,
    /// Free-form unit; empty means "use the default sentinel".
    pub unit: String,
    /// `mm/dd/yyyy` or `yyyy-mm-dd` date string.
    pub expiration_date: String,
}

/// The canonical unit of pantry storage.
///
/// Every persisted item has all four fields populated; see
/// [`PantryItem::normalize`] for how defaults are filled. Wire names follow
/// the source application's JSON contract (`foodItem`, `expirationDate`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    /// Display name, compared case-insensitively for removal/edit lookups.
    pub food_item: FoodName,
    /// Non-negative quantity.
    pub quantity: Quantity,
    /// Measurement unit, `"count"` when the input carried none.
    pub unit: Unit,
    /// Calendar expiration date.
    pub expiration_date: ExpirationDate,
}

impl PantryItem {
    /// Normalize raw input into a canonical pantry item.
    ///
    /// Pure and deterministic: identical input always produces an identical
    /// item. The only defaulting performed anywhere is the unit sentinel
    /// substitution here; a missing expiration date is not estimated (that
    /// is the upstream interpreter's job).
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::EmptyName`] for a blank name,
    /// [`NormalizeError::InvalidQuantity`] for non-numeric or negative
    /// quantities, and [`NormalizeError::InvalidDate`] for dates that do not
    /// exist on a calendar.
    pub fn normalize(raw: &RawItemInput) -> Result<Self, NormalizeError> {
        let food_item = FoodName::parse(&raw.food_item)?;
        let quantity = raw.quantity.normalize()?;
        let unit = Unit::from_raw(&raw.unit);
        let expiration_date = ExpirationDate::parse(&raw.expiration_date)?;

        Ok(Self {
            food_item,
            quantity,
            unit,
            expiration_date,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(food_item: &str, quantity: QuantityInput, unit: &str, date: &str) -> RawItemInput {
        RawItemInput {
            food_item: food_item.to_owned(),
            quantity,
            unit: unit.to_owned(),
            expiration_date: date.to_owned(),
        }
    }

    #[test]
    fn test_normalize_form_input() {
        let item =
            PantryItem::normalize(&raw(" milk ", "2".into(), " gallon ", "01/15/2024")).unwrap();

        assert_eq!(item.food_item.as_str(), "milk");
        assert_eq!(item.quantity.to_string(), "2");
        assert_eq!(item.unit.as_str(), "gallon");
        assert_eq!(item.expiration_date.to_string(), "01/15/2024");
    }

    #[test]
    fn test_normalize_voice_input_defaults_unit() {
        let item = PantryItem::normalize(&raw("milk", 1.0.into(), "", "01/15/2024")).unwrap();
        assert_eq!(item.unit.as_str(), "count");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let input = raw("eggs", 12.0.into(), "", "03/01/2024");
        let a = PantryItem::normalize(&input).unwrap();
        let b = PantryItem::normalize(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_empty_name() {
        let err = PantryItem::normalize(&raw("   ", "1".into(), "", "01/15/2024")).unwrap_err();
        assert!(matches!(err, NormalizeError::EmptyName(_)));
    }

    #[test]
    fn test_normalize_bad_quantity() {
        let err =
            PantryItem::normalize(&raw("milk", "several".into(), "", "01/15/2024")).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidQuantity(_)));

        let err = PantryItem::normalize(&raw("milk", "-1".into(), "", "01/15/2024")).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidQuantity(_)));
    }

    #[test]
    fn test_normalize_bad_date() {
        let err = PantryItem::normalize(&raw("milk", "1".into(), "", "13/40/2024")).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDate(_)));
    }

    #[test]
    fn test_wire_field_names() {
        let item = PantryItem::normalize(&raw("milk", "1".into(), "", "01/15/2024")).unwrap();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["foodItem"], "milk");
        assert_eq!(json["unit"], "count");
        assert_eq!(json["expirationDate"], "01/15/2024");
    }

    #[test]
    fn test_serde_roundtrip() {
        let item = PantryItem::normalize(&raw("milk", "1.5".into(), "qt", "01/15/2024")).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let parsed: PantryItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
