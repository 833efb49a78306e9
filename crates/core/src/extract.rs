//! Validation boundary for voice-transcript item candidates.
//!
//! The transcript itself is interpreted by an external language-model
//! collaborator which is expected to answer with a JSON list of candidate
//! items. That output is untrusted: this module is the only place its shape
//! is checked before candidates are normalized into [`PantryItem`]s.
//!
//! Failure policy: a payload that is not a list, or a candidate missing a
//! required field, fails the whole batch with [`ExtractionError`]. A
//! candidate that is structurally sound but does not normalize (bad date,
//! negative quantity) is dropped individually so one bad entry does not
//! block the rest of a multi-item transcript.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::item::{PantryItem, QuantityInput, RawItemInput};

/// Field names every candidate object must carry.
const REQUIRED_FIELDS: [&str; 4] = ["foodItem", "quantity", "unit", "expirationDate"];

/// The upstream interpretation produced an unusable shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The payload is not a list, or a candidate is structurally invalid.
    #[error("malformed extraction: {0}")]
    MalformedExtraction(String),
}

/// A candidate that survived structural validation but failed normalization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DroppedCandidate {
    /// Position in the candidate list.
    pub index: usize,
    /// The candidate's name, when one was present.
    pub food_item: Option<String>,
    /// Human-readable reason the candidate was dropped.
    pub reason: String,
}

/// The outcome of validating a candidate list: accepted items plus the
/// candidates dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Candidates that normalized cleanly, in input order.
    pub items: Vec<PantryItem>,
    /// Candidates dropped with a recorded reason.
    pub dropped: Vec<DroppedCandidate>,
}

impl Extraction {
    /// True when nothing was accepted or dropped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.dropped.is_empty()
    }
}

/// Validate a candidate list produced by the transcript interpreter.
///
/// An empty list is a valid, empty extraction - not an error.
///
/// # Errors
///
/// Returns [`ExtractionError::MalformedExtraction`] when the payload is not
/// a list, a candidate is not an object, or a candidate is missing one of
/// the required fields (`foodItem`, `quantity`, `unit`, `expirationDate`).
pub fn validate_candidates(candidates: &Value) -> Result<Extraction, ExtractionError> {
    let list = candidates.as_array().ok_or_else(|| {
        ExtractionError::MalformedExtraction("expected a list of candidate items".to_owned())
    })?;

    let mut extraction = Extraction {
        items: Vec::with_capacity(list.len()),
        dropped: Vec::new(),
    };

    for (index, candidate) in list.iter().enumerate() {
        let object = candidate.as_object().ok_or_else(|| {
            ExtractionError::MalformedExtraction(format!("candidate {index} is not an object"))
        })?;

        for field in REQUIRED_FIELDS {
            if !object.contains_key(field) {
                return Err(ExtractionError::MalformedExtraction(format!(
                    "candidate {index} is missing required field `{field}`"
                )));
            }
        }

        let outcome = build_raw(object).and_then(|raw| {
            PantryItem::normalize(&raw).map_err(|e| e.to_string())
        });

        match outcome {
            Ok(item) => extraction.items.push(item),
            Err(reason) => extraction.dropped.push(DroppedCandidate {
                index,
                food_item: candidate_name(object),
                reason,
            }),
        }
    }

    Ok(extraction)
}

/// Convert a candidate object into raw input, or a drop reason when a field
/// is present but of an unusable type.
fn build_raw(object: &Map<String, Value>) -> Result<RawItemInput, String> {
    let food_item = string_field(object, "foodItem")?;
    let unit = string_field(object, "unit")?;
    let expiration_date = string_field(object, "expirationDate")?;

    let quantity = match object.get("quantity") {
        Some(Value::Number(n)) => {
            let n = n
                .as_f64()
                .ok_or_else(|| "field `quantity` is out of range".to_owned())?;
            QuantityInput::Number(n)
        }
        Some(Value::String(s)) => QuantityInput::Text(s.clone()),
        _ => return Err("field `quantity` is not a number or string".to_owned()),
    };

    Ok(RawItemInput {
        food_item,
        quantity,
        unit,
        expiration_date,
    })
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| format!("field `{field}` is not a string"))
}

fn candidate_name(object: &Map<String, Value>) -> Option<String> {
    object
        .get("foodItem")
        .and_then(Value::as_str)
        .map(str::to_owned)
}
