//! Pantry partitioning for the scheduled reminder sweep.
//!
//! The sweep reads a snapshot of a user's pantry, buckets every item by the
//! classifier, and reports the two actionable buckets. Composing and sending
//! the actual notification is the server's job; this module only decides
//! whether there is anything to say. Repeated sweeps over an unchanged
//! pantry produce the same report each time - there is no notification
//! deduplication across runs.

use chrono::NaiveDate;

use crate::classify::{ExpirationStatus, classify};
use crate::item::PantryItem;
use crate::types::{ExpirationDate, FoodName};

/// One line of a reminder: the item, its date, and how far off expiry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepEntry {
    /// Item display name.
    pub food_item: FoodName,
    /// The item's expiration date.
    pub expiration_date: ExpirationDate,
    /// Signed whole days until expiration (negative = already expired).
    pub days_offset: i64,
}

impl SweepEntry {
    fn from_item(item: &PantryItem, days_offset: i64) -> Self {
        Self {
            food_item: item.food_item.clone(),
            expiration_date: item.expiration_date,
            days_offset,
        }
    }
}

/// The actionable portion of a pantry at sweep time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Items inside the 0-3 day warning window, soonest first.
    pub expiring_soon: Vec<SweepEntry>,
    /// Items already past their date, most recently expired first.
    pub expired: Vec<SweepEntry>,
}

impl SweepReport {
    /// Total number of items needing attention.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expiring_soon.len() + self.expired.len()
    }

    /// True when neither bucket has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiring_soon.is_empty() && self.expired.is_empty()
    }
}

/// Partition a pantry snapshot into the actionable buckets.
///
/// Returns `None` when nothing is expiring soon or expired - the signal to
/// send no notification at all. Fresh items never appear in a report.
#[must_use]
pub fn sweep_report(pantry: &[PantryItem], today: NaiveDate) -> Option<SweepReport> {
    let mut expiring_soon = Vec::new();
    let mut expired = Vec::new();

    for item in pantry {
        let classification = classify(item, today);
        let entry = SweepEntry::from_item(item, classification.days_offset);
        match classification.status {
            ExpirationStatus::ExpiringSoon => expiring_soon.push(entry),
            ExpirationStatus::Expired => expired.push(entry),
            ExpirationStatus::Fresh => {}
        }
    }

    if expiring_soon.is_empty() && expired.is_empty() {
        return None;
    }

    expiring_soon.sort_by_key(|entry| entry.expiration_date);
    expired.sort_by_key(|entry| std::cmp::Reverse(entry.expiration_date));

    Some(SweepReport {
        expiring_soon,
        expired,
    })
}
