//! Expiration urgency classification.
//!
//! Classification is computed fresh on every read against an injected
//! "today" - never cached and never read from a wall clock here - so display
//! and notification paths cannot drift apart.

use chrono::NaiveDate;

use crate::item::PantryItem;

/// Items expiring within this many days of today (inclusive) are
/// expiring-soon.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 3;

/// Expiration urgency of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpirationStatus {
    /// Expiration is more than the warning window away.
    Fresh,
    /// Expiration falls within the 0-3 day warning window.
    ExpiringSoon,
    /// Expiration date is strictly before today.
    Expired,
}

/// Derived classification of an item; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Urgency bucket.
    pub status: ExpirationStatus,
    /// Signed whole days until expiration: negative means days since expiry,
    /// positive days until, zero expires today.
    pub days_offset: i64,
}

/// Classify an item's expiration urgency relative to `today`.
///
/// Works at calendar-date granularity: both operands carry no time
/// component, so the day offset is exact and immune to clock-skew
/// off-by-ones.
///
/// - `Expired` when the expiration date is strictly before `today`
/// - `ExpiringSoon` when it falls in `today ..= today + 3` inclusive
/// - `Fresh` otherwise
#[must_use]
pub fn classify(item: &PantryItem, today: NaiveDate) -> Classification {
    let expires = item.expiration_date.as_date();
    let days_offset = (expires - today).num_days();

    let status = if days_offset < 0 {
        ExpirationStatus::Expired
    } else if days_offset <= EXPIRING_SOON_WINDOW_DAYS {
        ExpirationStatus::ExpiringSoon
    } else {
        ExpirationStatus::Fresh
    };

    Classification {
        status,
        days_offset,
    }
}

/// Sort items soonest-expiring first for display.
///
/// The sort is stable: items sharing an expiration date keep their insertion
/// order.
pub fn sort_soonest_first(items: &mut [PantryItem]) {
    items.sort_by_key(|item| item.expiration_date);
}
