//! Food item domain model.
//!
//! A [`FoodItem`] is one tracked product: its name, the day it expires, the tag
//! it is filed under and how many units are on hand. Expiry state is always
//! derived from a caller-supplied `today`, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date;

/// Days-left threshold at or below which an item counts as expiring soon.
const SOON_THRESHOLD_DAYS: i64 = 3;

/// Opaque identifier assigned by the inventory when an item is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse expiry classification used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryLevel {
    /// Expiry date is in the past.
    Expired,
    /// Expires today.
    Today,
    /// Expires within the next few days.
    Soon,
    /// Plenty of time left.
    Fresh,
}

/// A tracked food item.
///
/// # Fields
///
/// - `id`: Inventory-assigned identifier, stable for the item's lifetime
/// - `name`: Non-empty display name
/// - `expiry_date`: Calendar day the item expires
/// - `tag`: Name of the registered tag the item is filed under
/// - `quantity`: Units on hand, at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub tag: String,
    pub quantity: u32,
}

impl FoodItem {
    /// Signed number of days from `today` until the expiry date.
    ///
    /// Negative once the item has expired.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use foodsafe::domain::{FoodItem, ItemId};
    ///
    /// let item = FoodItem {
    ///     id: ItemId(1),
    ///     name: "사과".to_string(),
    ///     expiry_date: NaiveDate::from_ymd_opt(2024, 10, 18).unwrap(),
    ///     tag: "나의 냉장고".to_string(),
    ///     quantity: 1,
    /// };
    /// let today = NaiveDate::from_ymd_opt(2024, 10, 20).unwrap();
    /// assert_eq!(item.days_until_expiry(today), -2);
    /// assert_eq!(item.expiry_status(today), "D+2");
    /// ```
    #[must_use]
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        self.expiry_date.signed_duration_since(today).num_days()
    }

    /// Countdown label: `"D-3"` ahead of expiry, `"D-0"` on the day, `"D+2"` after.
    #[must_use]
    pub fn expiry_status(&self, today: NaiveDate) -> String {
        let days = self.days_until_expiry(today);
        if days >= 0 {
            format!("D-{days}")
        } else {
            format!("D+{}", days.unsigned_abs())
        }
    }

    #[must_use]
    pub fn expiry_level(&self, today: NaiveDate) -> ExpiryLevel {
        match self.days_until_expiry(today) {
            d if d < 0 => ExpiryLevel::Expired,
            0 => ExpiryLevel::Today,
            d if d <= SOON_THRESHOLD_DAYS => ExpiryLevel::Soon,
            _ => ExpiryLevel::Fresh,
        }
    }

    /// Quantity suffix for list rows; empty for a single unit.
    #[must_use]
    pub fn quantity_label(&self) -> String {
        if self.quantity > 1 {
            format!(" ({})", self.quantity)
        } else {
            String::new()
        }
    }

    /// Expiry date formatted for list rows.
    #[must_use]
    pub fn display_date(&self) -> String {
        date::format_display(self.expiry_date)
    }
}

/// Partial update for an existing item. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub tag: Option<String>,
    pub quantity: Option<u32>,
}

impl FoodUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.expiry_date.is_none()
            && self.tag.is_none()
            && self.quantity.is_none()
    }
}

/// Lenient quantity parsing for form input.
///
/// Non-numeric, zero or negative input falls back to 1 instead of rejecting
/// the whole form.
#[must_use]
pub fn parse_quantity(text: &str) -> u32 {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|q| *q > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(expiry: NaiveDate, quantity: u32) -> FoodItem {
        FoodItem {
            id: ItemId(7),
            name: "우유".to_string(),
            expiry_date: expiry,
            tag: "나의 냉장고".to_string(),
            quantity,
        }
    }

    #[test]
    fn status_follows_sign_of_day_difference() {
        let today = ymd(2024, 10, 20);
        assert_eq!(item(ymd(2024, 10, 23), 1).expiry_status(today), "D-3");
        assert_eq!(item(ymd(2024, 10, 20), 1).expiry_status(today), "D-0");
        assert_eq!(item(ymd(2024, 10, 18), 1).expiry_status(today), "D+2");
    }

    #[test]
    fn day_difference_crosses_month_and_leap_day() {
        let today = ymd(2024, 2, 28);
        assert_eq!(item(ymd(2024, 3, 1), 1).days_until_expiry(today), 2);
        assert_eq!(item(ymd(2023, 12, 31), 1).days_until_expiry(today), -59);
    }

    #[test]
    fn level_boundaries() {
        let today = ymd(2024, 10, 20);
        assert_eq!(item(ymd(2024, 10, 19), 1).expiry_level(today), ExpiryLevel::Expired);
        assert_eq!(item(ymd(2024, 10, 20), 1).expiry_level(today), ExpiryLevel::Today);
        assert_eq!(item(ymd(2024, 10, 23), 1).expiry_level(today), ExpiryLevel::Soon);
        assert_eq!(item(ymd(2024, 10, 24), 1).expiry_level(today), ExpiryLevel::Fresh);
    }

    #[test]
    fn quantity_label_hidden_for_single_unit() {
        assert_eq!(item(ymd(2024, 10, 20), 1).quantity_label(), "");
        assert_eq!(item(ymd(2024, 10, 20), 99).quantity_label(), " (99)");
    }

    #[test]
    fn quantity_parse_defaults_to_one() {
        assert_eq!(parse_quantity("4"), 4);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-3"), 1);
        assert_eq!(parse_quantity(""), 1);
    }
}
