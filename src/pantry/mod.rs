//! In-memory food inventory and tag registry.
//!
//! This module owns all authoritative data. [`Pantry`] pairs one
//! [`Inventory`] with one [`TagRegistry`] and routes every mutation through
//! both, so the invariant "every item's tag is registered" holds after each
//! public call.
//!
//! # Modules
//!
//! - `inventory`: Ordered item collection with per-tag listing
//! - `tags`: Ordered tag names with cascading rename/delete
//! - `sample`: Demo data set

pub mod inventory;
pub mod sample;
pub mod tags;

pub use inventory::Inventory;
pub use tags::{TagDeletion, TagRegistry};

use chrono::NaiveDate;

use crate::domain::error::Result;
use crate::domain::food::{FoodItem, FoodUpdate, ItemId};

/// Aggregate owning the inventory and the tag registry.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use foodsafe::pantry::Pantry;
///
/// let mut pantry = Pantry::with_tags(["나의 냉장고", "편의점"]);
/// let date = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
/// pantry.add_item("우유", date, "나의 냉장고", 3)?;
///
/// pantry.rename_tag("나의 냉장고", "냉장고")?;
/// assert_eq!(pantry.list_by_tag("냉장고").len(), 1);
/// # Ok::<(), foodsafe::FoodError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    inventory: Inventory,
    tags: TagRegistry,
}

impl Pantry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty inventory with the given seed tags.
    pub fn with_tags<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            inventory: Inventory::new(),
            tags: TagRegistry::with_seed(seed),
        }
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub const fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Adds an item under a registered tag.
    ///
    /// # Errors
    ///
    /// See [`Inventory::add`].
    pub fn add_item(&mut self, name: &str, expiry_date: NaiveDate, tag: &str, quantity: u32) -> Result<ItemId> {
        self.inventory.add(&self.tags, name, expiry_date, tag, quantity)
    }

    /// Applies a partial update to an item.
    ///
    /// # Errors
    ///
    /// See [`Inventory::update`].
    pub fn update_item(&mut self, id: ItemId, update: FoodUpdate) -> Result<()> {
        self.inventory.update(&self.tags, id, update)
    }

    /// Removes an item permanently.
    ///
    /// # Errors
    ///
    /// See [`Inventory::remove`].
    pub fn remove_item(&mut self, id: ItemId) -> Result<FoodItem> {
        self.inventory.remove(id)
    }

    /// Registers a new tag.
    ///
    /// # Errors
    ///
    /// See [`TagRegistry::add_tag`].
    pub fn add_tag(&mut self, name: &str) -> Result<()> {
        self.tags.add_tag(name)
    }

    /// Renames a tag and every item filed under it.
    ///
    /// # Errors
    ///
    /// See [`TagRegistry::rename_tag`].
    pub fn rename_tag(&mut self, old: &str, new: &str) -> Result<bool> {
        self.tags.rename_tag(old, new, &mut self.inventory)
    }

    /// Deletes a tag, moving its items to the first remaining tag.
    ///
    /// # Errors
    ///
    /// See [`TagRegistry::delete_tag`].
    pub fn delete_tag(&mut self, name: &str) -> Result<TagDeletion> {
        self.tags.delete_tag(name, &mut self.inventory)
    }

    /// Items under `tag` in display order.
    #[must_use]
    pub fn list_by_tag(&self, tag: &str) -> Vec<&FoodItem> {
        self.inventory.list_by_tag(tag)
    }

    /// Returns `true` when every item references a registered tag.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.inventory.iter().all(|item| self.tags.contains(&item.tag))
    }
}
