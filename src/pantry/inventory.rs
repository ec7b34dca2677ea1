//! Ordered food item collection.
//!
//! Items are kept in insertion order. The display order (ascending expiry date,
//! ties in insertion order) is computed on every [`Inventory::list_by_tag`]
//! call and never cached, so it always reflects the latest mutation.

use chrono::NaiveDate;

use super::tags::TagRegistry;
use crate::domain::error::{FoodError, Result};
use crate::domain::food::{FoodItem, FoodUpdate, ItemId};

/// Exclusive owner of all [`FoodItem`] records.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<FoodItem>,
    next_id: u64,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item and returns its new id.
    ///
    /// The name is trimmed before it is stored. The item is appended; no
    /// sorting happens here.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::Validation`] if the name is blank, the quantity is
    /// zero, or `tag` is not registered in `tags`.
    pub fn add(
        &mut self,
        tags: &TagRegistry,
        name: &str,
        expiry_date: NaiveDate,
        tag: &str,
        quantity: u32,
    ) -> Result<ItemId> {
        let _span = tracing::debug_span!("inventory_add",
            name = %name,
            expiry_date = %expiry_date,
            tag = %tag,
            quantity = quantity
        ).entered();

        let name = validate_name(name)?;
        validate_tag(tags, tag)?;
        validate_quantity(quantity)?;

        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.push(FoodItem {
            id,
            name,
            expiry_date,
            tag: tag.to_string(),
            quantity,
        });

        tracing::debug!(item_id = %id, total = self.items.len(), "item added");
        Ok(id)
    }

    /// Applies a partial update to an existing item.
    ///
    /// All supplied fields are validated before any of them is written, so a
    /// rejected update leaves the item untouched.
    ///
    /// # Errors
    ///
    /// - [`FoodError::NotFound`] if `id` is unknown
    /// - [`FoodError::Validation`] under the same rules as [`Inventory::add`]
    pub fn update(&mut self, tags: &TagRegistry, id: ItemId, update: FoodUpdate) -> Result<()> {
        let _span = tracing::debug_span!("inventory_update", item_id = %id).entered();

        let index = self.index_of(id)?;

        let name = update.name.as_deref().map(validate_name).transpose()?;
        if let Some(tag) = update.tag.as_deref() {
            validate_tag(tags, tag)?;
        }
        if let Some(quantity) = update.quantity {
            validate_quantity(quantity)?;
        }

        let item = &mut self.items[index];
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(expiry_date) = update.expiry_date {
            item.expiry_date = expiry_date;
        }
        if let Some(tag) = update.tag {
            item.tag = tag;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }

        tracing::debug!(
            name = %item.name,
            expiry_date = %item.expiry_date,
            tag = %item.tag,
            quantity = item.quantity,
            "item updated"
        );
        Ok(())
    }

    /// Removes an item permanently and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::NotFound`] if `id` is unknown.
    pub fn remove(&mut self, id: ItemId) -> Result<FoodItem> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        tracing::debug!(item_id = %id, name = %removed.name, "item removed");
        Ok(removed)
    }

    /// Items filed under `tag`, ascending by expiry date.
    ///
    /// Items sharing an expiry date keep their insertion order.
    #[must_use]
    pub fn list_by_tag(&self, tag: &str) -> Vec<&FoodItem> {
        let mut listed: Vec<&FoodItem> = self.items.iter().filter(|item| item.tag == tag).collect();
        listed.sort_by_key(|item| item.expiry_date);
        listed
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// All items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items filed under `tag`.
    #[must_use]
    pub fn count_tagged(&self, tag: &str) -> usize {
        self.items.iter().filter(|item| item.tag == tag).count()
    }

    /// Moves every item tagged `from` to `to`, returning how many moved.
    pub(crate) fn retag(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for item in self.items.iter_mut().filter(|item| item.tag == from) {
            item.tag = to.to_string();
            moved += 1;
        }
        moved
    }

    fn index_of(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| FoodError::NotFound(format!("item {id}")))
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FoodError::Validation("food name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_tag(tags: &TagRegistry, tag: &str) -> Result<()> {
    if tags.contains(tag) {
        Ok(())
    } else {
        Err(FoodError::Validation(format!("unknown tag '{tag}'")))
    }
}

fn validate_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(FoodError::Validation("quantity must be at least 1".to_string()));
    }
    Ok(())
}
