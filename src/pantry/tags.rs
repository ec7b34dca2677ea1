//! Tag registry with cascading rename and delete.
//!
//! Tags are kept in insertion order, which is also their display order. Every
//! operation that changes a tag name rewrites the inventory in the same call,
//! so no item ever references a tag that is not registered.

use super::inventory::Inventory;
use crate::domain::error::{FoodError, Result};

/// Outcome of [`TagRegistry::delete_tag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDeletion {
    /// Tag that inherited the deleted tag's items, if there was one.
    pub reassigned_to: Option<String>,

    /// Number of items moved to `reassigned_to`.
    pub moved: usize,
}

/// Ordered set of unique tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: Vec<String>,
}

impl TagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from seed names, skipping blanks and duplicates.
    pub fn with_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in seed {
            if let Err(e) = registry.add_tag(name.as_ref()) {
                tracing::debug!(tag = %name.as_ref(), error = %e, "skipping seed tag");
            }
        }
        registry
    }

    /// Appends a new tag.
    ///
    /// The name is trimmed; comparison against existing tags is exact and
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::Validation`] if the name is blank or already
    /// registered.
    pub fn add_tag(&mut self, name: &str) -> Result<()> {
        let name = normalize(name)?;
        if self.contains(&name) {
            return Err(FoodError::Validation(format!("tag '{name}' already exists")));
        }
        tracing::debug!(tag = %name, position = self.tags.len(), "tag added");
        self.tags.push(name);
        Ok(())
    }

    /// Renames `old` to `new` in place and rewrites every item tagged `old`.
    ///
    /// A blank `new` or `new == old` is silently ignored. Returns whether
    /// anything changed.
    ///
    /// # Errors
    ///
    /// - [`FoodError::NotFound`] if `old` is not registered
    /// - [`FoodError::Validation`] if `new` names a different existing tag
    pub fn rename_tag(&mut self, old: &str, new: &str, inventory: &mut Inventory) -> Result<bool> {
        let _span = tracing::debug_span!("rename_tag", old = %old, new = %new).entered();

        let position = self.position(old)?;

        let Ok(new) = normalize(new) else {
            tracing::debug!("blank replacement name, rename ignored");
            return Ok(false);
        };
        if new == old {
            return Ok(false);
        }
        if self.contains(&new) {
            return Err(FoodError::Validation(format!("tag '{new}' already exists")));
        }

        let moved = inventory.retag(old, &new);
        self.tags[position] = new;

        tracing::debug!(moved = moved, "tag renamed");
        Ok(true)
    }

    /// Removes `name`, reassigning its items to the first remaining tag.
    ///
    /// # Errors
    ///
    /// - [`FoodError::NotFound`] if `name` is not registered
    /// - [`FoodError::Validation`] if `name` is the last tag and items still
    ///   reference it; nothing is changed in that case
    pub fn delete_tag(&mut self, name: &str, inventory: &mut Inventory) -> Result<TagDeletion> {
        let _span = tracing::debug_span!("delete_tag", tag = %name).entered();

        let position = self.position(name)?;
        let fallback = self.tags.iter().find(|tag| tag.as_str() != name).cloned();
        let referencing = inventory.count_tagged(name);

        if fallback.is_none() && referencing > 0 {
            return Err(FoodError::Validation(format!(
                "cannot delete the last tag '{name}' while {referencing} item(s) use it"
            )));
        }

        let moved = fallback.as_deref().map_or(0, |to| inventory.retag(name, to));
        self.tags.remove(position);

        tracing::debug!(reassigned_to = ?fallback, moved = moved, "tag deleted");
        Ok(TagDeletion {
            reassigned_to: fallback,
            moved,
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }

    /// Tags in display order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.tags
            .iter()
            .position(|tag| tag == name)
            .ok_or_else(|| FoodError::NotFound(format!("tag '{name}'")))
    }
}

fn normalize(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FoodError::Validation("tag name must not be blank".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> TagRegistry {
        TagRegistry::with_seed(["A", "B"])
    }

    #[test]
    fn seed_skips_blank_and_duplicate_names() {
        let registry = TagRegistry::with_seed(["A", " ", "B", "A"]);
        assert_eq!(registry.tags(), ["A", "B"]);
    }

    #[test]
    fn add_rejects_blank_and_duplicates_without_change() {
        let mut registry = seeded();
        assert!(registry.add_tag("").unwrap_err().is_validation());
        assert!(registry.add_tag("   ").unwrap_err().is_validation());
        assert!(registry.add_tag("A").unwrap_err().is_validation());
        assert_eq!(registry.tags(), ["A", "B"]);

        registry.add_tag("a").unwrap();
        assert_eq!(registry.tags(), ["A", "B", "a"]);
    }

    #[test]
    fn rename_keeps_position_and_rewrites_items() {
        let mut registry = TagRegistry::with_seed(["A", "B", "C"]);
        let mut inventory = Inventory::new();
        let x = inventory.add(&registry, "x", ymd(2024, 1, 1), "B", 1).unwrap();
        let y = inventory.add(&registry, "y", ymd(2024, 1, 2), "A", 1).unwrap();

        assert!(registry.rename_tag("B", "D", &mut inventory).unwrap());

        assert_eq!(registry.tags(), ["A", "D", "C"]);
        assert_eq!(inventory.get(x).unwrap().tag, "D");
        assert_eq!(inventory.get(y).unwrap().tag, "A");
        assert_eq!(inventory.count_tagged("B"), 0);
    }

    #[test]
    fn rename_ignores_blank_and_identical_names() {
        let mut registry = seeded();
        let mut inventory = Inventory::new();
        assert!(!registry.rename_tag("A", "  ", &mut inventory).unwrap());
        assert!(!registry.rename_tag("A", "A", &mut inventory).unwrap());
        assert_eq!(registry.tags(), ["A", "B"]);
    }

    #[test]
    fn rename_errors() {
        let mut registry = seeded();
        let mut inventory = Inventory::new();
        assert!(matches!(
            registry.rename_tag("Z", "Y", &mut inventory),
            Err(FoodError::NotFound(_))
        ));
        assert!(registry.rename_tag("A", "B", &mut inventory).unwrap_err().is_validation());
        assert_eq!(registry.tags(), ["A", "B"]);
    }

    #[test]
    fn delete_reassigns_orphans_to_first_remaining_tag() {
        let mut registry = TagRegistry::with_seed(["A", "B", "C"]);
        let mut inventory = Inventory::new();
        let x = inventory.add(&registry, "x", ymd(2024, 1, 1), "A", 1).unwrap();
        inventory.add(&registry, "y", ymd(2024, 1, 1), "A", 1).unwrap();

        let report = registry.delete_tag("A", &mut inventory).unwrap();

        assert_eq!(report, TagDeletion { reassigned_to: Some("B".to_string()), moved: 2 });
        assert_eq!(registry.tags(), ["B", "C"]);
        assert_eq!(inventory.get(x).unwrap().tag, "B");
        assert!(inventory.iter().all(|item| registry.contains(&item.tag)));
    }

    #[test]
    fn deleting_last_tag_in_use_is_refused() {
        let mut registry = TagRegistry::with_seed(["A"]);
        let mut inventory = Inventory::new();
        inventory.add(&registry, "x", ymd(2024, 1, 1), "A", 1).unwrap();

        assert!(registry.delete_tag("A", &mut inventory).unwrap_err().is_validation());
        assert_eq!(registry.tags(), ["A"]);
        assert_eq!(inventory.count_tagged("A"), 1);
    }

    #[test]
    fn deleting_last_unused_tag_empties_registry() {
        let mut registry = TagRegistry::with_seed(["A"]);
        let mut inventory = Inventory::new();
        let report = registry.delete_tag("A", &mut inventory).unwrap();
        assert_eq!(report, TagDeletion { reassigned_to: None, moved: 0 });
        assert!(registry.is_empty());
        assert!(matches!(registry.delete_tag("A", &mut inventory), Err(FoodError::NotFound(_))));
    }
}
