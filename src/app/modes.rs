//! Dialog state machine types.
//!
//! The application is always in exactly one [`Modal`] state. `Browsing` means
//! no dialog is open; every other variant is a dialog that carries its own
//! text buffers. Because the state is a single enum, two dialogs can never be
//! open at the same time.
//!
//! ```text
//!            ┌── OpenAddTag ─────────▶ AddingTag ───┐
//!            ├── LongPressTag ───────▶ EditingTag ──┤
//! Browsing ──┼── TapItem ────────────▶ EditingItem ─┼── Confirm / Cancel / Delete ──▶ Browsing
//!            └── OpenManualEntry ────▶ ManualEntry ─┘
//! ```

use crate::domain::date::DATE_INPUT_FORMAT;
use crate::domain::food::{FoodItem, ItemId};

/// Input field of the item edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    ExpiryDate,
    Quantity,
}

impl ItemField {
    const fn next(self) -> Self {
        match self {
            Self::Name => Self::ExpiryDate,
            Self::ExpiryDate => Self::Quantity,
            Self::Quantity => Self::Name,
        }
    }
}

/// Input field of the manual entry dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Name,
    ExpiryDate,
}

/// Editable copy of an item, preloaded when the edit dialog opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub date_text: String,
    pub quantity_text: String,
    pub tag: String,
    pub focus: ItemField,
}

impl ItemDraft {
    #[must_use]
    pub fn from_item(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            date_text: item.expiry_date.format(DATE_INPUT_FORMAT).to_string(),
            quantity_text: item.quantity.to_string(),
            tag: item.tag.clone(),
            focus: ItemField::Name,
        }
    }
}

/// Buffers of the manual entry dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualDraft {
    pub name: String,
    pub date_text: String,
    pub focus: ManualField,
}

impl ManualDraft {
    /// Empty form with focus on the name field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            date_text: String::new(),
            focus: ManualField::Name,
        }
    }

    /// Form prefilled with a scanned name, focus on the date field.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_text: String::new(),
            focus: ManualField::ExpiryDate,
        }
    }
}

impl Default for ManualDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// The single active UI mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// No dialog open; tag selection, list navigation and search are active.
    Browsing,

    /// "Add tag" dialog.
    AddingTag { input: String },

    /// Rename/delete dialog for `tag`, opened by a long press.
    EditingTag { tag: String, input: String },

    /// Edit/delete dialog for the item `id`.
    EditingItem { id: ItemId, draft: ItemDraft },

    /// Manual product/date entry from the scan screen.
    ManualEntry { draft: ManualDraft },
}

impl Modal {
    #[must_use]
    pub const fn is_browsing(&self) -> bool {
        matches!(self, Self::Browsing)
    }

    /// Item referenced by the open edit dialog, if any.
    #[must_use]
    pub const fn editing_item(&self) -> Option<ItemId> {
        match self {
            Self::EditingItem { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Buffer that receives typed characters.
    pub fn focused_buffer_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Browsing => None,
            Self::AddingTag { input } | Self::EditingTag { input, .. } => Some(input),
            Self::EditingItem { draft, .. } => Some(match draft.focus {
                ItemField::Name => &mut draft.name,
                ItemField::ExpiryDate => &mut draft.date_text,
                ItemField::Quantity => &mut draft.quantity_text,
            }),
            Self::ManualEntry { draft } => Some(match draft.focus {
                ManualField::Name => &mut draft.name,
                ManualField::ExpiryDate => &mut draft.date_text,
            }),
        }
    }

    /// Moves focus to the next field. Returns `false` for single-field dialogs.
    pub fn focus_next(&mut self) -> bool {
        match self {
            Self::EditingItem { draft, .. } => {
                draft.focus = draft.focus.next();
                true
            }
            Self::ManualEntry { draft } => {
                draft.focus = match draft.focus {
                    ManualField::Name => ManualField::ExpiryDate,
                    ManualField::ExpiryDate => ManualField::Name,
                };
                true
            }
            _ => false,
        }
    }

    /// Whether the confirm action is currently available.
    ///
    /// Adding a tag needs a non-blank name and manual entry needs a non-blank
    /// date; the other dialogs can always be confirmed.
    #[must_use]
    pub fn confirm_enabled(&self) -> bool {
        match self {
            Self::Browsing => false,
            Self::AddingTag { input } => !input.trim().is_empty(),
            Self::ManualEntry { draft } => !draft.date_text.trim().is_empty(),
            Self::EditingTag { .. } | Self::EditingItem { .. } => true,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::AddingTag { .. } => "adding_tag",
            Self::EditingTag { .. } => "editing_tag",
            Self::EditingItem { .. } => "editing_item",
            Self::ManualEntry { .. } => "manual_entry",
        }
    }
}
