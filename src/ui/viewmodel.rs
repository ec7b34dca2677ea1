//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready strings only: dates are already
//! formatted and expiry statuses already computed for the frame's `today`.
//!
//! # Example
//!
//! ```rust
//! use foodsafe::ui::viewmodel::{FooterInfo, HeaderInfo, TagChip, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: "2024년 10월 16일 (수)".to_string() },
//!     tags: vec![TagChip { name: "나의 냉장고".to_string(), is_selected: true }],
//!     rows: vec![],
//!     empty_state: None,
//!     search_bar: None,
//!     dialog: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.rows.is_empty());
//! ```

use crate::domain::food::{ExpiryLevel, ItemId};

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Today's date line.
    pub header: HeaderInfo,

    /// Tag bar in registry order.
    pub tags: Vec<TagChip>,

    /// Items of the selected tag, sorted by expiry date.
    pub rows: Vec<ItemRow>,

    /// Shown instead of rows when the list is empty.
    pub empty_state: Option<EmptyState>,

    /// Present while a search query is active.
    pub search_bar: Option<SearchBarInfo>,

    /// The open dialog, drawn over the list.
    pub dialog: Option<DialogView>,

    /// Keybinding hints for the current mode.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Formatted date, e.g. "2024년 10월 16일 (수)".
    pub title: String,
}

/// One chip in the tag bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub name: String,
    pub is_selected: bool,
}

/// One line of the item list.
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,

    /// `" (n)"` when more than one unit, empty otherwise.
    pub quantity_label: String,

    /// Countdown such as "D-3", "D-0" or "D+2".
    pub status: String,

    /// Short date, e.g. "10월 16일 (수)".
    pub date: String,

    /// Urgency used for coloring.
    pub level: ExpiryLevel,

    /// Whether the list cursor is on this row.
    pub is_cursor: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

/// An open dialog.
#[derive(Debug, Clone)]
pub struct DialogView {
    pub title: String,
    pub fields: Vec<DialogField>,

    /// Selectable tags; only the item dialog offers them.
    pub tag_options: Vec<String>,

    /// Inline validation message.
    pub error: Option<String>,

    /// Whether the confirm button is active.
    pub confirm_enabled: bool,

    /// Whether a delete button is shown.
    pub can_delete: bool,
}

/// A labeled input of a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogField {
    pub label: String,
    pub value: String,

    /// Shown dimmed when `value` is empty.
    pub placeholder: String,
    pub is_focused: bool,
}

impl DialogField {
    #[must_use]
    pub fn new(label: &str, value: &str, placeholder: &str, is_focused: bool) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            is_focused,
        }
    }
}
