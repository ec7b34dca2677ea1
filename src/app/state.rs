//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for everything the user can
//! see: the [`Pantry`] with all items and tags, the selected tag, the open
//! dialog, the list cursor and the search query. It stores only tag names and
//! item ids for selection, never copies of items.
//!
//! # State Components
//!
//! - **Pantry**: Authoritative items and tags
//! - **Selected tag**: Which tag's items are listed; `None` only when no tags exist
//! - **Modal**: The open dialog, see [`Modal`]
//! - **Dialog error**: Inline validation message for the open dialog
//! - **Cursor**: Highlighted row within the visible list
//! - **Search query**: Fuzzy name filter applied on top of the tag filter
//!
//! # Derived State
//!
//! [`AppState::visible_items`] is recomputed on every call, so the list is
//! always sorted against the current inventory. View models take `today` as a
//! parameter; the clock is read by the caller once per frame.

use chrono::NaiveDate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::modes::{ItemDraft, ItemField, ManualDraft, ManualField, Modal};
use crate::domain::date::{self, DATE_INPUT_HINT};
use crate::domain::error::{FoodError, Result};
use crate::domain::food::{FoodItem, ItemId};
use crate::pantry::{Pantry, TagDeletion};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DialogField, DialogView, EmptyState, FooterInfo, HeaderInfo, ItemRow, SearchBarInfo, TagChip,
    UIViewModel,
};

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Items and tags.
    pub pantry: Pantry,

    /// Tag whose items are listed.
    pub selected_tag: Option<String>,

    /// Active dialog, or `Browsing`.
    pub modal: Modal,

    /// Validation message shown inside the open dialog.
    ///
    /// Cleared whenever a dialog opens or closes and when its text changes.
    pub dialog_error: Option<String>,

    /// Zero-based index into [`AppState::visible_items`].
    pub cursor: usize,

    /// Fuzzy name filter. Empty shows every item of the selected tag.
    pub search_query: String,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state browsing the first registered tag.
    #[must_use]
    pub fn new(pantry: Pantry, theme: Theme) -> Self {
        let selected_tag = pantry.tags().first().map(String::from);
        Self {
            pantry,
            selected_tag,
            modal: Modal::Browsing,
            dialog_error: None,
            cursor: 0,
            search_query: String::new(),
            theme,
        }
    }

    /// Items of the selected tag matching the search query, in expiry order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&FoodItem> {
        let Some(tag) = self.selected_tag.as_deref() else {
            return Vec::new();
        };

        let listed = self.pantry.list_by_tag(tag);
        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if tokens.is_empty() {
            return listed;
        }

        let matcher = SkimMatcherV2::default();
        listed
            .into_iter()
            .filter(|item| {
                let name = item.name.to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&name, token).is_some())
            })
            .collect()
    }

    /// Item under the cursor, if the visible list is not empty.
    #[must_use]
    pub fn cursor_item(&self) -> Option<&FoodItem> {
        self.visible_items().get(self.cursor).copied()
    }

    /// Item being edited; `None` unless the item dialog is open.
    #[must_use]
    pub const fn selected_item(&self) -> Option<ItemId> {
        self.modal.editing_item()
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.visible_items().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.visible_items().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Keeps the cursor inside the visible list after it shrinks.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_items().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Switches the listed tag.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::NotFound`] if `tag` is not registered.
    pub fn select_tag(&mut self, tag: &str) -> Result<()> {
        if !self.pantry.tags().contains(tag) {
            return Err(FoodError::NotFound(format!("tag '{tag}'")));
        }
        if self.selected_tag.as_deref() != Some(tag) {
            tracing::debug!(tag = %tag, "tag selected");
            self.selected_tag = Some(tag.to_string());
            self.cursor = 0;
        }
        Ok(())
    }

    /// Sets the fuzzy name filter.
    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.clamp_cursor();
        tracing::trace!(query = %self.search_query, visible = self.visible_items().len(), "search updated");
    }

    /// Opens a dialog if none is open. Returns `false` when blocked.
    pub fn open_modal(&mut self, modal: Modal) -> bool {
        if !self.modal.is_browsing() {
            tracing::debug!(
                open = self.modal.name(),
                requested = modal.name(),
                "dialog already open, request ignored"
            );
            return false;
        }
        tracing::debug!(modal = modal.name(), "dialog opened");
        self.modal = modal;
        self.dialog_error = None;
        true
    }

    /// Returns to browsing, discarding dialog buffers.
    pub fn close_modal(&mut self) {
        if !self.modal.is_browsing() {
            tracing::debug!(modal = self.modal.name(), "dialog closed");
        }
        self.modal = Modal::Browsing;
        self.dialog_error = None;
        self.clamp_cursor();
    }

    /// Opens the edit dialog for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::NotFound`] if the item does not exist.
    pub fn open_item(&mut self, id: ItemId) -> Result<bool> {
        let item = self
            .pantry
            .inventory()
            .get(id)
            .ok_or_else(|| FoodError::NotFound(format!("item {id}")))?;
        let draft = ItemDraft::from_item(item);
        Ok(self.open_modal(Modal::EditingItem { id, draft }))
    }

    /// Opens the rename/delete dialog for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::NotFound`] if the tag is not registered.
    pub fn open_tag(&mut self, tag: &str) -> Result<bool> {
        if !self.pantry.tags().contains(tag) {
            return Err(FoodError::NotFound(format!("tag '{tag}'")));
        }
        Ok(self.open_modal(Modal::EditingTag {
            tag: tag.to_string(),
            input: tag.to_string(),
        }))
    }

    /// Registers a tag without changing the selection, unless nothing was
    /// selected because the registry was empty.
    ///
    /// # Errors
    ///
    /// See [`Pantry::add_tag`].
    pub fn add_tag(&mut self, name: &str) -> Result<()> {
        self.pantry.add_tag(name)?;
        if self.selected_tag.is_none() {
            self.selected_tag = self.pantry.tags().first().map(String::from);
        }
        Ok(())
    }

    /// Renames a tag and moves the selection with it.
    ///
    /// # Errors
    ///
    /// See [`Pantry::rename_tag`].
    pub fn rename_tag(&mut self, old: &str, new: &str) -> Result<bool> {
        let renamed = self.pantry.rename_tag(old, new)?;
        if renamed && self.selected_tag.as_deref() == Some(old) {
            self.selected_tag = Some(new.trim().to_string());
        }
        Ok(renamed)
    }

    /// Deletes a tag; a selected deleted tag falls back to the first remaining one.
    ///
    /// # Errors
    ///
    /// See [`Pantry::delete_tag`].
    pub fn delete_tag(&mut self, name: &str) -> Result<TagDeletion> {
        let report = self.pantry.delete_tag(name)?;
        if self.selected_tag.as_deref() == Some(name) {
            self.selected_tag = self.pantry.tags().first().map(String::from);
            self.cursor = 0;
        }
        self.clamp_cursor();
        Ok(report)
    }

    /// Removes an item, closing its edit dialog if it is open.
    ///
    /// # Errors
    ///
    /// See [`Pantry::remove_item`].
    pub fn remove_item(&mut self, id: ItemId) -> Result<FoodItem> {
        let removed = self.pantry.remove_item(id)?;
        if self.selected_item() == Some(id) {
            self.close_modal();
        } else {
            self.clamp_cursor();
        }
        Ok(removed)
    }

    /// Computes a renderable view model for the given day.
    #[must_use]
    pub fn compute_viewmodel(&self, today: NaiveDate) -> UIViewModel {
        let visible = self.visible_items();

        let rows: Vec<ItemRow> = visible
            .iter()
            .enumerate()
            .map(|(index, item)| ItemRow {
                id: item.id,
                name: item.name.clone(),
                quantity_label: item.quantity_label(),
                status: item.expiry_status(today),
                date: item.display_date(),
                level: item.expiry_level(today),
                is_cursor: self.modal.is_browsing() && index == self.cursor,
            })
            .collect();

        let tags = self
            .pantry
            .tags()
            .tags()
            .iter()
            .map(|tag| TagChip {
                name: tag.clone(),
                is_selected: self.selected_tag.as_deref() == Some(tag.as_str()),
            })
            .collect();

        let empty_state = if rows.is_empty() {
            Some(self.compute_empty_state())
        } else {
            None
        };

        UIViewModel {
            header: HeaderInfo {
                title: date::format_header(today),
            },
            tags,
            rows,
            empty_state,
            search_bar: (!self.search_query.is_empty()).then(|| SearchBarInfo {
                query: self.search_query.clone(),
            }),
            dialog: self.compute_dialog(),
            footer: self.compute_footer(),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.selected_tag.is_none() {
            EmptyState {
                message: "태그가 없습니다".to_string(),
                subtitle: "+ 로 태그를 추가하세요".to_string(),
            }
        } else if self.search_query.is_empty() {
            EmptyState {
                message: "등록된 음식이 없습니다".to_string(),
                subtitle: "스캔하거나 직접 입력하세요".to_string(),
            }
        } else {
            EmptyState {
                message: "검색 결과가 없습니다".to_string(),
                subtitle: format!("'{}'", self.search_query),
            }
        }
    }

    fn compute_dialog(&self) -> Option<DialogView> {
        let (title, fields, options, can_delete) = match &self.modal {
            Modal::Browsing => return None,
            Modal::AddingTag { input } => (
                "태그 추가",
                vec![DialogField::new("태그명", input, "태그명", true)],
                Vec::new(),
                false,
            ),
            Modal::EditingTag { tag, input } => (
                "태그 설정",
                vec![DialogField::new("태그명", input, tag, true)],
                Vec::new(),
                true,
            ),
            Modal::EditingItem { draft, .. } => (
                "음식 수정",
                vec![
                    DialogField::new("음식명", &draft.name, "음식명", draft.focus == ItemField::Name),
                    DialogField::new(
                        "유통기한",
                        &draft.date_text,
                        DATE_INPUT_HINT,
                        draft.focus == ItemField::ExpiryDate,
                    ),
                    DialogField::new("수량", &draft.quantity_text, "1", draft.focus == ItemField::Quantity),
                    DialogField::new("태그", &draft.tag, "", false),
                ],
                self.pantry.tags().tags().to_vec(),
                true,
            ),
            Modal::ManualEntry { draft } => (
                "직접 입력",
                vec![
                    DialogField::new("식품명", &draft.name, "식품명", draft.focus == ManualField::Name),
                    DialogField::new(
                        "유통기한",
                        &draft.date_text,
                        DATE_INPUT_HINT,
                        draft.focus == ManualField::ExpiryDate,
                    ),
                ],
                Vec::new(),
                false,
            ),
        };

        Some(DialogView {
            title: title.to_string(),
            fields,
            tag_options: options,
            error: self.dialog_error.clone(),
            confirm_enabled: self.modal.confirm_enabled(),
            can_delete,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match &self.modal {
            Modal::Browsing => "j/k: move  enter: edit  tag <name>: select  +: add tag  scan: scan  manual: enter  q: quit",
            Modal::EditingItem { .. } => "tab: next field  pick <tag>: set tag  ok: save  del: delete  esc: cancel",
            Modal::EditingTag { .. } => "type to rename  ok: save  del: delete  esc: cancel",
            Modal::AddingTag { .. } | Modal::ManualEntry { .. } => "type to edit  tab: next field  ok: confirm  esc: cancel",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Starts a manual entry form, optionally prefilled with a scanned name.
#[must_use]
pub fn manual_entry(name: Option<&str>) -> Modal {
    let draft = name.map_or_else(ManualDraft::new, ManualDraft::with_name);
    Modal::ManualEntry { draft }
}
