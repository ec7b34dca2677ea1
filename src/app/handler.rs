//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only path through which user actions change state.
//! Each call runs to completion before the next event is processed, so no
//! intermediate state is ever observable.
//!
//! # Event Types
//!
//! - **Browsing**: `SelectTag`, `KeyDown`, `KeyUp`, `SetSearch`
//! - **Dialog openers**: `OpenAddTag`, `LongPressTag`, `TapItem`, `OpenSelected`, `OpenManualEntry`
//! - **Dialog input**: `Char`, `Backspace`, `SetText`, `NextField`, `PickTag`
//! - **Dialog commands**: `Confirm`, `Cancel`, `Delete`
//! - **Scanner**: `StartScan`, `ScanCompleted`
//! - **Lifecycle**: `Quit`
//!
//! # Error Policy
//!
//! Validation failures raised by a dialog's confirm or delete are stored in
//! [`AppState::dialog_error`] and the dialog stays open. Stale references
//! ([`FoodError::NotFound`]) close the dialog and are returned as `Err`; the
//! state remains usable either way.

use super::modes::Modal;
use super::state::manual_entry;
use crate::app::{Action, AppState};
use crate::domain::date;
use crate::domain::error::{FoodError, Result};
use crate::domain::food::{parse_quantity, FoodUpdate, ItemId};
use crate::scan::{ScanMode, ScanResult};

/// Discrete user actions and collaborator callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Tap on a tag chip.
    SelectTag(String),
    /// Long press on a tag chip; opens the rename/delete dialog.
    LongPressTag(String),
    /// Opens the "add tag" dialog.
    OpenAddTag,
    /// Tap on a list row; opens the item dialog.
    TapItem(ItemId),
    /// Opens the item dialog for the row under the cursor.
    OpenSelected,
    /// Opens the manual entry dialog.
    OpenManualEntry,

    /// Moves the list cursor down (wraps to top).
    KeyDown,
    /// Moves the list cursor up (wraps to bottom).
    KeyUp,
    /// Replaces the search query.
    SetSearch(String),

    /// Appends a character to the focused dialog field.
    Char(char),
    /// Removes the last character of the focused dialog field.
    Backspace,
    /// Replaces the focused dialog field.
    SetText(String),
    /// Moves focus to the next dialog field.
    NextField,
    /// Chooses the tag in the item dialog.
    PickTag(String),

    /// Confirm button of the open dialog.
    Confirm,
    /// Cancel button or dismissal of the open dialog.
    Cancel,
    /// Delete button of the open dialog.
    Delete,

    /// Requests a scan from the external scanner.
    StartScan(ScanMode),
    /// Result delivered by the scanner.
    ScanCompleted(ScanResult),

    /// Leaves the application.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned `bool` is `true` when the screen should be redrawn.
///
/// # Errors
///
/// Returns [`FoodError::NotFound`] for stale item references and for long
/// presses on unknown tags; unknown tags in `SelectTag` are ignored. Dialog
/// validation failures are reported through [`AppState::dialog_error`]
/// instead.
///
/// # Example
///
/// ```
/// use foodsafe::{handle_event, initialize, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// handle_event(&mut state, &Event::OpenAddTag)?;
/// handle_event(&mut state, &Event::SetText("간식".to_string()))?;
/// let (redraw, actions) = handle_event(&mut state, &Event::Confirm)?;
///
/// assert!(redraw);
/// assert!(actions.is_empty());
/// assert!(state.pantry.tags().contains("간식"));
/// # Ok::<(), foodsafe::FoodError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, modal = state.modal.name()).entered();

    match event {
        Event::SelectTag(tag) => {
            if !state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            if !state.pantry.tags().contains(tag) {
                tracing::debug!(tag = %tag, "unknown tag ignored");
                return Ok((false, vec![]));
            }
            state.select_tag(tag)?;
            Ok((true, vec![]))
        }
        Event::LongPressTag(tag) => Ok((state.open_tag(tag)?, vec![])),
        Event::OpenAddTag => Ok((state.open_modal(Modal::AddingTag { input: String::new() }), vec![])),
        Event::TapItem(id) => Ok((state.open_item(*id)?, vec![])),
        Event::OpenSelected => {
            if !state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            let Some(id) = state.cursor_item().map(|item| item.id) else {
                tracing::debug!("no item under cursor");
                return Ok((false, vec![]));
            };
            Ok((state.open_item(id)?, vec![]))
        }
        Event::OpenManualEntry => Ok((state.open_modal(manual_entry(None)), vec![])),

        Event::KeyDown => {
            if !state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if !state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::SetSearch(query) => {
            if !state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            state.set_search(query);
            Ok((true, vec![]))
        }

        Event::Char(c) => Ok((edit_focused(state, |buffer| buffer.push(*c)), vec![])),
        Event::Backspace => Ok((
            edit_focused(state, |buffer| {
                buffer.pop();
            }),
            vec![],
        )),
        Event::SetText(text) => Ok((edit_focused(state, |buffer| text.clone_into(buffer)), vec![])),
        Event::NextField => Ok((state.modal.focus_next(), vec![])),
        Event::PickTag(tag) => Ok((pick_tag(state, tag), vec![])),

        Event::Confirm => confirm(state),
        Event::Cancel => {
            if state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            state.close_modal();
            Ok((true, vec![]))
        }
        Event::Delete => delete(state),

        Event::StartScan(mode) => {
            if !state.modal.is_browsing() {
                return Ok((false, vec![]));
            }
            tracing::debug!(mode = ?mode, "scan requested");
            Ok((false, vec![Action::StartScan(*mode)]))
        }
        Event::ScanCompleted(result) => Ok((scan_completed(state, result), vec![])),

        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Applies `edit` to the focused dialog buffer. Returns `false` when no dialog is open.
fn edit_focused<F>(state: &mut AppState, edit: F) -> bool
where
    F: FnOnce(&mut String),
{
    let Some(buffer) = state.modal.focused_buffer_mut() else {
        return false;
    };
    edit(buffer);
    tracing::trace!(buffer = %buffer, "dialog input updated");
    state.dialog_error = None;
    true
}

fn pick_tag(state: &mut AppState, tag: &str) -> bool {
    let known = state.pantry.tags().contains(tag);
    let Modal::EditingItem { draft, .. } = &mut state.modal else {
        return false;
    };
    if known {
        draft.tag = tag.to_string();
        state.dialog_error = None;
    } else {
        state.dialog_error = Some(FoodError::Validation(format!("unknown tag '{tag}'")).to_string());
    }
    true
}

/// Closes the dialog on success, keeps it open with an inline message on a
/// validation failure, and closes it before propagating anything else.
fn settle<T>(state: &mut AppState, result: Result<T>) -> Result<(bool, Vec<Action>)> {
    match result {
        Ok(_) => {
            state.close_modal();
            Ok((true, vec![]))
        }
        Err(e) if e.is_validation() => {
            tracing::debug!(error = %e, modal = state.modal.name(), "dialog input rejected");
            state.dialog_error = Some(e.to_string());
            Ok((true, vec![]))
        }
        Err(e) => {
            state.close_modal();
            Err(e)
        }
    }
}

fn confirm(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if !state.modal.confirm_enabled() {
        return Ok((false, vec![]));
    }

    match state.modal.clone() {
        Modal::Browsing => Ok((false, vec![])),
        Modal::AddingTag { input } => {
            let result = state.add_tag(&input);
            settle(state, result)
        }
        Modal::EditingTag { tag, input } => {
            let result = state.rename_tag(&tag, &input);
            settle(state, result)
        }
        Modal::EditingItem { id, draft } => {
            let result = date::parse_date(&draft.date_text).and_then(|expiry_date| {
                let update = FoodUpdate {
                    name: Some(draft.name),
                    expiry_date: Some(expiry_date),
                    tag: Some(draft.tag),
                    quantity: Some(parse_quantity(&draft.quantity_text)),
                };
                state.pantry.update_item(id, update)
            });
            settle(state, result)
        }
        Modal::ManualEntry { draft } => {
            let result = add_for_selected_tag(state, &draft.name, &draft.date_text);
            settle(state, result)
        }
    }
}

fn delete(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.modal.clone() {
        Modal::EditingTag { tag, .. } => {
            let result = state.delete_tag(&tag);
            settle(state, result)
        }
        Modal::EditingItem { id, .. } => {
            let result = state.remove_item(id);
            settle(state, result)
        }
        _ => Ok((false, vec![])),
    }
}

/// Parses `date_text` and adds a single unit under the selected tag.
fn add_for_selected_tag(state: &mut AppState, name: &str, date_text: &str) -> Result<ItemId> {
    let expiry_date = date::parse_date(date_text)?;
    let tag = state
        .selected_tag
        .clone()
        .ok_or_else(|| FoodError::Validation("no tag selected".to_string()))?;
    state.pantry.add_item(name, expiry_date, &tag, 1)
}

/// Adds a complete scan directly; anything missing or rejected goes to the
/// manual entry dialog instead.
fn scan_completed(state: &mut AppState, result: &ScanResult) -> bool {
    if !state.modal.is_browsing() {
        tracing::debug!(modal = state.modal.name(), "scan result ignored while a dialog is open");
        return false;
    }

    let Some(expiry_date) = result.expiry_date else {
        tracing::debug!(name = %result.name, "scan without date, asking for manual entry");
        return state.open_modal(manual_entry(Some(&result.name)));
    };

    let date_text = expiry_date.format(date::DATE_INPUT_FORMAT).to_string();
    match add_for_selected_tag(state, &result.name, &date_text) {
        Ok(id) => {
            tracing::debug!(item_id = %id, name = %result.name, "scanned item added");
            state.clamp_cursor();
        }
        Err(e) => {
            tracing::debug!(error = %e, "scanned item rejected, asking for manual entry");
            let mut modal = manual_entry(Some(&result.name));
            if let Modal::ManualEntry { draft } = &mut modal {
                draft.date_text = date_text;
            }
            state.open_modal(modal);
            state.dialog_error = Some(e.to_string());
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::Pantry;
    use crate::ui::Theme;
    use chrono::NaiveDate;

    const FRIDGE: &str = "나의 냉장고";
    const STORE: &str = "편의점";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> AppState {
        let mut pantry = Pantry::with_tags([FRIDGE, STORE]);
        pantry.add_item("우유", ymd(2024, 10, 16), FRIDGE, 3).unwrap();
        pantry.add_item("사과", ymd(2024, 10, 18), FRIDGE, 1).unwrap();
        AppState::new(pantry, Theme::default())
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn first_id(state: &AppState) -> ItemId {
        state.visible_items()[0].id
    }

    #[test]
    fn add_tag_flow_keeps_selection() {
        let mut state = state();
        send(&mut state, Event::OpenAddTag);
        for c in "간식".chars() {
            send(&mut state, Event::Char(c));
        }
        send(&mut state, Event::Confirm);

        assert_eq!(state.pantry.tags().tags(), [FRIDGE, STORE, "간식"]);
        assert_eq!(state.selected_tag.as_deref(), Some(FRIDGE));
        assert!(state.modal.is_browsing());
    }

    #[test]
    fn blank_add_tag_confirm_is_unreachable() {
        let mut state = state();
        send(&mut state, Event::OpenAddTag);
        send(&mut state, Event::SetText("   ".to_string()));

        assert_eq!(send(&mut state, Event::Confirm), (false, vec![]));
        assert!(matches!(state.modal, Modal::AddingTag { .. }));
        assert_eq!(state.pantry.tags().len(), 2);
    }

    #[test]
    fn duplicate_tag_keeps_dialog_open_with_message() {
        let mut state = state();
        send(&mut state, Event::OpenAddTag);
        send(&mut state, Event::SetText(STORE.to_string()));
        send(&mut state, Event::Confirm);

        assert!(matches!(state.modal, Modal::AddingTag { .. }));
        assert!(state.dialog_error.is_some());
        assert_eq!(state.pantry.tags().len(), 2);

        send(&mut state, Event::Backspace);
        assert!(state.dialog_error.is_none());
        send(&mut state, Event::Cancel);
        assert!(state.modal.is_browsing());
    }

    #[test]
    fn long_press_rename_cascades_to_items_and_selection() {
        let mut state = state();
        send(&mut state, Event::LongPressTag(FRIDGE.to_string()));
        send(&mut state, Event::SetText("냉장고".to_string()));
        send(&mut state, Event::Confirm);

        assert_eq!(state.selected_tag.as_deref(), Some("냉장고"));
        assert_eq!(state.pantry.inventory().count_tagged(FRIDGE), 0);
        assert_eq!(state.pantry.inventory().count_tagged("냉장고"), 2);
    }

    #[test]
    fn blank_rename_is_silently_ignored() {
        let mut state = state();
        send(&mut state, Event::LongPressTag(STORE.to_string()));
        send(&mut state, Event::SetText(String::new()));
        send(&mut state, Event::Confirm);

        assert!(state.modal.is_browsing());
        assert_eq!(state.pantry.tags().tags(), [FRIDGE, STORE]);
    }

    #[test]
    fn delete_from_tag_dialog_reassigns_items() {
        let mut state = state();
        send(&mut state, Event::LongPressTag(FRIDGE.to_string()));
        send(&mut state, Event::Delete);

        assert!(state.modal.is_browsing());
        assert_eq!(state.pantry.tags().tags(), [STORE]);
        assert_eq!(state.selected_tag.as_deref(), Some(STORE));
        assert_eq!(state.visible_items().len(), 2);
        assert!(state.pantry.is_consistent());
    }

    #[test]
    fn edit_item_applies_all_fields() {
        let mut state = state();
        let id = first_id(&state);
        send(&mut state, Event::TapItem(id));
        send(&mut state, Event::SetText("두유".to_string()));
        send(&mut state, Event::NextField);
        send(&mut state, Event::SetText("2024-11-01".to_string()));
        send(&mut state, Event::NextField);
        send(&mut state, Event::SetText("many".to_string()));
        send(&mut state, Event::PickTag(STORE.to_string()));
        send(&mut state, Event::Confirm);

        let item = state.pantry.inventory().get(id).unwrap();
        assert_eq!(item.name, "두유");
        assert_eq!(item.expiry_date, ymd(2024, 11, 1));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.tag, STORE);
        assert_eq!(state.selected_item(), None);
    }

    #[test]
    fn malformed_edit_date_keeps_dialog_open() {
        let mut state = state();
        let id = first_id(&state);
        send(&mut state, Event::TapItem(id));
        send(&mut state, Event::NextField);
        send(&mut state, Event::SetText("241016".to_string()));
        send(&mut state, Event::Confirm);

        assert_eq!(state.selected_item(), Some(id));
        assert!(state.dialog_error.is_some());
        assert_eq!(state.pantry.inventory().get(id).unwrap().expiry_date, ymd(2024, 10, 16));
    }

    #[test]
    fn delete_from_item_dialog_removes_and_closes() {
        let mut state = state();
        let id = first_id(&state);
        send(&mut state, Event::TapItem(id));
        send(&mut state, Event::Delete);

        assert!(!state.pantry.inventory().contains(id));
        assert_eq!(state.selected_item(), None);
        assert!(matches!(
            handle_event(&mut state, &Event::TapItem(id)),
            Err(FoodError::NotFound(_))
        ));
    }

    #[test]
    fn manual_entry_adds_under_selected_tag() {
        let mut state = state();
        send(&mut state, Event::SelectTag(STORE.to_string()));
        send(&mut state, Event::OpenManualEntry);
        send(&mut state, Event::SetText("컵라면".to_string()));
        send(&mut state, Event::NextField);
        send(&mut state, Event::SetText("2024-12-01".to_string()));
        send(&mut state, Event::Confirm);

        assert!(state.modal.is_browsing());
        let listed = state.visible_items();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "컵라면");
        assert_eq!(listed[0].tag, STORE);
        assert_eq!(listed[0].quantity, 1);
    }

    #[test]
    fn manual_entry_rejects_malformed_date() {
        let mut state = state();
        send(&mut state, Event::OpenManualEntry);
        send(&mut state, Event::SetText("컵라면".to_string()));
        send(&mut state, Event::NextField);
        send(&mut state, Event::SetText("12/01".to_string()));
        send(&mut state, Event::Confirm);

        assert!(matches!(state.modal, Modal::ManualEntry { .. }));
        assert!(state.dialog_error.is_some());
        assert_eq!(state.pantry.inventory().len(), 2);
    }

    #[test]
    fn dialogs_are_exclusive() {
        let mut state = state();
        send(&mut state, Event::OpenManualEntry);
        assert_eq!(send(&mut state, Event::OpenAddTag), (false, vec![]));
        assert_eq!(send(&mut state, Event::LongPressTag(FRIDGE.to_string())), (false, vec![]));
        assert_eq!(send(&mut state, Event::StartScan(ScanMode::Barcode)), (false, vec![]));
        assert!(matches!(state.modal, Modal::ManualEntry { .. }));
    }

    #[test]
    fn scan_with_date_adds_directly() {
        let mut state = state();
        let result = ScanResult::new("요거트", Some(ymd(2024, 10, 17)));
        send(&mut state, Event::ScanCompleted(result));

        let names: Vec<&str> = state.visible_items().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["우유", "요거트", "사과"]);
        assert!(state.modal.is_browsing());
    }

    #[test]
    fn scan_without_date_prefills_manual_entry() {
        let mut state = state();
        send(&mut state, Event::ScanCompleted(ScanResult::new("요거트", None)));

        let Modal::ManualEntry { draft } = &state.modal else {
            panic!("expected manual entry, got {:?}", state.modal);
        };
        assert_eq!(draft.name, "요거트");
        send(&mut state, Event::SetText("2024-10-17".to_string()));
        send(&mut state, Event::Confirm);
        assert_eq!(state.pantry.inventory().len(), 3);
    }

    #[test]
    fn start_scan_and_quit_emit_actions() {
        let mut state = state();
        assert_eq!(
            send(&mut state, Event::StartScan(ScanMode::AutoRecognition)),
            (false, vec![Action::StartScan(ScanMode::AutoRecognition)])
        );
        assert_eq!(send(&mut state, Event::Quit), (false, vec![Action::Quit]));
    }

    #[test]
    fn unknown_tag_selection_is_ignored() {
        let mut state = state();
        assert_eq!(send(&mut state, Event::SelectTag("창고".to_string())), (false, vec![]));
        assert_eq!(state.selected_tag.as_deref(), Some(FRIDGE));
    }

    #[test]
    fn long_press_on_unknown_tag_is_not_found() {
        let mut state = state();
        assert!(matches!(
            handle_event(&mut state, &Event::LongPressTag("창고".to_string())),
            Err(FoodError::NotFound(_))
        ));
        assert!(state.modal.is_browsing());
    }
}
