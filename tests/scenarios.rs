//! End-to-end flows through the public event API.

use std::io::Write;

use chrono::NaiveDate;
use foodsafe::app::Modal;
use foodsafe::domain::date;
use foodsafe::scan::ScanResult;
use foodsafe::{handle_event, initialize, AppState, Config, Event, FoodError};

const FRIDGE: &str = "나의 냉장고";
const STORE: &str = "편의점";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn send(state: &mut AppState, event: Event) {
    handle_event(state, &event).unwrap();
}

fn type_into_dialog(state: &mut AppState, fields: &[&str]) {
    for (i, text) in fields.iter().enumerate() {
        if i > 0 {
            send(state, Event::NextField);
        }
        send(state, Event::SetText((*text).to_string()));
    }
}

fn manual_add(state: &mut AppState, name: &str, date_text: &str) {
    send(state, Event::OpenManualEntry);
    type_into_dialog(state, &[name, date_text]);
    send(state, Event::Confirm);
}

fn listed(state: &AppState) -> Vec<String> {
    state.visible_items().iter().map(|item| item.name.clone()).collect()
}

#[test]
fn seeded_fridge_lists_by_expiry() {
    let mut state = initialize(&Config::default());
    manual_add(&mut state, "사과", "2024-10-18");
    manual_add(&mut state, "우유", "2024-10-16");

    assert_eq!(listed(&state), ["우유", "사과"]);

    let vm = state.compute_viewmodel(ymd(2024, 10, 20));
    assert_eq!(vm.rows[0].status, "D+4");
    assert_eq!(vm.rows[1].status, "D+2");
    assert_eq!(state.visible_items()[1].days_until_expiry(ymd(2024, 10, 20)), -2);
}

#[test]
fn quantity_edit_shows_in_row_label() {
    let mut state = initialize(&Config::default());
    manual_add(&mut state, "우유", "2024-10-16");
    send(&mut state, Event::OpenSelected);
    send(&mut state, Event::NextField);
    send(&mut state, Event::NextField);
    send(&mut state, Event::SetText("3".to_string()));
    send(&mut state, Event::Confirm);

    let vm = state.compute_viewmodel(ymd(2024, 10, 16));
    assert_eq!(vm.rows[0].quantity_label, " (3)");
    assert_eq!(vm.rows[0].status, "D-0");
}

#[test]
fn rename_then_delete_keeps_every_item_tagged() {
    let mut state = initialize(&Config::default());
    manual_add(&mut state, "우유", "2024-10-16");
    send(&mut state, Event::SelectTag(STORE.to_string()));
    manual_add(&mut state, "컵라면", "2024-10-26");

    send(&mut state, Event::LongPressTag(FRIDGE.to_string()));
    send(&mut state, Event::SetText("냉장고".to_string()));
    send(&mut state, Event::Confirm);
    assert_eq!(state.pantry.list_by_tag(FRIDGE).len(), 0);
    assert_eq!(state.pantry.list_by_tag("냉장고").len(), 1);

    send(&mut state, Event::LongPressTag(STORE.to_string()));
    send(&mut state, Event::Delete);
    assert_eq!(state.pantry.tags().tags(), ["냉장고"]);
    assert_eq!(state.selected_tag.as_deref(), Some("냉장고"));
    assert_eq!(listed(&state), ["우유", "컵라면"]);

    send(&mut state, Event::LongPressTag("냉장고".to_string()));
    send(&mut state, Event::Delete);
    assert!(state.dialog_error.is_some());
    assert_eq!(state.pantry.tags().len(), 1);
    assert!(state.pantry.is_consistent());
}

#[test]
fn blank_and_duplicate_tags_are_rejected() {
    let mut state = initialize(&Config::default());
    for name in ["", "   ", FRIDGE] {
        send(&mut state, Event::OpenAddTag);
        send(&mut state, Event::SetText(name.to_string()));
        send(&mut state, Event::Confirm);
        send(&mut state, Event::Cancel);
    }
    assert_eq!(state.pantry.tags().tags(), [FRIDGE, STORE]);
    assert!(state.pantry.add_tag(" ").unwrap_err().is_validation());
}

#[test]
fn malformed_manual_date_leaves_inventory_untouched() {
    let mut state = initialize(&Config::default());
    manual_add(&mut state, "우유", "16/10/2024");

    assert!(matches!(state.modal, Modal::ManualEntry { .. }));
    assert!(state.dialog_error.is_some());
    assert!(state.pantry.inventory().is_empty());
}

#[test]
fn only_one_dialog_at_a_time() {
    let mut state = initialize(&Config::default());
    manual_add(&mut state, "우유", "2024-10-16");

    send(&mut state, Event::OpenSelected);
    let before = state.modal.clone();
    send(&mut state, Event::OpenAddTag);
    send(&mut state, Event::OpenManualEntry);
    send(&mut state, Event::LongPressTag(STORE.to_string()));
    assert_eq!(state.modal, before);

    send(&mut state, Event::Delete);
    assert_eq!(state.selected_item(), None);
    assert!(state.pantry.inventory().is_empty());
}

#[test]
fn scanner_json_feeds_inventory() {
    let mut state = initialize(&Config::default());
    let result = ScanResult::from_json(r#"{"name":"요거트","expiry_date":"2024-10-17"}"#).unwrap();
    send(&mut state, Event::ScanCompleted(result));
    assert_eq!(listed(&state), ["요거트"]);

    let undated = ScanResult::from_json(r#"{"name":"치즈"}"#).unwrap();
    send(&mut state, Event::ScanCompleted(undated));
    assert!(matches!(state.modal, Modal::ManualEntry { .. }));

    assert!(matches!(
        ScanResult::from_json(r#"{"name":"치즈","expiry_date":"17/10"}"#),
        Err(FoodError::Validation(_))
    ));
}

#[test]
fn config_file_drives_initialization() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed_tags = [\"냉동실\", \"베란다\"]").unwrap();
    writeln!(file, "load_sample = true").unwrap();

    let config = Config::load(file.path()).unwrap();
    let state = initialize(&config);

    assert_eq!(state.pantry.tags().tags(), ["냉동실", "베란다"]);
    assert!(state.pantry.inventory().is_empty());
    assert!(date::parse_date("2024-02-30").unwrap_err().is_validation());
}
