//! Line-oriented terminal driver.
//!
//! Reads one command per line from stdin, translates it into an [`Event`],
//! runs [`handle_event`], executes the returned actions and redraws the
//! screen when asked to.
//!
//! # Startup
//!
//! ```text
//! foodsafe                      # ~/.config/foodsafe/config.toml if present
//! foodsafe path/to/config.toml  # explicit TOML file
//! foodsafe load_sample=true     # key=value pairs, see Config::from_map
//! ```
//!
//! # Commands
//!
//! While browsing:
//! - `j` / `k`: Move cursor down / up
//! - `enter`: Edit the item under the cursor
//! - `open <n>`: Edit the n-th listed item
//! - `tag <name>`: Select a tag
//! - `edit-tag <name>`: Rename or delete a tag
//! - `+`: Add a tag
//! - `/<query>`: Search by name (`/` alone clears)
//! - `manual`: Manual entry
//! - `scan <name> [YYYY-MM-DD]`: Barcode scan returning the given result
//! - `scan-auto <name> [YYYY-MM-DD]`: Auto-recognition scan
//! - `scanjson <json>`: Scan returning a raw scanner message
//! - `q`: Quit
//!
//! Inside a dialog:
//! - `ok` / `esc` / `del`: Confirm / cancel / delete
//! - `tab`: Next field
//! - `pick <tag>`: Choose the item's tag
//! - `bs`: Delete the last character
//! - any other line: Replace the focused field

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chrono::NaiveDate;

use foodsafe::domain::date;
use foodsafe::infrastructure::paths;
use foodsafe::scan::{ScanMode, ScanResult, Scanner, ScriptedScanner};
use foodsafe::{handle_event, Action, AppState, Config, Event, FoodError, Result};

/// What a typed line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(Event),
    /// Queue a scanner result, then start a scan.
    Scan(ScanMode, ScanResult),
    Help,
}

fn load_config(args: &[String]) -> Result<Config> {
    let (pairs, files): (Vec<&String>, Vec<&String>) = args.iter().partition(|arg| arg.contains('='));

    if let Some(path) = files.first() {
        return Config::load(paths::expand_tilde(path));
    }

    if !pairs.is_empty() {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .filter_map(|pair| pair.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.to_string()))
            .collect();
        return Ok(Config::from_map(&map));
    }

    let default_path = paths::config_file_path();
    if default_path.exists() {
        Config::load(default_path)
    } else {
        Ok(Config::default())
    }
}

fn parse_scan(mode: ScanMode, rest: &str) -> Result<Command> {
    let rest = rest.trim();
    let (name, expiry_date) = match rest.rsplit_once(' ') {
        Some((name, last)) if date::parse_date(last).is_ok() => (name.trim(), date::parse_date(last).ok()),
        _ => (rest, None),
    };
    if name.is_empty() {
        return Err(FoodError::Validation("scan needs a product name".to_string()));
    }
    Ok(Command::Scan(mode, ScanResult::new(name, expiry_date)))
}

fn parse_browsing(line: &str, state: &AppState) -> Result<Option<Command>> {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word {
        "" => return Ok(None),
        "q" | "quit" => Command::Event(Event::Quit),
        "j" | "down" => Command::Event(Event::KeyDown),
        "k" | "up" => Command::Event(Event::KeyUp),
        "enter" => Command::Event(Event::OpenSelected),
        "open" => {
            let index: usize = rest
                .parse()
                .map_err(|_| FoodError::Validation(format!("'{rest}' is not a row number")))?;
            let id = index
                .checked_sub(1)
                .and_then(|i| state.visible_items().get(i).map(|item| item.id))
                .ok_or_else(|| FoodError::NotFound(format!("row {index}")))?;
            Command::Event(Event::TapItem(id))
        }
        "tag" => Command::Event(Event::SelectTag(rest.to_string())),
        "edit-tag" => Command::Event(Event::LongPressTag(rest.to_string())),
        "+" | "add-tag" => Command::Event(Event::OpenAddTag),
        "manual" => Command::Event(Event::OpenManualEntry),
        "scan" => parse_scan(ScanMode::Barcode, rest)?,
        "scan-auto" => parse_scan(ScanMode::AutoRecognition, rest)?,
        "scanjson" => Command::Scan(ScanMode::Barcode, ScanResult::from_json(rest)?),
        "help" | "?" => Command::Help,
        _ if line.starts_with('/') => Command::Event(Event::SetSearch(line[1..].trim().to_string())),
        _ => return Err(FoodError::Validation(format!("unknown command '{word}'"))),
    };
    Ok(Some(command))
}

fn parse_dialog(line: &str) -> Command {
    let event = match line.trim() {
        "ok" => Event::Confirm,
        "esc" | "cancel" => Event::Cancel,
        "del" => Event::Delete,
        "tab" => Event::NextField,
        "bs" => Event::Backspace,
        trimmed => match trimmed.strip_prefix("pick ") {
            Some(tag) => Event::PickTag(tag.trim().to_string()),
            None => Event::SetText(line.to_string()),
        },
    };
    Command::Event(event)
}

fn parse_command(line: &str, state: &AppState) -> Result<Option<Command>> {
    if state.modal.is_browsing() {
        parse_browsing(line.trim(), state)
    } else {
        Ok(Some(parse_dialog(line)))
    }
}

/// Runs an event and any follow-up events produced by its actions.
///
/// Returns `Ok(true)` when the driver should quit.
fn dispatch(state: &mut AppState, scanner: &mut ScriptedScanner, event: Event, redraw: &mut bool) -> Result<bool> {
    let mut pending = vec![event];

    while let Some(event) = pending.pop() {
        let (needs_render, actions) = handle_event(state, &event)?;
        *redraw |= needs_render;

        for action in actions {
            match action {
                Action::Quit => return Ok(true),
                Action::StartScan(mode) => match scanner.scan(mode) {
                    Some(result) => pending.push(Event::ScanCompleted(result)),
                    None => tracing::info!(mode = mode.label(), "scan produced no result"),
                },
            }
        }
    }
    Ok(false)
}

fn draw(state: &AppState, today: NaiveDate, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}", foodsafe::ui::render(state, today))?;
    out.flush()
}

fn run(mut state: AppState) -> io::Result<()> {
    let mut scanner = ScriptedScanner::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    draw(&state, date::today(), &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let _span = tracing::debug_span!("command", line = %line).entered();

        let mut redraw = false;
        let quit = match parse_command(&line, &state) {
            Ok(None) => false,
            Ok(Some(Command::Help)) => {
                writeln!(stdout, "{}", HELP)?;
                false
            }
            Ok(Some(Command::Scan(mode, result))) => {
                scanner.push(result);
                dispatch(&mut state, &mut scanner, Event::StartScan(mode), &mut redraw).unwrap_or_else(|e| {
                    redraw = true;
                    report(&e)
                })
            }
            Ok(Some(Command::Event(event))) => {
                dispatch(&mut state, &mut scanner, event, &mut redraw).unwrap_or_else(|e| {
                    redraw = true;
                    report(&e)
                })
            }
            Err(e) => report(&e),
        };

        if quit {
            break;
        }
        if redraw {
            draw(&state, date::today(), &mut stdout)?;
        }
    }

    tracing::info!("foodsafe exiting");
    Ok(())
}

fn report(error: &FoodError) -> bool {
    tracing::error!(error = %error, "command failed");
    eprintln!("{error}");
    false
}

const HELP: &str = "j/k move · enter edit · open <n> · tag <name> · edit-tag <name> · + add tag · /<query> · \
manual · scan <name> [YYYY-MM-DD] · scan-auto · scanjson <json> · q quit";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("foodsafe: {e}");
            return ExitCode::FAILURE;
        }
    };

    foodsafe::observability::init_tracing(&config);
    let state = foodsafe::initialize(&config);

    match run(state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal i/o failed");
            eprintln!("foodsafe: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodsafe::ItemId;

    fn state() -> AppState {
        foodsafe::initialize(&Config::default())
    }

    #[test]
    fn browsing_commands_map_to_events() {
        let state = state();
        assert_eq!(
            parse_command("tag 편의점", &state).unwrap(),
            Some(Command::Event(Event::SelectTag("편의점".to_string())))
        );
        assert_eq!(
            parse_command("/우 유", &state).unwrap(),
            Some(Command::Event(Event::SetSearch("우 유".to_string())))
        );
        assert_eq!(parse_command("  ", &state).unwrap(), None);
        assert!(parse_command("fly", &state).is_err());
    }

    #[test]
    fn scan_takes_optional_trailing_date() {
        let state = state();
        let Some(Command::Scan(mode, result)) = parse_command("scan 딸기 우유 2024-10-16", &state).unwrap() else {
            panic!("expected scan");
        };
        assert_eq!(mode, ScanMode::Barcode);
        assert_eq!(result.name, "딸기 우유");
        assert_eq!(result.expiry_date, NaiveDate::from_ymd_opt(2024, 10, 16));

        let Some(Command::Scan(_, result)) = parse_command("scan-auto 딸기 우유", &state).unwrap() else {
            panic!("expected scan");
        };
        assert_eq!(result.name, "딸기 우유");
        assert_eq!(result.expiry_date, None);
    }

    #[test]
    fn dialog_lines_edit_fields() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenAddTag).unwrap();
        assert_eq!(
            parse_command("q", &state).unwrap(),
            Some(Command::Event(Event::SetText("q".to_string())))
        );
        assert_eq!(parse_command("ok", &state).unwrap(), Some(Command::Event(Event::Confirm)));
    }

    #[test]
    fn scan_action_feeds_result_back() {
        let mut state = state();
        let mut scanner = ScriptedScanner::new();
        scanner.push(ScanResult::new("우유", NaiveDate::from_ymd_opt(2024, 10, 16)));
        let mut redraw = false;

        let quit = dispatch(&mut state, &mut scanner, Event::StartScan(ScanMode::Barcode), &mut redraw).unwrap();

        assert!(!quit);
        assert!(redraw);
        assert_eq!(state.visible_items().len(), 1);
        assert_eq!(state.visible_items()[0].id, ItemId(1));
    }
}
