//! Text renderer turning view models into ANSI-styled frames.
//!
//! Layout:
//!
//! ```text
//! [Header: today's date]
//! [Tag bar]
//! [Border]
//! [Search bar, when a query is active]
//! [Rows, or the empty state]
//! [Dialog, when one is open]
//! [Border]
//! [Footer]
//! ```
//!
//! Rendering is pure: the result is a `String`, and writing it to a terminal is
//! left to the caller.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::app::AppState;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DialogView, EmptyState, ItemRow, SearchBarInfo, TagChip, UIViewModel};

/// Width of borders and the name column, in characters.
const WIDTH: usize = 48;
const NAME_COLUMN: usize = 20;

/// Computes the view model for `today` and renders it.
#[must_use]
pub fn render(state: &AppState, today: NaiveDate) -> String {
    let viewmodel = state.compute_viewmodel(today);
    render_to_string(&viewmodel, &state.theme)
}

/// Renders a complete frame.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use foodsafe::pantry::Pantry;
/// use foodsafe::ui::{render_to_string, Theme};
/// use foodsafe::AppState;
///
/// let mut pantry = Pantry::with_tags(["나의 냉장고"]);
/// let date = NaiveDate::from_ymd_opt(2024, 10, 18).unwrap();
/// pantry.add_item("사과", date, "나의 냉장고", 1)?;
/// let state = AppState::new(pantry, Theme::default());
///
/// let today = NaiveDate::from_ymd_opt(2024, 10, 20).unwrap();
/// let frame = render_to_string(&state.compute_viewmodel(today), &state.theme);
/// assert!(frame.contains("D+2"));
/// # Ok::<(), foodsafe::FoodError>(())
/// ```
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme) -> String {
    let mut out = String::new();

    render_header(&mut out, &vm.header.title, theme);
    render_tags(&mut out, &vm.tags, theme);
    render_border(&mut out, &theme.colors.border);

    if let Some(search) = &vm.search_bar {
        render_search_bar(&mut out, search, theme);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(&mut out, empty, theme);
    } else {
        for row in &vm.rows {
            render_row(&mut out, row, theme);
        }
    }

    if let Some(dialog) = &vm.dialog {
        render_dialog(&mut out, dialog, theme);
    }

    render_border(&mut out, &theme.colors.border);
    let _ = writeln!(
        out,
        "{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        vm.footer.keybindings,
        Theme::reset()
    );

    out
}

fn render_header(out: &mut String, title: &str, theme: &Theme) {
    let padding = WIDTH.saturating_sub(title.chars().count()) / 2;
    let _ = writeln!(
        out,
        "{}{}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        " ".repeat(padding),
        title,
        Theme::reset()
    );
}

fn render_tags(out: &mut String, tags: &[TagChip], theme: &Theme) {
    for chip in tags {
        if chip.is_selected {
            let _ = write!(
                out,
                "{}{}{} [{}] {}",
                Theme::bold(),
                Theme::fg(&theme.colors.tag_selected_fg),
                Theme::bg(&theme.colors.tag_selected_bg),
                chip.name,
                Theme::reset()
            );
        } else {
            let _ = write!(
                out,
                "{}  {}  {}",
                Theme::fg(&theme.colors.text_normal),
                chip.name,
                Theme::reset()
            );
        }
    }
    let _ = writeln!(out, "{} + {}", Theme::fg(&theme.colors.text_dim), Theme::reset());
}

fn render_border(out: &mut String, color: &str) {
    let _ = writeln!(out, "{}{}{}", Theme::fg(color), "─".repeat(WIDTH), Theme::reset());
}

fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme) {
    let _ = writeln!(
        out,
        "{}/ {}{}",
        Theme::fg(&theme.colors.search_bar_border),
        search.query,
        Theme::reset()
    );
}

fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme) {
    let _ = writeln!(
        out,
        "{}{}{}",
        Theme::fg(&theme.colors.empty_state_fg),
        empty.message,
        Theme::reset()
    );
    let _ = writeln!(out, "{}{}{}", Theme::dim(), empty.subtitle, Theme::reset());
}

fn render_row(out: &mut String, row: &ItemRow, theme: &Theme) {
    let label = format!("{}{}", row.name, row.quantity_label);
    let pad = NAME_COLUMN.saturating_sub(label.chars().count());

    if row.is_cursor {
        let _ = write!(
            out,
            "{}{}▶ {}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg),
            label
        );
    } else {
        let _ = write!(out, "{}  {}", Theme::fg(&theme.colors.text_normal), label);
    }
    let _ = write!(out, "{}{}", " ".repeat(pad), Theme::reset());

    let _ = writeln!(
        out,
        " {}{}{:>5}{} {}{}{}",
        Theme::bold(),
        Theme::fg(theme.level_color(row.level)),
        row.status,
        Theme::reset(),
        Theme::fg(&theme.colors.text_dim),
        row.date,
        Theme::reset()
    );
}

fn render_dialog(out: &mut String, dialog: &DialogView, theme: &Theme) {
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}{}┌ {} {}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        dialog.title,
        Theme::reset()
    );

    for field in &dialog.fields {
        let marker = if field.is_focused { '>' } else { ' ' };
        let value = if field.value.is_empty() {
            format!("{}{}{}", Theme::dim(), field.placeholder, Theme::reset())
        } else {
            field.value.clone()
        };
        let _ = writeln!(out, "│{marker} {}: {value}", field.label);
    }

    if !dialog.tag_options.is_empty() {
        let _ = writeln!(out, "│  [{}]", dialog.tag_options.join(" | "));
    }

    if let Some(error) = &dialog.error {
        let _ = writeln!(out, "│  {}{}{}", Theme::fg(&theme.colors.error_fg), error, Theme::reset());
    }

    let confirm = if dialog.confirm_enabled {
        "[확인]".to_string()
    } else {
        format!("{}[확인]{}", Theme::dim(), Theme::reset())
    };
    let delete = if dialog.can_delete { " [삭제]" } else { "" };
    let _ = writeln!(out, "└ {confirm}{delete} [취소]");
}
