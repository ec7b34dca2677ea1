//! Calendar date helpers.
//!
//! Formatting uses a fixed Korean weekday table indexed by ISO weekday
//! (Monday = 0 .. Sunday = 6). [`today`] is the only place the host clock is
//! read; everything derived from expiry dates takes `today` as a parameter.

use chrono::{Datelike, Local, NaiveDate};

use super::error::{FoodError, Result};

/// Literal format accepted for typed-in dates.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown in date input fields.
pub const DATE_INPUT_HINT: &str = "YYYY-MM-DD";

const WEEKDAY_NAMES: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

/// Returns the short Korean weekday name for `date`.
#[must_use]
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// Formats a date for list rows, e.g. `"10월 16일 (수)"`.
///
/// ```
/// use chrono::NaiveDate;
/// use foodsafe::domain::date::format_display;
///
/// let date = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
/// assert_eq!(format_display(date), "10월 16일 (수)");
/// ```
#[must_use]
pub fn format_display(date: NaiveDate) -> String {
    format!("{}월 {}일 ({})", date.month(), date.day(), weekday_name(date))
}

/// Formats a date for the title bar, e.g. `"2024년 10월 06일 (일)"`.
#[must_use]
pub fn format_header(date: NaiveDate) -> String {
    format!(
        "{}년 {:02}월 {:02}일 ({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_name(date)
    )
}

/// Returns the current local calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a typed-in date in `YYYY-MM-DD` form.
///
/// Surrounding whitespace is ignored. Any other shape, including `YYMMDD`,
/// is rejected.
///
/// # Errors
///
/// Returns [`FoodError::Validation`] when the text is not a valid ISO date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT).map_err(|e| {
        FoodError::Validation(format!(
            "invalid date '{trimmed}', expected {DATE_INPUT_HINT}: {e}"
        ))
    })
}
