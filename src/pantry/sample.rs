//! Demo inventory used when `load_sample` is enabled.

use chrono::NaiveDate;

use super::Pantry;

/// `(name, (year, month, day), tag, quantity)` rows of the demo data set.
const SAMPLE_ITEMS: &[(&str, (i32, u32, u32), &str, u32)] = &[
    ("사과", (2024, 10, 18), "나의 냉장고", 1),
    ("바나나", (2024, 10, 24), "나의 냉장고", 2),
    ("삼각김밥", (2024, 10, 26), "편의점", 99),
    ("컵라면", (2024, 10, 26), "편의점", 1),
    ("우유", (2024, 10, 16), "나의 냉장고", 3),
    ("배", (2024, 10, 20), "나의 냉장고", 4),
    ("포도", (2024, 10, 21), "나의 냉장고", 5),
];

/// Adds the demo items whose tag is registered and returns how many were added.
pub fn load_sample(pantry: &mut Pantry) -> usize {
    let mut added = 0;
    for &(name, (year, month, day), tag, quantity) in SAMPLE_ITEMS {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        match pantry.add_item(name, date, tag, quantity) {
            Ok(_) => added += 1,
            Err(e) => tracing::debug!(name = %name, tag = %tag, error = %e, "skipping sample item"),
        }
    }
    tracing::debug!(added = added, "sample inventory loaded");
    added
}
