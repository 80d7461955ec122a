//! Calendar helpers for the daily puzzle cycle.
//!
//! All arithmetic is in UTC so the puzzle day line and streak checks agree
//! across player locales.

use chrono::{Duration, NaiveDate, Utc};

/// First published puzzle; numbering starts at 1 on this day.
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid epoch date")
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Yesterday's date in UTC, used for streak checks.
pub fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

/// Long-form display date, e.g. "November 24, 2025".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Sequential puzzle number; puzzle #1 ran on January 1st, 2025.
pub fn puzzle_number(date: NaiveDate) -> i64 {
    (date - epoch()).num_days() + 1
}

/// Board header line, e.g. "Filmclues #328 - November 24, 2025".
pub fn format_puzzle_header(date: NaiveDate, site_name: &str) -> String {
    format!("{} #{} - {}", site_name, puzzle_number(date), format_date(date))
}
