//! Indonesian-locale display formatting shared by every document.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Shown in place of zero counts and undefined aggregates.
pub const DASH: &str = "-";

/// Wire format of every stored date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `5 Januari 2024`: day without padding, full month name.
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date), date.year())
}

/// `Januari 2024`.
pub fn month_year(date: NaiveDate) -> String {
    format!("{} {}", month_name(date), date.year())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Long form of a stored date; anything that is not `YYYY-MM-DD` is shown as written.
pub fn display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => long_date(date),
        None => raw.trim().to_string(),
    }
}

pub fn count_or_dash(count: u32) -> String {
    if count == 0 {
        DASH.to_string()
    } else {
        count.to_string()
    }
}

/// `value`, or `fallback` when `value` is blank.
pub fn or_placeholder(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Join the non-blank parts with `", "`.
pub fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
