//! Catalog entities.
//!
//! Each entity maps to a SQLite table via `sqlx::FromRow` and serializes
//! as JSON via `serde` for view contexts. Presentation fields (names, formatted
//! dates, canonical URLs) are computed on read and never persisted.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::{Datelike, NaiveDate};

/// Format a date the way catalog pages show it, e.g. `June 5th, 1952`.
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}
