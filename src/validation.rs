//! Form validation and sanitization.
//!
//! Inbound form fields are trimmed, checked, and HTML-escaped before anything
//! else sees them. A failed check never aborts the request: it becomes a
//! `FieldError` that the handler renders next to the submitted values.

use crate::models::{
    book_instance::{BookInstanceDraft, DEFAULT_STATUS, NewBookInstance},
    genre::GenreDraft,
};
use chrono::{NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

pub const GENRE_NAME_REQUIRED: &str = "Genre name required";
pub const GENRE_NAME_TAKEN: &str = "Genre name already exists";
pub const BOOK_REQUIRED: &str = "Book must be specified";
pub const IMPRINT_REQUIRED: &str = "Imprint must be specified";
pub const INVALID_DATE: &str = "Invalid date";

/// One failed check, in the shape form templates expect.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FieldError {
    /// Name of the offending form field.
    pub param: &'static str,
    pub msg: String,
    /// The value as submitted.
    pub value: String,
}

impl FieldError {
    pub fn new(param: &'static str, msg: &str, value: impl Into<String>) -> Self {
        Self {
            param,
            msg: msg.to_string(),
            value: value.into(),
        }
    }
}

/// A sanitized candidate plus every check it failed.
#[derive(Debug, Clone)]
pub struct Checked<D> {
    pub draft: D,
    pub errors: Vec<FieldError>,
}

impl<D> Checked<D> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Escape the characters that are significant in HTML.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// ISO-8601 date, optionally followed by a time of day and offset.
///
/// Dates may be calendar (`2024-03-09`, `20240309`), reduced precision
/// (`2024-03`, `2024`), week (`2024-W10-6`) or ordinal (`2024-069`).
static ISO_8601: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^
        (?P<year>[+-]?\d{4})
        (?:
            -(?P<month>0[1-9]|1[0-2])(?:-(?P<day>0[1-9]|[12]\d|3[01]))?
          | (?P<bmonth>0[1-9]|1[0-2])(?P<bday>0[1-9]|[12]\d|3[01])
          | -?W(?P<week>[0-4]\d|5[0-3])(?:-?(?P<wday>[1-7]))?
          | -?(?P<ordinal>00[1-9]|0[1-9]\d|[12]\d{2}|3(?:[0-5]\d|6[0-6]))
        )?
        (?P<time>
            [Tt\x20]
            (?:(?:[01]\d|2[0-3])(?::?[0-5]\d(?::?[0-5]\d)?)?|24(?::?00(?::?00)?)?)
            (?:[.,]\d+)?
            (?:[Zz]|[+-](?:[01]\d|2[0-3])(?::?[0-5]\d)?)?
        )?
        $",
    )
});

/// Parse an ISO-8601 date or date-time, keeping the date as written.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let caps = ISO_8601.as_ref().ok()?.captures(value)?;
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;

    if let Some(week) = number("week") {
        // A week without a weekday is only reduced precision, not a full date.
        let weekday = match number("wday") {
            Some(n) => Weekday::try_from(u8::try_from(n - 1).ok()?).ok()?,
            None if caps.name("time").is_some() => return None,
            None => Weekday::Mon,
        };
        return NaiveDate::from_isoywd_opt(year, week, weekday);
    }
    if let Some(ordinal) = number("ordinal") {
        return NaiveDate::from_yo_opt(year, ordinal);
    }

    let month = number("month").or_else(|| number("bmonth"));
    let day = number("day").or_else(|| number("bday"));
    if day.is_none() && caps.name("time").is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
}

/// Trim, require non-empty, then escape.
fn required(
    param: &'static str,
    raw: &str,
    msg: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(param, msg, raw));
    }
    escape(trimmed)
}

/// Body of the genre create/update forms.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

impl GenreForm {
    /// `id` is the genre being edited, if any.
    pub fn check(&self, id: Option<Uuid>) -> Checked<GenreDraft> {
        let mut errors = Vec::new();
        let name = required("name", &self.name, GENRE_NAME_REQUIRED, &mut errors);
        Checked {
            draft: GenreDraft { id, name },
            errors,
        }
    }
}

/// Body of the copy create/update forms.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl BookInstanceForm {
    /// `id` is the copy being edited, if any.
    pub fn check(&self, id: Option<Uuid>) -> Checked<BookInstanceDraft> {
        let mut errors = Vec::new();
        let book = required("book", &self.book, BOOK_REQUIRED, &mut errors);
        let imprint = required("imprint", &self.imprint, IMPRINT_REQUIRED, &mut errors);
        let status = escape(self.status.trim());

        let due_back_input = self.due_back.trim().to_string();
        let due_back = if due_back_input.is_empty() {
            None
        } else {
            let parsed = parse_iso_date(&due_back_input);
            if parsed.is_none() {
                errors.push(FieldError::new("due_back", INVALID_DATE, &self.due_back));
            }
            parsed
        };

        Checked {
            draft: BookInstanceDraft {
                id,
                book,
                imprint,
                status,
                due_back,
                due_back_input,
            },
            errors,
        }
    }
}

impl BookInstanceDraft {
    /// The referenced book id, if the field holds one.
    pub fn book_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.book).ok()
    }

    /// Values to persist. Blank status falls back to the default.
    pub fn to_new(&self, book_id: Uuid) -> NewBookInstance {
        let status = if self.status.is_empty() {
            DEFAULT_STATUS.to_string()
        } else {
            self.status.clone()
        };
        NewBookInstance {
            book_id,
            imprint: self.imprint.clone(),
            status,
            due_back: self.due_back,
        }
    }
}
