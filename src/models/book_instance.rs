//! A physical copy of a book.

use super::book::BookTitle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status offered by the copy form. The column itself is free text.
pub const STATUSES: [&str; 4] = ["Available", "Maintenance", "Loaned", "Reserved"];

/// Status stored when the form leaves it blank.
pub const DEFAULT_STATUS: &str = "Maintenance";

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct BookInstance {
    pub id: Uuid,

    /// The book this is a copy of.
    pub book_id: Uuid,

    /// Publisher and edition details.
    pub imprint: String,

    pub status: String,

    /// Date the copy is expected back, if on loan.
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

/// A copy populated with its book's title.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PopulatedBookInstance {
    #[serde(flatten)]
    pub instance: BookInstance,
    pub book: BookTitle,
}

impl PopulatedBookInstance {
    pub fn url(&self) -> String {
        self.instance.url()
    }
}

/// Flat row returned by the copy/book join.
#[derive(FromRow, Debug)]
pub struct PopulatedBookInstanceRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub book_title: String,
}

impl From<PopulatedBookInstanceRow> for PopulatedBookInstance {
    fn from(row: PopulatedBookInstanceRow) -> Self {
        Self {
            book: BookTitle {
                id: row.book_id,
                title: row.book_title,
            },
            instance: BookInstance {
                id: row.id,
                book_id: row.book_id,
                imprint: row.imprint,
                status: row.status,
                due_back: row.due_back,
            },
        }
    }
}

/// Copy form contents: sanitized values plus the raw `due_back` text so an
/// unparseable date is shown back to the user unchanged.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct BookInstanceDraft {
    pub id: Option<Uuid>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub due_back_input: String,
}

impl From<&BookInstance> for BookInstanceDraft {
    fn from(instance: &BookInstance) -> Self {
        Self {
            id: Some(instance.id),
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.clone(),
            due_back: instance.due_back,
            due_back_input: instance
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// A validated copy ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBookInstance {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}
