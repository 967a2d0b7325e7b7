//! A genre books can be filed under.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Genre {
    pub id: Uuid,

    /// Display name, stored trimmed and HTML-escaped. Unique across genres.
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        genre_url(self.id)
    }
}

pub fn genre_url(id: Uuid) -> String {
    format!("/catalog/genre/{}", id)
}

/// Genre form contents: a candidate that may not be valid yet.
///
/// `id` is set when the form edits an existing genre.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct GenreDraft {
    pub id: Option<Uuid>,
    pub name: String,
}

impl From<&Genre> for GenreDraft {
    fn from(genre: &Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name.clone(),
        }
    }
}
