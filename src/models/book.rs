//! Books and the joined shapes the catalog pages need.

use super::{author::Author, genre::Genre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// `id` + `title` projection used for option lists and populated references.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// A book populated with its author and genres.
#[derive(Serialize, Clone, Debug)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
}

/// Book listing row: the book plus its author's display name.
#[derive(Serialize, Clone, FromRow, Debug)]
pub struct BookListing {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author_first_name: String,
    pub author_family_name: String,
}

impl BookListing {
    pub fn url(&self) -> String {
        book_url(self.id)
    }

    pub fn author_name(&self) -> String {
        format!("{}, {}", self.author_family_name, self.author_first_name)
    }
}

/// Input for inserting a book. Genres are attached through `book_genres`.
#[derive(Clone, Debug)]
pub struct NewBook {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}
