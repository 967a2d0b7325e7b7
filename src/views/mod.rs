//! View rendering.
//!
//! Handlers gather everything a page needs into a `View` (template name plus
//! typed context) and hand it to a `ViewRenderer` exactly once. Renderers are
//! pure: they never touch the catalog.

pub mod html;

use crate::{
    models::{
        author::Author,
        book::{Book, BookDetail, BookListing, BookTitle},
        book_instance::{BookInstance, BookInstanceDraft, PopulatedBookInstance},
        genre::{Genre, GenreDraft},
    },
    services::CatalogCounts,
    validation::FieldError,
};
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to serialize view context: {0}")]
    Json(#[from] serde_json::Error),
}

/// A template and the context it is rendered with. Every context has a title.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum View {
    Index {
        title: String,
        counts: CatalogCounts,
    },
    GenreList {
        title: String,
        genre_list: Vec<Genre>,
    },
    GenreDetail {
        title: String,
        genre: Genre,
        genre_books: Vec<Book>,
    },
    GenreForm {
        title: String,
        genre: Option<GenreDraft>,
        errors: Vec<FieldError>,
    },
    GenreDelete {
        title: String,
        genre: Genre,
        genre_books: Vec<Book>,
    },
    #[serde(rename = "bookinstance_list")]
    BookInstanceList {
        title: String,
        bookinstance_list: Vec<PopulatedBookInstance>,
    },
    #[serde(rename = "bookinstance_detail")]
    BookInstanceDetail {
        title: String,
        bookinstance: PopulatedBookInstance,
    },
    #[serde(rename = "bookinstance_form")]
    BookInstanceForm {
        title: String,
        book_list: Vec<BookTitle>,
        selected_book: Option<String>,
        bookinstance: Option<BookInstanceDraft>,
        errors: Vec<FieldError>,
    },
    #[serde(rename = "bookinstance_delete")]
    BookInstanceDelete {
        title: String,
        bookinstance: PopulatedBookInstance,
    },
    AuthorList {
        title: String,
        author_list: Vec<Author>,
    },
    AuthorDetail {
        title: String,
        author: Author,
        author_books: Vec<Book>,
    },
    BookList {
        title: String,
        book_list: Vec<BookListing>,
    },
    BookDetail {
        title: String,
        book: BookDetail,
        book_instances: Vec<BookInstance>,
    },
}

impl View {
    pub fn template_name(&self) -> &'static str {
        match self {
            View::Index { .. } => "index",
            View::GenreList { .. } => "genre_list",
            View::GenreDetail { .. } => "genre_detail",
            View::GenreForm { .. } => "genre_form",
            View::GenreDelete { .. } => "genre_delete",
            View::BookInstanceList { .. } => "bookinstance_list",
            View::BookInstanceDetail { .. } => "bookinstance_detail",
            View::BookInstanceForm { .. } => "bookinstance_form",
            View::BookInstanceDelete { .. } => "bookinstance_delete",
            View::AuthorList { .. } => "author_list",
            View::AuthorDetail { .. } => "author_detail",
            View::BookList { .. } => "book_list",
            View::BookDetail { .. } => "book_detail",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            View::Index { title, .. }
            | View::GenreList { title, .. }
            | View::GenreDetail { title, .. }
            | View::GenreForm { title, .. }
            | View::GenreDelete { title, .. }
            | View::BookInstanceList { title, .. }
            | View::BookInstanceDetail { title, .. }
            | View::BookInstanceForm { title, .. }
            | View::BookInstanceDelete { title, .. }
            | View::AuthorList { title, .. }
            | View::AuthorDetail { title, .. }
            | View::BookList { title, .. }
            | View::BookDetail { title, .. } => title,
        }
    }
}

/// Turns a finished view into a response body.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> Result<String, ViewError>;

    fn content_type(&self) -> &'static str;
}

/// Emits the view context as JSON, tagged with its template name.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ViewRenderer for JsonRenderer {
    fn render(&self, view: &View) -> Result<String, ViewError> {
        Ok(serde_json::to_string(view)?)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

/// Which renderer the server uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    Html,
    Json,
}

impl RenderMode {
    pub fn renderer(self) -> std::sync::Arc<dyn ViewRenderer> {
        match self {
            RenderMode::Html => std::sync::Arc::new(html::HtmlRenderer),
            RenderMode::Json => std::sync::Arc::new(JsonRenderer),
        }
    }
}
