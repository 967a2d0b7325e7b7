//! Catalog home plus the read-only author and book pages.

use super::{AppState, parse_id};
use crate::{errors::AppError, views::View};
use axum::{
    extract::{Path, State},
    response::Response,
};

const AUTHOR_NOT_FOUND: &str = "Author not found";
const BOOK_NOT_FOUND: &str = "Book not found";

/// GET `/catalog`
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let counts = state.catalog.counts().await?;
    state.render(View::Index {
        title: "Local Library Home".into(),
        counts,
    })
}

/// GET `/catalog/authors`
pub async fn author_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let author_list = state.catalog.list_authors().await?;
    state.render(View::AuthorList {
        title: "Author List".into(),
        author_list,
    })
}

/// GET `/catalog/author/{id}`
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, AUTHOR_NOT_FOUND)?;
    let (author, author_books) = futures::try_join!(
        state.catalog.find_author(id),
        state.catalog.books_by_author(id)
    )?;
    let author = author.ok_or_else(|| AppError::not_found(AUTHOR_NOT_FOUND))?;

    state.render(View::AuthorDetail {
        title: "Author Detail".into(),
        author,
        author_books,
    })
}

/// GET `/catalog/books`
pub async fn book_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let book_list = state.catalog.list_books().await?;
    state.render(View::BookList {
        title: "Book List".into(),
        book_list,
    })
}

/// GET `/catalog/book/{id}`: the book with its author, genres, and copies.
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, BOOK_NOT_FOUND)?;
    let (book, book_instances) = futures::try_join!(
        state.catalog.find_book_detail(id),
        state.catalog.instances_of_book(id)
    )?;
    let book = book.ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

    state.render(View::BookDetail {
        title: book.book.title.clone(),
        book,
        book_instances,
    })
}
