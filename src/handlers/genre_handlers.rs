//! Genre pages: list, detail, create, delete, update.

use super::{AppState, parse_id, redirect};
use crate::{
    errors::AppError,
    models::genre::GenreDraft,
    services::CatalogError,
    validation::{FieldError, GENRE_NAME_TAKEN, GenreForm},
    views::View,
};
use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::Response,
};
use tracing::info;

const GENRE_NOT_FOUND: &str = "Genre not found";
const GENRE_LIST_URL: &str = "/catalog/genres";

/// GET `/catalog/genres`
pub async fn genre_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let genre_list = state.catalog.list_genres().await?;
    state.render(View::GenreList {
        title: "Genre List".into(),
        genre_list,
    })
}

/// GET `/catalog/genre/{id}`: the genre and every book filed under it.
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, GENRE_NOT_FOUND)?;
    let (genre, genre_books) = futures::try_join!(
        state.catalog.find_genre(id),
        state.catalog.books_in_genre(id)
    )?;
    let genre = genre.ok_or_else(|| AppError::not_found(GENRE_NOT_FOUND))?;

    state.render(View::GenreDetail {
        title: "Genre Detail".into(),
        genre,
        genre_books,
    })
}

/// GET `/catalog/genre/create`
pub async fn genre_create_get(State(state): State<AppState>) -> Result<Response, AppError> {
    state.render(View::GenreForm {
        title: "Create Genre".into(),
        genre: None,
        errors: Vec::new(),
    })
}

/// POST `/catalog/genre/create`
///
/// Creating a name that already exists redirects to the existing genre.
pub async fn genre_create_post(
    State(state): State<AppState>,
    form: Result<Form<GenreForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let checked = form.check(None);
    if !checked.is_valid() {
        return state.render(View::GenreForm {
            title: "Create Genre".into(),
            genre: Some(checked.draft),
            errors: checked.errors,
        });
    }

    let name = checked.draft.name;
    if let Some(existing) = state.catalog.find_genre_by_name(&name).await? {
        return Ok(redirect(&existing.url()));
    }

    let (genre, created) = state.catalog.create_genre_or_existing(&name).await?;
    if created {
        info!(genre_id = %genre.id, "created genre");
    }
    Ok(redirect(&genre.url()))
}

/// GET `/catalog/genre/{id}/delete`
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, GENRE_NOT_FOUND)?;
    let (genre, genre_books) = futures::try_join!(
        state.catalog.find_genre(id),
        state.catalog.books_in_genre(id)
    )?;
    let genre = genre.ok_or_else(|| AppError::not_found(GENRE_NOT_FOUND))?;

    state.render(View::GenreDelete {
        title: "Delete Genre".into(),
        genre,
        genre_books,
    })
}

/// POST `/catalog/genre/{id}/delete`
///
/// Refused while any book is still filed under the genre.
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, GENRE_NOT_FOUND)?;
    let (genre, genre_books) = futures::try_join!(
        state.catalog.find_genre(id),
        state.catalog.books_in_genre(id)
    )?;

    let Some(genre) = genre else {
        return Ok(redirect(GENRE_LIST_URL));
    };

    if !genre_books.is_empty() {
        info!(genre_id = %id, books = genre_books.len(), "genre still has books; not deleting");
        return state.render(View::GenreDelete {
            title: "Delete Genre".into(),
            genre,
            genre_books,
        });
    }

    state.catalog.delete_genre(id).await?;
    info!(genre_id = %id, "deleted genre");
    Ok(redirect(GENRE_LIST_URL))
}

/// GET `/catalog/genre/{id}/update`
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, GENRE_NOT_FOUND)?;
    let genre = state
        .catalog
        .find_genre(id)
        .await?
        .ok_or_else(|| AppError::not_found(GENRE_NOT_FOUND))?;

    state.render(View::GenreForm {
        title: "Update Genre".into(),
        genre: Some(GenreDraft::from(&genre)),
        errors: Vec::new(),
    })
}

/// POST `/catalog/genre/{id}/update`
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<GenreForm>, FormRejection>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, GENRE_NOT_FOUND)?;
    let Form(form) = form?;
    let checked = form.check(Some(id));
    if !checked.is_valid() {
        return state.render(View::GenreForm {
            title: "Update Genre".into(),
            genre: Some(checked.draft),
            errors: checked.errors,
        });
    }

    let updated = state.catalog.update_genre(id, &checked.draft.name).await;
    match updated {
        Ok(Some(genre)) => Ok(redirect(&genre.url())),
        Ok(None) => Err(AppError::not_found(GENRE_NOT_FOUND)),
        Err(CatalogError::DuplicateGenre(_)) => state.render(View::GenreForm {
            title: "Update Genre".into(),
            errors: vec![FieldError::new("name", GENRE_NAME_TAKEN, form.name.clone())],
            genre: Some(checked.draft),
        }),
        Err(err) => Err(err.into()),
    }
}
