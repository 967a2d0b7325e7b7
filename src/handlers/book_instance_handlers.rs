//! Book copy pages: list, detail, create, delete, update.

use super::{AppState, parse_id, redirect};
use crate::{
    errors::AppError,
    models::book_instance::{BookInstanceDraft, book_instance_url},
    validation::{BOOK_REQUIRED, BookInstanceForm, Checked, FieldError},
    views::View,
};
use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::Response,
};
use tracing::info;
use uuid::Uuid;

const COPY_NOT_FOUND: &str = "Book copy not found";
const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

/// GET `/catalog/bookinstances`
pub async fn bookinstance_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let bookinstance_list = state.catalog.list_book_instances().await?;
    state.render(View::BookInstanceList {
        title: "Book Instance List".into(),
        bookinstance_list,
    })
}

/// GET `/catalog/bookinstance/{id}`
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let bookinstance = state
        .catalog
        .find_populated_book_instance(id)
        .await?
        .ok_or_else(|| AppError::not_found(COPY_NOT_FOUND))?;

    state.render(View::BookInstanceDetail {
        title: format!("Copy: {}", bookinstance.book.title),
        bookinstance,
    })
}

/// GET `/catalog/bookinstance/create`
pub async fn bookinstance_create_get(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let book_list = state.catalog.book_titles().await?;
    state.render(View::BookInstanceForm {
        title: "Create BookInstance".into(),
        book_list,
        selected_book: None,
        bookinstance: None,
        errors: Vec::new(),
    })
}

/// POST `/catalog/bookinstance/create`
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    form: Result<Form<BookInstanceForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let mut checked = form.check(None);
    let book_id = resolve_book(&state, &form, &mut checked).await?;

    let Some(book_id) = book_id.filter(|_| checked.is_valid()) else {
        return render_form(&state, "Create BookInstance", checked).await;
    };

    let instance = state
        .catalog
        .create_book_instance(&checked.draft.to_new(book_id))
        .await?;
    info!(bookinstance_id = %instance.id, "created book copy");
    Ok(redirect(&instance.url()))
}

/// GET `/catalog/bookinstance/{id}/delete`
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let bookinstance = state
        .catalog
        .find_populated_book_instance(id)
        .await?
        .ok_or_else(|| AppError::not_found(COPY_NOT_FOUND))?;

    state.render(View::BookInstanceDelete {
        title: format!("Delete Copy: {}", bookinstance.book.title),
        bookinstance,
    })
}

/// POST `/catalog/bookinstance/{id}/delete`
///
/// Copies have no dependents, so deletion is unconditional.
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    if state.catalog.delete_book_instance(id).await? {
        info!(bookinstance_id = %id, "deleted book copy");
    }
    Ok(redirect(BOOK_INSTANCE_LIST_URL))
}

/// GET `/catalog/bookinstance/{id}/update`
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let (instance, book_list) = futures::try_join!(
        state.catalog.find_book_instance(id),
        state.catalog.book_titles()
    )?;
    let instance = instance.ok_or_else(|| AppError::not_found(COPY_NOT_FOUND))?;

    state.render(View::BookInstanceForm {
        title: "Update BookInstance".into(),
        book_list,
        selected_book: Some(instance.book_id.to_string()),
        bookinstance: Some(BookInstanceDraft::from(&instance)),
        errors: Vec::new(),
    })
}

/// POST `/catalog/bookinstance/{id}/update`
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<BookInstanceForm>, FormRejection>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, COPY_NOT_FOUND)?;
    let Form(form) = form?;
    let mut checked = form.check(Some(id));
    let book_id = resolve_book(&state, &form, &mut checked).await?;

    let Some(book_id) = book_id.filter(|_| checked.is_valid()) else {
        return render_form(&state, "Update BookInstance", checked).await;
    };

    let instance = state
        .catalog
        .update_book_instance(id, &checked.draft.to_new(book_id))
        .await?
        .ok_or_else(|| AppError::not_found(COPY_NOT_FOUND))?;
    info!(bookinstance_id = %id, "updated book copy");
    Ok(redirect(&book_instance_url(instance.id)))
}

/// Resolve the submitted `book` field to an existing book.
///
/// Records a field error when the value names no book. A blank value
/// already carries its own error and is not looked up.
async fn resolve_book(
    state: &AppState,
    form: &BookInstanceForm,
    checked: &mut Checked<BookInstanceDraft>,
) -> Result<Option<Uuid>, AppError> {
    if checked.errors.iter().any(|e| e.param == "book") {
        return Ok(None);
    }
    if let Some(book_id) = checked.draft.book_id() {
        if state.catalog.book_exists(book_id).await? {
            return Ok(Some(book_id));
        }
    }
    checked
        .errors
        .push(FieldError::new("book", BOOK_REQUIRED, form.book.clone()));
    Ok(None)
}

/// Re-render the copy form with the book list, submitted values, and errors.
async fn render_form(
    state: &AppState,
    title: &str,
    checked: Checked<BookInstanceDraft>,
) -> Result<Response, AppError> {
    let book_list = state.catalog.book_titles().await?;
    state.render(View::BookInstanceForm {
        title: title.to_string(),
        book_list,
        selected_book: Some(checked.draft.book.clone()),
        bookinstance: Some(checked.draft),
        errors: checked.errors,
    })
}
