use crate::{services::CatalogError, views::ViewError};
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

/// What went wrong, independent of the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The addressed document does not exist.
    NotFound,
    /// Storage or rendering failed.
    Infrastructure,
    /// The request body could not be decoded at all.
    Validation,
}

/// Error returned by request handlers and rendered as the error page.
#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Infrastructure, msg)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, msg)
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.kind {
            ErrorKind::Infrastructure => {
                tracing::error!(status = status.as_u16(), error = %self.message, "request failed")
            }
            _ => tracing::warn!(status = status.as_u16(), error = %self.message, "request rejected"),
        }

        let body = crate::views::html::error_page(&self.message, status);
        (status, Html(body)).into_response()
    }
}

/// Shown in place of storage and rendering failures; the detail is logged.
pub const INTERNAL_MESSAGE: &str = "Something went wrong while loading this page";

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        tracing::error!(error = %err, "catalog query failed");
        AppError::internal(INTERNAL_MESSAGE)
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        tracing::error!(error = %err, "view rendering failed");
        AppError::internal(INTERNAL_MESSAGE)
    }
}

impl From<FormRejection> for AppError {
    fn from(err: FormRejection) -> Self {
        AppError::validation(err.body_text())
    }
}
