//! Request handlers.
//!
//! Every handler follows the same shape: decode the request, gather data
//! (concurrently when two reads are independent), then either render one
//! view or redirect to a canonical URL.

pub mod book_instance_handlers;
pub mod catalog_handlers;
pub mod genre_handlers;
pub mod health_handlers;

use crate::{
    errors::AppError,
    services::CatalogService,
    views::{View, ViewRenderer},
};
use axum::{
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use uuid::Uuid;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub views: Arc<dyn ViewRenderer>,
}

impl AppState {
    pub fn new(catalog: CatalogService, views: Arc<dyn ViewRenderer>) -> Self {
        Self { catalog, views }
    }

    /// Render a finished view as the response body.
    pub fn render(&self, view: View) -> Result<Response, AppError> {
        let body = self.views.render(&view)?;
        tracing::debug!(template = view.template_name(), "rendered view");
        Ok(([(header::CONTENT_TYPE, self.views.content_type())], body).into_response())
    }
}

/// Parse a path identifier. Anything that is not a UUID cannot name a
/// document, so it is reported the same way as a missing one.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found))
}

pub(crate) fn redirect(url: &str) -> Response {
    Redirect::to(url).into_response()
}
