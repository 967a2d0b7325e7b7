//! Route table.
//!
//! ## Structure
//! - `GET /healthz`, `GET /readyz`: probes (mounted at root)
//! - `GET /`: redirects to the catalog home
//! - Under `/catalog`:
//!   - `GET  /genres`, `GET /bookinstances`, `GET /authors`, `GET /books`: lists
//!   - `GET  /<entity>/{id}`: detail
//!   - `GET|POST /<entity>/create`: genre and bookinstance only
//!   - `GET|POST /<entity>/{id}/delete`, `GET|POST /<entity>/{id}/update`: same

use crate::handlers::{
    AppState,
    book_instance_handlers::{
        bookinstance_create_get, bookinstance_create_post, bookinstance_delete_get,
        bookinstance_delete_post, bookinstance_detail, bookinstance_list,
        bookinstance_update_get, bookinstance_update_post,
    },
    catalog_handlers::{author_detail, author_list, book_detail, book_list, index},
    genre_handlers::{
        genre_create_get, genre_create_post, genre_delete_get, genre_delete_post, genre_detail,
        genre_list, genre_update_get, genre_update_post,
    },
    health_handlers::{healthz, readyz},
};
use axum::{
    Router,
    response::Redirect,
    routing::get,
};
use tower_http::trace::TraceLayer;

/// Build the full application router with its shared state attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .nest("/catalog", catalog_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Genres
        .route("/genres", get(genre_list))
        .route("/genre/create", get(genre_create_get).post(genre_create_post))
        .route("/genre/{id}", get(genre_detail))
        .route(
            "/genre/{id}/delete",
            get(genre_delete_get).post(genre_delete_post),
        )
        .route(
            "/genre/{id}/update",
            get(genre_update_get).post(genre_update_post),
        )
        // Book copies
        .route("/bookinstances", get(bookinstance_list))
        .route(
            "/bookinstance/create",
            get(bookinstance_create_get).post(bookinstance_create_post),
        )
        .route("/bookinstance/{id}", get(bookinstance_detail))
        .route(
            "/bookinstance/{id}/delete",
            get(bookinstance_delete_get).post(bookinstance_delete_post),
        )
        .route(
            "/bookinstance/{id}/update",
            get(bookinstance_update_get).post(bookinstance_update_post),
        )
        // Authors and books
        .route("/authors", get(author_list))
        .route("/author/{id}", get(author_detail))
        .route("/books", get(book_list))
        .route("/book/{id}", get(book_detail))
}
