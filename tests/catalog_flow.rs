//! Drives the full router against an in-memory catalog, rendering views as
//! JSON so the test can inspect each page's context.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use local_library::{
    handlers::AppState,
    models::{book::NewBook, book_instance::NewBookInstance, genre::Genre},
    routes,
    services::CatalogService,
    views::RenderMode,
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

async fn catalog() -> CatalogService {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let catalog = CatalogService::new(Arc::new(pool));
    catalog.migrate().await.unwrap();
    catalog
}

async fn harness(mode: RenderMode) -> (Router, CatalogService) {
    let catalog = catalog().await;
    let app = routes::app(AppState::new(catalog.clone(), mode.renderer()));
    (app, catalog)
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn context(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

/// One author, one genre, one book filed under it.
async fn shelved_book(catalog: &CatalogService) -> (Genre, Uuid) {
    let author = catalog
        .create_author("Isaac", "Asimov", None, None)
        .await
        .unwrap();
    let genre = catalog.create_genre("Science Fiction").await.unwrap();
    let book = catalog
        .create_book(&NewBook {
            title: "Foundation".into(),
            author_id: author.id,
            summary: "Psychohistory.".into(),
            isbn: "9780553293357".into(),
            genre_ids: vec![genre.id],
        })
        .await
        .unwrap();
    (genre, book.id)
}

#[tokio::test]
async fn missing_documents_are_not_found() {
    let (app, _catalog) = harness(RenderMode::Json).await;
    let missing = Uuid::new_v4();

    for uri in [
        format!("/catalog/genre/{missing}"),
        format!("/catalog/genre/{missing}/delete"),
        format!("/catalog/genre/{missing}/update"),
        format!("/catalog/bookinstance/{missing}"),
        format!("/catalog/bookinstance/{missing}/delete"),
        format!("/catalog/bookinstance/{missing}/update"),
        format!("/catalog/author/{missing}"),
        format!("/catalog/book/{missing}"),
        "/catalog/genre/not-an-id".to_string(),
    ] {
        let response = get(&app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn genre_list_is_alphabetical() {
    let (app, catalog) = harness(RenderMode::Json).await;
    for name in ["Poetry", "Fantasy", "Mystery"] {
        catalog.create_genre(name).await.unwrap();
    }

    let ctx = context(get(&app, "/catalog/genres").await).await;
    assert_eq!(ctx["template"], "genre_list");
    assert_eq!(ctx["title"], "Genre List");
    let names: Vec<_> = ctx["genre_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Fantasy", "Mystery", "Poetry"]);
}

#[tokio::test]
async fn creating_an_existing_genre_redirects_to_it() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let existing = catalog.create_genre("Fantasy").await.unwrap();

    let response = post_form(&app, "/catalog/genre/create", "name=+Fantasy+").await;
    assert_eq!(location(&response), existing.url());
    assert_eq!(catalog.list_genres().await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn creating_a_new_genre_redirects_to_its_page() {
    let (app, catalog) = harness(RenderMode::Json).await;

    let response = post_form(&app, "/catalog/genre/create", "name=Horror").await;
    let url = location(&response);

    let genre = catalog.find_genre_by_name("Horror").await.unwrap().unwrap();
    assert_eq!(url, genre.url());

    let ctx = context(get(&app, &url).await).await;
    assert_eq!(ctx["template"], "genre_detail");
    assert_eq!(ctx["genre"]["name"], "Horror");
    assert_eq!(ctx["genre_books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn empty_genre_name_re_renders_form() {
    let (app, catalog) = harness(RenderMode::Json).await;

    let ctx = context(post_form(&app, "/catalog/genre/create", "name=+++").await).await;
    assert_eq!(ctx["template"], "genre_form");
    assert_eq!(ctx["title"], "Create Genre");
    assert_eq!(ctx["errors"][0]["param"], "name");
    assert_eq!(ctx["errors"][0]["msg"], "Genre name required");
    assert!(catalog.list_genres().await.unwrap().is_empty());
}

#[tokio::test]
async fn genre_names_are_escaped_on_entry() {
    let (app, catalog) = harness(RenderMode::Json).await;

    let response = post_form(&app, "/catalog/genre/create", "name=Sword+%26+Sorcery").await;
    location(&response);
    let genres = catalog.list_genres().await.unwrap();
    assert_eq!(genres[0].name, "Sword &amp; Sorcery");
}

#[tokio::test]
async fn genre_with_books_is_not_deleted() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let (genre, book_id) = shelved_book(&catalog).await;

    let ctx = context(post_form(&app, &format!("{}/delete", genre.url()), "").await).await;
    assert_eq!(ctx["template"], "genre_delete");
    assert_eq!(ctx["genre_books"][0]["title"], "Foundation");

    assert_eq!(catalog.find_genre(genre.id).await.unwrap(), Some(genre.clone()));
    assert_eq!(catalog.books_in_genre(genre.id).await.unwrap()[0].id, book_id);
}

#[tokio::test]
async fn empty_genre_is_deleted() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let genre = catalog.create_genre("Westerns").await.unwrap();

    let confirm = context(get(&app, &format!("{}/delete", genre.url())).await).await;
    assert_eq!(confirm["template"], "genre_delete");
    assert_eq!(confirm["title"], "Delete Genre");

    let response = post_form(&app, &format!("{}/delete", genre.url()), "").await;
    assert_eq!(location(&response), "/catalog/genres");
    assert_eq!(get(&app, &genre.url()).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn genre_update_renames_in_place() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let genre = catalog.create_genre("Sci-fi").await.unwrap();
    let other = catalog.create_genre("Fantasy").await.unwrap();

    let form = context(get(&app, &format!("{}/update", genre.url())).await).await;
    assert_eq!(form["genre"]["name"], "Sci-fi");

    let response = post_form(&app, &format!("{}/update", genre.url()), "name=Science+Fiction").await;
    assert_eq!(location(&response), genre.url());
    assert_eq!(
        catalog.find_genre(genre.id).await.unwrap().unwrap().name,
        "Science Fiction"
    );

    let clash = context(post_form(&app, &format!("{}/update", genre.url()), "name=Fantasy").await).await;
    assert_eq!(clash["errors"][0]["msg"], "Genre name already exists");
    assert_eq!(catalog.find_genre(other.id).await.unwrap(), Some(other));
}

#[tokio::test]
async fn bookinstance_create_then_detail() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let (_genre, book_id) = shelved_book(&catalog).await;

    let form = context(get(&app, "/catalog/bookinstance/create").await).await;
    assert_eq!(form["book_list"][0]["id"], book_id.to_string());

    let response = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={book_id}&imprint=First+Edition&status=Available"),
    )
    .await;
    let url = location(&response);
    let new_id = url
        .strip_prefix("/catalog/bookinstance/")
        .expect("redirects to the copy's page");
    Uuid::parse_str(new_id).unwrap();

    let ctx = context(get(&app, &url).await).await;
    assert_eq!(ctx["template"], "bookinstance_detail");
    assert_eq!(ctx["title"], "Copy: Foundation");
    assert_eq!(ctx["bookinstance"]["id"], new_id);
    assert_eq!(ctx["bookinstance"]["imprint"], "First Edition");
    assert_eq!(ctx["bookinstance"]["status"], "Available");
    assert_eq!(ctx["bookinstance"]["due_back"], Value::Null);
    assert_eq!(ctx["bookinstance"]["book"]["title"], "Foundation");
}

#[tokio::test]
async fn bookinstance_create_with_unknown_book_keeps_input() {
    let (app, catalog) = harness(RenderMode::Json).await;
    shelved_book(&catalog).await;

    let body = format!("book={}&imprint=Gnome+Press&due_back=", Uuid::new_v4());
    let ctx = context(post_form(&app, "/catalog/bookinstance/create", &body).await).await;

    assert_eq!(ctx["template"], "bookinstance_form");
    assert_eq!(ctx["errors"][0]["param"], "book");
    assert_eq!(ctx["bookinstance"]["imprint"], "Gnome Press");
    assert_eq!(ctx["book_list"].as_array().unwrap().len(), 1);
    assert_eq!(catalog.count_book_instances().await.unwrap(), 0);
}

#[tokio::test]
async fn bookinstance_update_rejects_bad_due_back() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let (_genre, book_id) = shelved_book(&catalog).await;
    let original = catalog
        .create_book_instance(&NewBookInstance {
            book_id,
            imprint: "Gnome Press, 1951".into(),
            status: "Available".into(),
            due_back: None,
        })
        .await
        .unwrap();

    let body = format!("book={book_id}&imprint=Changed&status=Loaned&due_back=not-a-date");
    let ctx = context(post_form(&app, &format!("{}/update", original.url()), &body).await).await;

    assert_eq!(ctx["template"], "bookinstance_form");
    assert_eq!(ctx["title"], "Update BookInstance");
    assert_eq!(ctx["errors"][0]["param"], "due_back");
    assert_eq!(ctx["errors"][0]["msg"], "Invalid date");
    assert_eq!(ctx["bookinstance"]["due_back_input"], "not-a-date");
    assert_eq!(ctx["bookinstance"]["imprint"], "Changed");
    assert_eq!(ctx["book_list"].as_array().unwrap().len(), 1);

    let stored = catalog.find_book_instance(original.id).await.unwrap();
    assert_eq!(stored, Some(original));
}

#[tokio::test]
async fn bookinstance_update_and_delete() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let (_genre, book_id) = shelved_book(&catalog).await;
    let copy = catalog
        .create_book_instance(&NewBookInstance {
            book_id,
            imprint: "Gnome Press, 1951".into(),
            status: "Available".into(),
            due_back: None,
        })
        .await
        .unwrap();

    let form = context(get(&app, &format!("{}/update", copy.url())).await).await;
    assert_eq!(form["selected_book"], book_id.to_string());

    let body = format!("book={book_id}&imprint=Gnome+Press%2C+1951&status=Loaned&due_back=2031-02-03");
    let response = post_form(&app, &format!("{}/update", copy.url()), &body).await;
    assert_eq!(location(&response), copy.url());

    let updated = catalog.find_book_instance(copy.id).await.unwrap().unwrap();
    assert_eq!(updated.status, "Loaned");
    assert_eq!(updated.due_back, chrono::NaiveDate::from_ymd_opt(2031, 2, 3));

    let response = post_form(&app, &format!("{}/delete", copy.url()), "").await;
    assert_eq!(location(&response), "/catalog/bookinstances");
    assert_eq!(get(&app, &copy.url()).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_page_counts_the_catalog() {
    let (app, catalog) = harness(RenderMode::Json).await;
    catalog.seed_demo().await.unwrap();

    let ctx = context(get(&app, "/catalog").await).await;
    assert_eq!(ctx["template"], "index");
    assert_eq!(ctx["counts"]["books"], 5);
    assert_eq!(ctx["counts"]["book_instances"], 10);
    assert_eq!(ctx["counts"]["book_instances_available"], 5);
    assert_eq!(ctx["counts"]["authors"], 3);
    assert_eq!(ctx["counts"]["genres"], 3);
}

async fn html_page(app: &Router, uri: &str) -> String {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"), "{uri}");
    page
}

#[tokio::test]
async fn html_pages_render() {
    let (app, catalog) = harness(RenderMode::Html).await;
    catalog.seed_demo().await.unwrap();

    let genre = catalog.list_genres().await.unwrap().remove(0);
    let copy = catalog.list_book_instances().await.unwrap().remove(0);
    let author = catalog.list_authors().await.unwrap().remove(0);
    let book = catalog.list_books().await.unwrap().remove(0);

    let uris = [
        "/catalog".to_string(),
        "/catalog/books".to_string(),
        "/catalog/authors".to_string(),
        "/catalog/genres".to_string(),
        "/catalog/bookinstances".to_string(),
        "/catalog/genre/create".to_string(),
        "/catalog/bookinstance/create".to_string(),
        genre.url(),
        format!("{}/update", genre.url()),
        format!("{}/delete", genre.url()),
        copy.url(),
        format!("{}/update", copy.url()),
        format!("{}/delete", copy.url()),
        author.url(),
        book.url(),
    ];
    for uri in &uris {
        let page = html_page(&app, uri).await;
        assert!(!page.contains("&amp;#x"), "{uri} escapes stored text twice");
    }

    let books = html_page(&app, "/catalog/books").await;
    assert!(books.contains("The Wise Man&#x27;s Fear"));

    let missing = get(&app, &format!("/catalog/book/{}", Uuid::new_v4())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn html_copy_page_shows_escaped_imprint_once() {
    let (app, catalog) = harness(RenderMode::Html).await;
    let (_genre, book_id) = shelved_book(&catalog).await;

    let body = format!("book={book_id}&imprint=O%27Reilly+%3CFirst%3E&status=Available");
    let response = post_form(&app, "/catalog/bookinstance/create", &body).await;
    let url = location(&response);

    let page = html_page(&app, &url).await;
    assert!(page.contains("O&#x27;Reilly &lt;First&gt;"));
    assert!(!page.contains("&amp;"));
}

#[tokio::test]
async fn genre_update_with_blank_name_keeps_stored_genre() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let genre = catalog.create_genre("Horror").await.unwrap();

    let ctx = context(post_form(&app, &format!("{}/update", genre.url()), "name=++").await).await;
    assert_eq!(ctx["template"], "genre_form");
    assert_eq!(ctx["title"], "Update Genre");
    assert_eq!(ctx["errors"][0]["param"], "name");
    assert_eq!(ctx["errors"][0]["msg"], "Genre name required");
    assert_eq!(ctx["genre"]["id"], genre.id.to_string());

    assert_eq!(catalog.find_genre(genre.id).await.unwrap(), Some(genre));
}

#[tokio::test]
async fn updating_missing_documents_is_not_found() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let (_genre, book_id) = shelved_book(&catalog).await;
    let missing = Uuid::new_v4();

    let response = post_form(&app, &format!("/catalog/genre/{missing}/update"), "name=Horror").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(catalog.find_genre_by_name("Horror").await.unwrap().is_none());

    let body = format!("book={book_id}&imprint=Gnome+Press&status=Available");
    let response = post_form(&app, &format!("/catalog/bookinstance/{missing}/update"), &body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(catalog.count_book_instances().await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_absent_documents_redirects_to_list() {
    let (app, catalog) = harness(RenderMode::Json).await;
    let kept = catalog.create_genre("Fantasy").await.unwrap();
    let missing = Uuid::new_v4();

    let response = post_form(&app, &format!("/catalog/genre/{missing}/delete"), "").await;
    assert_eq!(location(&response), "/catalog/genres");

    let response = post_form(&app, &format!("/catalog/bookinstance/{missing}/delete"), "").await;
    assert_eq!(location(&response), "/catalog/bookinstances");

    assert_eq!(catalog.list_genres().await.unwrap(), vec![kept]);
}

#[tokio::test]
async fn probes_report_ok() {
    let (app, _catalog) = harness(RenderMode::Json).await;

    assert_eq!(get(&app, "/healthz").await.status(), StatusCode::OK);
    let ready = context(get(&app, "/readyz").await).await;
    assert_eq!(ready["checks"]["sqlite"]["ok"], true);

    let response = get(&app, "/").await;
    assert_eq!(location(&response), "/catalog");
}
