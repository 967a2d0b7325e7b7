//! HTML pages, built with maud.
//!
//! Text that came out of the catalog was HTML-escaped when it was accepted,
//! so it is emitted with `stored` instead of being escaped a second time.
//! Everything else goes through maud's normal escaping.

use super::{View, ViewError, ViewRenderer};
use crate::{
    models::{
        book_instance::{BookInstance, STATUSES},
        book::Book,
    },
    validation::FieldError,
};
use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, PreEscaped, html};

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &View) -> Result<String, ViewError> {
        let title = html! { (stored(view.title())) };
        Ok(layout(title, body(view)).into_string())
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }
}

/// Generic failure page used by the error handler.
pub fn error_page(message: &str, status: StatusCode) -> String {
    let content = html! {
        h2 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
        p { (message) }
    };
    layout(html! { (message) }, content).into_string()
}

fn stored(value: &str) -> PreEscaped<&str> {
    PreEscaped(value)
}

/// Page titles are built from fixed text and stored catalog text.
fn layout(title: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                        li { a href="/catalog/authors" { "All authors" } }
                        li { a href="/catalog/genres" { "All genres" } }
                        li { a href="/catalog/bookinstances" { "All book-instances" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/genre/create" { "Create new genre" } }
                        li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn errors_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li data-field=(error.param) { (error.msg) }
                }
            }
        }
    }
}

fn books_list(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

fn status_line(instance: &BookInstance) -> Markup {
    html! {
        span class=(format!("status {}", instance.status.to_lowercase())) { (stored(&instance.status)) }
        @if instance.status != "Available" {
            @if let Some(due) = instance.due_back {
                " (Due: " (due.format("%b %e, %Y").to_string()) ")"
            }
        }
    }
}

fn body(view: &View) -> Markup {
    match view {
        View::Index { counts, .. } => html! {
            p { "Welcome to the Local Library." }
            h2 { "Dynamic content" }
            ul {
                li { strong { "Books: " } (counts.books) }
                li { strong { "Copies: " } (counts.book_instances) }
                li { strong { "Copies available: " } (counts.book_instances_available) }
                li { strong { "Authors: " } (counts.authors) }
                li { strong { "Genres: " } (counts.genres) }
            }
        },
        View::GenreList { genre_list, .. } => html! {
            ul {
                @for genre in genre_list {
                    li { a href=(genre.url()) { (stored(&genre.name)) } }
                }
                @if genre_list.is_empty() {
                    li { "There are no genres." }
                }
            }
        },
        View::GenreDetail { genre, genre_books, .. } => html! {
            h2 { "Genre: " (stored(&genre.name)) }
            h3 { "Books" }
            @if genre_books.is_empty() {
                p { "This genre has no books." }
            } @else {
                (books_list(genre_books))
            }
            hr;
            p { a href=(format!("{}/delete", genre.url())) { "Delete genre" } }
            p { a href=(format!("{}/update", genre.url())) { "Update genre" } }
        },
        View::GenreForm { genre, errors, .. } => html! {
            form method="POST" action="" {
                label for="name" { "Genre:" }
                input #name type="text" name="name" placeholder="Fantasy, Poetry etc."
                    required value=(stored(genre.as_ref().map(|g| g.name.as_str()).unwrap_or("")));
                button type="submit" { "Submit" }
            }
            (errors_list(errors))
        },
        View::GenreDelete { genre, genre_books, .. } => html! {
            h2 { "Genre: " (stored(&genre.name)) }
            @if genre_books.is_empty() {
                p { "Do you really want to delete this genre?" }
                form method="POST" action="" {
                    input type="hidden" name="genreid" value=(genre.id.to_string());
                    button type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                h4 { "Books" }
                (books_list(genre_books))
            }
        },
        View::BookInstanceList { bookinstance_list, .. } => html! {
            ul {
                @for populated in bookinstance_list {
                    li {
                        a href=(populated.url()) {
                            (stored(&populated.book.title)) " : " (stored(&populated.instance.imprint))
                        }
                        " - " (status_line(&populated.instance))
                    }
                }
                @if bookinstance_list.is_empty() {
                    li { "There are no book copies in this library." }
                }
            }
        },
        View::BookInstanceDetail { bookinstance, .. } => html! {
            p { "ID: " (bookinstance.instance.id.to_string()) }
            p {
                strong { "Title: " }
                a href=(bookinstance.book.url()) { (stored(&bookinstance.book.title)) }
            }
            p { strong { "Imprint: " } (stored(&bookinstance.instance.imprint)) }
            p { strong { "Status: " } (status_line(&bookinstance.instance)) }
            hr;
            p { a href=(format!("{}/delete", bookinstance.url())) { "Delete copy" } }
            p { a href=(format!("{}/update", bookinstance.url())) { "Update copy" } }
        },
        View::BookInstanceForm { book_list, selected_book, bookinstance, errors, .. } => {
            let draft = bookinstance.clone().unwrap_or_default();
            let selected = selected_book.as_deref().unwrap_or(draft.book.as_str());
            html! {
                form method="POST" action="" {
                    label for="book" { "Book:" }
                    select #book name="book" required {
                        @for book in book_list {
                            option value=(book.id.to_string()) selected[book.id.to_string() == selected] {
                                (stored(&book.title))
                            }
                        }
                    }
                    label for="imprint" { "Imprint:" }
                    input #imprint type="text" name="imprint" placeholder="Publisher and date information"
                        required value=(stored(&draft.imprint));
                    label for="due_back" { "Date when book available:" }
                    input #due_back type="date" name="due_back" value=(draft.due_back_input);
                    label for="status" { "Status:" }
                    select #status name="status" {
                        @for status in STATUSES {
                            option value=(status) selected[draft.status == status] { (status) }
                        }
                    }
                    button type="submit" { "Submit" }
                }
                (errors_list(errors))
            }
        }
        View::BookInstanceDelete { bookinstance, .. } => html! {
            p { "Do you really want to delete this copy?" }
            p { strong { "ID: " } (bookinstance.instance.id.to_string()) }
            p {
                strong { "Title: " }
                a href=(bookinstance.book.url()) { (stored(&bookinstance.book.title)) }
            }
            p { strong { "Imprint: " } (stored(&bookinstance.instance.imprint)) }
            p { strong { "Status: " } (status_line(&bookinstance.instance)) }
            form method="POST" action="" {
                input type="hidden" name="bookinstanceid" value=(bookinstance.instance.id.to_string());
                button type="submit" { "Delete" }
            }
        },
        View::AuthorList { author_list, .. } => html! {
            ul {
                @for author in author_list {
                    li {
                        a href=(author.url()) { (stored(&author.name())) }
                        " (" (author.date_range()) ")"
                    }
                }
                @if author_list.is_empty() {
                    li { "There are no authors." }
                }
            }
        },
        View::AuthorDetail { author, author_books, .. } => html! {
            h2 { (stored(&author.name())) }
            p {
                (author.date_range())
                @if let Some(years) = author.lifespan() {
                    " (" (years) " years)"
                }
            }
            h3 { "Books" }
            @if author_books.is_empty() {
                p { "This author has no books." }
            } @else {
                (books_list(author_books))
            }
        },
        View::BookList { book_list, .. } => html! {
            ul {
                @for book in book_list {
                    li {
                        a href=(book.url()) { (stored(&book.title)) }
                        " (" (stored(&book.author_name())) ")"
                    }
                }
                @if book_list.is_empty() {
                    li { "There are no books." }
                }
            }
        },
        View::BookDetail { book, book_instances, .. } => html! {
            h2 { "Title: " (stored(&book.book.title)) }
            p {
                strong { "Author: " }
                a href=(book.author.url()) { (stored(&book.author.name())) }
            }
            p { strong { "Summary: " } (stored(&book.book.summary)) }
            p { strong { "ISBN: " } (stored(&book.book.isbn)) }
            p {
                strong { "Genre: " }
                @for (i, genre) in book.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(genre.url()) { (stored(&genre.name)) }
                }
            }
            h3 { "Copies" }
            @for instance in book_instances {
                hr;
                p { (status_line(instance)) }
                p { strong { "Imprint: " } (stored(&instance.imprint)) }
                p { strong { "Id: " } a href=(instance.url()) { (instance.id.to_string()) } }
            }
            @if book_instances.is_empty() {
                p { "There are no copies of this book in the library." }
            }
        },
    }
}
