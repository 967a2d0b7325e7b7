use super::{CatalogResult, CatalogService};
use crate::models::{
    author::Author,
    book::{Book, BookDetail, BookListing, BookTitle, NewBook},
    genre::Genre,
};
use uuid::Uuid;

impl CatalogService {
    /// Title projection of every book, for form option lists.
    pub async fn book_titles(&self) -> CatalogResult<Vec<BookTitle>> {
        let titles =
            sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title ASC")
                .fetch_all(&*self.db)
                .await?;
        Ok(titles)
    }

    pub async fn book_exists(&self, id: Uuid) -> CatalogResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE id = ?")
            .bind(id)
            .fetch_one(&*self.db)
            .await?;
        Ok(found > 0)
    }

    /// Every book populated with its author's name, by title.
    pub async fn list_books(&self) -> CatalogResult<Vec<BookListing>> {
        let books = sqlx::query_as::<_, BookListing>(
            "SELECT b.id, b.title, b.author_id,
                    a.first_name AS author_first_name,
                    a.family_name AS author_family_name
             FROM books b
             JOIN authors a ON a.id = b.author_id
             ORDER BY b.title ASC",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(books)
    }

    /// A book populated with its author and genres.
    pub async fn find_book_detail(&self, id: Uuid) -> CatalogResult<Option<BookDetail>> {
        let Some(book) = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        else {
            return Ok(None);
        };

        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death
             FROM authors WHERE id = ?",
        )
        .bind(book.author_id)
        .fetch_one(&*self.db)
        .await?;

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name
             FROM genres g
             JOIN book_genres bg ON bg.genre_id = g.id
             WHERE bg.book_id = ?
             ORDER BY g.name ASC",
        )
        .bind(id)
        .fetch_all(&*self.db)
        .await?;

        Ok(Some(BookDetail {
            book,
            author,
            genres,
        }))
    }

    pub async fn books_by_author(&self, author_id: Uuid) -> CatalogResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn
             FROM books WHERE author_id = ? ORDER BY title ASC",
        )
        .bind(author_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(books)
    }

    /// Insert a book and file it under its genres in one transaction.
    pub async fn create_book(&self, new: &NewBook) -> CatalogResult<Book> {
        let mut tx = self.db.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (id, title, author_id, summary, isbn)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, title, author_id, summary, isbn",
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(new.author_id)
        .bind(&new.summary)
        .bind(&new.isbn)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &new.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
                .bind(book.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    pub async fn count_books(&self) -> CatalogResult<i64> {
        self.count_rows("books").await
    }
}
