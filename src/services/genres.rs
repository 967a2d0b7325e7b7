use super::{CatalogError, CatalogResult, CatalogService, is_unique_violation};
use crate::models::{book::Book, genre::Genre};
use tracing::debug;
use uuid::Uuid;

impl CatalogService {
    /// All genres, alphabetical by name.
    pub async fn list_genres(&self) -> CatalogResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&*self.db)
            .await?;
        Ok(genres)
    }

    pub async fn find_genre(&self, id: Uuid) -> CatalogResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.db)
            .await?;
        Ok(genre)
    }

    /// Case-sensitive exact match on the stored (escaped) name.
    pub async fn find_genre_by_name(&self, name: &str) -> CatalogResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = ?")
            .bind(name)
            .fetch_optional(&*self.db)
            .await?;
        Ok(genre)
    }

    /// Books filed under a genre, by title.
    pub async fn books_in_genre(&self, genre_id: Uuid) -> CatalogResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT b.id, b.title, b.author_id, b.summary, b.isbn
             FROM books b
             JOIN book_genres bg ON bg.book_id = b.id
             WHERE bg.genre_id = ?
             ORDER BY b.title ASC",
        )
        .bind(genre_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(books)
    }

    /// Insert a genre. Returns DuplicateGenre if the name is taken.
    pub async fn create_genre(&self, name: &str) -> CatalogResult<Genre> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };

        match sqlx::query("INSERT INTO genres (id, name) VALUES (?, ?)")
            .bind(genre.id)
            .bind(&genre.name)
            .execute(&*self.db)
            .await
        {
            Ok(_) => Ok(genre),
            Err(err) if is_unique_violation(&err) => {
                Err(CatalogError::DuplicateGenre(name.to_string()))
            }
            Err(err) => Err(CatalogError::Sqlx(err)),
        }
    }

    /// Insert a genre, or return the one that took the name first.
    ///
    /// Covers a concurrent create slipping in between a name lookup and the
    /// insert; the second flag is `false` when the existing genre is returned.
    pub async fn create_genre_or_existing(&self, name: &str) -> CatalogResult<(Genre, bool)> {
        match self.create_genre(name).await {
            Ok(genre) => Ok((genre, true)),
            Err(CatalogError::DuplicateGenre(taken)) => {
                debug!(name = %taken, "genre name already taken; using existing");
                match self.find_genre_by_name(&taken).await? {
                    Some(existing) => Ok((existing, false)),
                    None => Err(CatalogError::DuplicateGenre(taken)),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Rename a genre in place. `None` when no genre has this id.
    pub async fn update_genre(&self, id: Uuid, name: &str) -> CatalogResult<Option<Genre>> {
        match sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = ? WHERE id = ? RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&*self.db)
        .await
        {
            Ok(genre) => Ok(genre),
            Err(err) if is_unique_violation(&err) => {
                Err(CatalogError::DuplicateGenre(name.to_string()))
            }
            Err(err) => Err(CatalogError::Sqlx(err)),
        }
    }

    /// Remove a genre. Returns whether a row was deleted.
    ///
    /// Callers check `books_in_genre` first; the foreign key on `book_genres`
    /// rejects the delete if a book still references the genre.
    pub async fn delete_genre(&self, id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_genres(&self) -> CatalogResult<i64> {
        self.count_rows("genres").await
    }
}
