use super::{CatalogResult, CatalogService};
use crate::models::author::Author;
use chrono::NaiveDate;
use uuid::Uuid;

impl CatalogService {
    /// All authors by family name, then first name.
    pub async fn list_authors(&self) -> CatalogResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death
             FROM authors ORDER BY family_name ASC, first_name ASC",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(authors)
    }

    pub async fn find_author(&self, id: Uuid) -> CatalogResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death
             FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(author)
    }

    pub async fn create_author(
        &self,
        first_name: &str,
        family_name: &str,
        date_of_birth: Option<NaiveDate>,
        date_of_death: Option<NaiveDate>,
    ) -> CatalogResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, first_name, family_name, date_of_birth, date_of_death",
        )
        .bind(Uuid::new_v4())
        .bind(first_name)
        .bind(family_name)
        .bind(date_of_birth)
        .bind(date_of_death)
        .fetch_one(&*self.db)
        .await?;
        Ok(author)
    }

    pub async fn count_authors(&self) -> CatalogResult<i64> {
        self.count_rows("authors").await
    }
}
