use super::{CatalogResult, CatalogService};
use crate::models::book_instance::{
    BookInstance, NewBookInstance, PopulatedBookInstance, PopulatedBookInstanceRow,
};
use uuid::Uuid;

const POPULATED_SELECT: &str = "SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
        b.title AS book_title
 FROM book_instances bi
 JOIN books b ON b.id = bi.book_id";

impl CatalogService {
    /// Every copy, populated with its book title.
    pub async fn list_book_instances(&self) -> CatalogResult<Vec<PopulatedBookInstance>> {
        let rows = sqlx::query_as::<_, PopulatedBookInstanceRow>(&format!(
            "{} ORDER BY b.title ASC, bi.imprint ASC",
            POPULATED_SELECT
        ))
        .fetch_all(&*self.db)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_book_instance(&self, id: Uuid) -> CatalogResult<Option<BookInstance>> {
        let instance = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(instance)
    }

    pub async fn find_populated_book_instance(
        &self,
        id: Uuid,
    ) -> CatalogResult<Option<PopulatedBookInstance>> {
        let row = sqlx::query_as::<_, PopulatedBookInstanceRow>(&format!(
            "{} WHERE bi.id = ?",
            POPULATED_SELECT
        ))
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Copies of one book.
    pub async fn instances_of_book(&self, book_id: Uuid) -> CatalogResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back
             FROM book_instances WHERE book_id = ? ORDER BY imprint ASC",
        )
        .bind(book_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(instances)
    }

    pub async fn create_book_instance(&self, new: &NewBookInstance) -> CatalogResult<BookInstance> {
        let instance = sqlx::query_as::<_, BookInstance>(
            "INSERT INTO book_instances (id, book_id, imprint, status, due_back)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, book_id, imprint, status, due_back",
        )
        .bind(Uuid::new_v4())
        .bind(new.book_id)
        .bind(&new.imprint)
        .bind(&new.status)
        .bind(new.due_back)
        .fetch_one(&*self.db)
        .await?;
        Ok(instance)
    }

    /// Replace a copy's fields in place. `None` when no copy has this id.
    pub async fn update_book_instance(
        &self,
        id: Uuid,
        new: &NewBookInstance,
    ) -> CatalogResult<Option<BookInstance>> {
        let instance = sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances
             SET book_id = ?, imprint = ?, status = ?, due_back = ?
             WHERE id = ?
             RETURNING id, book_id, imprint, status, due_back",
        )
        .bind(new.book_id)
        .bind(&new.imprint)
        .bind(&new.status)
        .bind(new.due_back)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(instance)
    }

    /// Remove a copy. Returns whether a row was deleted.
    pub async fn delete_book_instance(&self, id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_book_instances(&self) -> CatalogResult<i64> {
        self.count_rows("book_instances").await
    }

    pub async fn count_book_instances_with_status(&self, status: &str) -> CatalogResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances WHERE status = ?")
                .bind(status)
                .fetch_one(&*self.db)
                .await?;
        Ok(count)
    }
}
