//! CatalogService: data access for the library catalog.
//!
//! A thin layer over SQLite: every operation is one query (or one short
//! transaction) returning either the documents, `None` for an absent
//! document, or a `CatalogError`. Handlers decide what absence means.

mod authors;
mod book_instances;
mod books;
mod genres;
mod seed;

use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Schema applied by `--migrate` and by the test harness.
const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("genre `{0}` already exists")]
    DuplicateGenre(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Record counts shown on the catalog home page.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

pub use seed::SeedReport;

/// Shared handle to the catalog database.
#[derive(Clone)]
pub struct CatalogService {
    /// SQLite pool used for all catalog queries.
    pub db: Arc<SqlitePool>,
}

impl CatalogService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Apply the embedded schema. Every statement is idempotent.
    pub async fn migrate(&self) -> CatalogResult<()> {
        let statements = SCHEMA
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        tracing::info!("Running {} migration statements...", statements.len());

        for stmt in statements {
            debug!("Executing migration SQL: {}", stmt);
            sqlx::query(stmt).execute(&*self.db).await?;
        }
        Ok(())
    }

    /// All home-page counts, fetched concurrently.
    pub async fn counts(&self) -> CatalogResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = futures::try_join!(
            self.count_books(),
            self.count_book_instances(),
            self.count_book_instances_with_status("Available"),
            self.count_authors(),
            self.count_genres(),
        )?;
        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    /// Row count for one of the catalog tables.
    async fn count_rows(&self, table: &'static str) -> CatalogResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&*self.db)
            .await?;
        Ok(count)
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}
