use super::{CatalogResult, CatalogService};
use crate::models::{book::NewBook, book_instance::NewBookInstance, genre::Genre};
use crate::validation::escape;
use chrono::NaiveDate;
use tracing::info;

/// Summary of what `seed_demo` inserted.
#[derive(Debug, Default, PartialEq)]
pub struct SeedReport {
    pub authors: usize,
    pub genres: usize,
    pub books: usize,
    pub book_instances: usize,
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

impl CatalogService {
    async fn find_or_create_genre(&self, name: &str) -> CatalogResult<Genre> {
        match self.find_genre_by_name(name).await? {
            Some(genre) => Ok(genre),
            None => self.create_genre(name).await,
        }
    }

    /// Populate an empty catalog with a small demo collection.
    ///
    /// Does nothing if any book already exists.
    pub async fn seed_demo(&self) -> CatalogResult<SeedReport> {
        if self.count_books().await? > 0 {
            info!("catalog already has books; skipping seed");
            return Ok(SeedReport::default());
        }

        let rothfuss = self
            .create_author("Patrick", "Rothfuss", date(1973, 6, 6), None)
            .await?;
        let bova = self.create_author("Ben", "Bova", date(1932, 11, 8), date(2020, 11, 29)).await?;
        let asimov = self
            .create_author("Isaac", "Asimov", date(1920, 1, 2), date(1992, 4, 6))
            .await?;

        let fantasy = self.find_or_create_genre("Fantasy").await?;
        let science_fiction = self.find_or_create_genre("Science Fiction").await?;
        self.find_or_create_genre("French Poetry").await?;

        let books = [
            ("The Name of the Wind (The Kingkiller Chronicle, #1)", &rothfuss, "9781473211896", &fantasy),
            ("The Wise Man's Fear (The Kingkiller Chronicle, #2)", &rothfuss, "9788401352836", &fantasy),
            ("Apes and Angels", &bova, "9780765379528", &science_fiction),
            ("Death Wave", &bova, "9780765379504", &science_fiction),
            ("The Gods Themselves", &asimov, "9780553288100", &science_fiction),
        ];

        let mut report = SeedReport {
            authors: 3,
            genres: 3,
            ..SeedReport::default()
        };
        for (title, author, isbn, genre) in books {
            let book = self
                .create_book(&NewBook {
                    title: escape(title),
                    author_id: author.id,
                    summary: String::new(),
                    isbn: isbn.to_string(),
                    genre_ids: vec![genre.id],
                })
                .await?;
            report.books += 1;

            for (imprint, status) in [("London Gollancz, 2014.", "Available"), ("Gollancz, 2011.", "Loaned")] {
                self.create_book_instance(&NewBookInstance {
                    book_id: book.id,
                    imprint: escape(imprint),
                    status: status.to_string(),
                    due_back: if status == "Loaned" { date(2030, 5, 1) } else { None },
                })
                .await?;
                report.book_instances += 1;
            }
        }

        info!(?report, "seeded demo catalog");
        Ok(report)
    }
}
