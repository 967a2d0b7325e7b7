//! An author of one or more books.

use super::format_long_date;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Author {
    pub id: Uuid,

    /// Given name (required, at most 100 characters).
    pub first_name: String,

    /// Surname (required, at most 100 characters).
    pub family_name: String,

    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name in catalog order: `family, first`.
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Long-form birth date, or an empty string when unknown.
    pub fn date_formatted_birth(&self) -> String {
        self.date_of_birth.map(format_long_date).unwrap_or_default()
    }

    /// Long-form death date, or an empty string when unknown.
    pub fn date_formatted_death(&self) -> String {
        self.date_of_death.map(format_long_date).unwrap_or_default()
    }

    /// `birth - death` as shown in author listings. Either side may be blank.
    pub fn date_range(&self) -> String {
        format!(
            "{} - {}",
            self.date_formatted_birth(),
            self.date_formatted_death()
        )
    }

    /// Difference in calendar years between birth and death.
    ///
    /// `None` unless both dates are recorded; a living author has no lifespan.
    pub fn lifespan(&self) -> Option<i32> {
        match (self.date_of_birth, self.date_of_death) {
            (Some(born), Some(died)) => Some(died.year() - born.year()),
            _ => None,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(born: Option<(i32, u32, u32)>, died: Option<(i32, u32, u32)>) -> Author {
        let to_date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Author {
            id: Uuid::nil(),
            first_name: "Isaac".into(),
            family_name: "Asimov".into(),
            date_of_birth: born.map(to_date),
            date_of_death: died.map(to_date),
        }
    }

    #[test]
    fn name_is_family_then_first() {
        assert_eq!(author(None, None).name(), "Asimov, Isaac");
    }

    #[test]
    fn lifespan_requires_both_dates() {
        assert_eq!(author(Some((1920, 1, 2)), Some((1992, 4, 6))).lifespan(), Some(72));
        assert_eq!(author(Some((1920, 1, 2)), None).lifespan(), None);
        assert_eq!(author(None, Some((1992, 4, 6))).lifespan(), None);
    }

    #[test]
    fn formatted_dates_blank_when_missing() {
        let living = author(Some((1920, 1, 2)), None);
        assert_eq!(living.date_formatted_birth(), "January 2nd, 1920");
        assert_eq!(living.date_formatted_death(), "");
        assert_eq!(living.date_range(), "January 2nd, 1920 - ");
    }

    #[test]
    fn url_points_at_detail_page() {
        assert_eq!(
            author(None, None).url(),
            "/catalog/author/00000000-0000-0000-0000-000000000000"
        );
    }
}
