//! Catalog records stored in the local SQLite database.

use serde::{Deserialize, Serialize};

/// A person (usually a voice actor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    /// Display name, unique across the catalog.
    pub name: String,
    pub full_name: Option<String>,
    /// Birth date, `YYYY-MM-DD` when it could be parsed.
    pub birthday: Option<String>,
    pub birthday_year: Option<i32>,
    pub birth_place: Option<String>,
    pub biography: Option<String>,
    /// Notable roles, comma separated.
    pub famous_roles: Option<String>,
    pub photo_src_url: Option<String>,
}

/// Optional attributes used when creating a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonAttributes {
    pub full_name: Option<String>,
    pub birthday: Option<String>,
    pub birthday_year: Option<i32>,
    pub birth_place: Option<String>,
    pub biography: Option<String>,
    pub famous_roles: Option<String>,
    pub photo_src_url: Option<String>,
}

/// A TV show, keyed by its TMDB id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub rating: Option<String>,
    /// Content advisory rating.
    pub mpaa: Option<String>,
    /// Number of seasons.
    pub seasons: Option<i32>,
}

/// Operator-entered show data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewShow {
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub rating: Option<String>,
    pub mpaa: Option<String>,
    pub seasons: Option<i32>,
}

/// A season of a show, unique per (show, season number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: i64,
    pub tv_show_id: i64,
    pub title: String,
    pub season_number: i32,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub writer: Option<String>,
    pub rating: Option<String>,
    pub premiered: Option<String>,
    pub release_date: Option<String>,
}

/// Mutable season fields.
///
/// `title` always replaces the stored title; `None` optional fields keep
/// whatever is already stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonAttributes {
    pub title: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub writer: Option<String>,
    pub rating: Option<String>,
    pub premiered: Option<String>,
    pub release_date: Option<String>,
}

impl SeasonAttributes {
    /// Attributes with only a title.
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A cast assignment of a person to a character in a show season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    /// Role type, e.g. "actor".
    pub role_type: String,
    pub character: Option<String>,
    pub people_id: i64,
    pub tv_show_id: i64,
    pub season_id: i64,
}

/// A person together with the character they voice in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorWithRole {
    pub person: Person,
    pub role_type: String,
    pub character: Option<String>,
}

/// What an idempotent write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

impl std::fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "created"),
            UpsertOutcome::Updated => write!(f, "updated"),
            UpsertOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Catalog key of a TMDB id.
pub fn catalog_tmdb_id(tmdb_id: u64) -> crate::Result<i64> {
    i64::try_from(tmdb_id)
        .map_err(|_| crate::Error::Validation(format!("TMDB id {} is out of range", tmdb_id)))
}

/// TMDB id of a catalogued show.
pub fn remote_tmdb_id(tmdb_id: i64) -> crate::Result<u64> {
    u64::try_from(tmdb_id)
        .map_err(|_| crate::Error::Validation(format!("TMDB id {} is negative", tmdb_id)))
}

/// A record returned from an idempotent write, with what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<T> {
    pub record: T,
    pub outcome: UpsertOutcome,
}

impl<T> Upserted<T> {
    pub fn new(record: T, outcome: UpsertOutcome) -> Self {
        Self { record, outcome }
    }

    /// Whether a new row was inserted.
    pub fn is_created(&self) -> bool {
        self.outcome == UpsertOutcome::Created
    }
}
