//! Catalog store over a single SQLite file.
//!
//! Every write is idempotent on the natural key of its table:
//! - people: `name`
//! - tv_show: `tmdb_id`
//! - season: `(tv_show_id, season_number)`
//! - role: `(character, people_id, tv_show_id, season_id)`

mod people;
mod roles;
pub mod schema;
mod seasons;
mod shows;

use crate::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Handle to the catalog database.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}

impl Database {
    /// Open (or create) the catalog at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        schema::apply(&conn)?;
        tracing::debug!("Opened catalog: {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a throwaway in-memory catalog.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::apply(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Whether an error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file_and_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("catalog.sqlite3");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));

        // Reopening applies the schema again without error.
        drop(db);
        Database::open(&path).unwrap();
    }

    #[test]
    fn test_unique_violation_detection() {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute("INSERT INTO people (name) VALUES ('Ana')", [])
            .unwrap();
        let err = db
            .conn
            .execute("INSERT INTO people (name) VALUES ('Ana')", [])
            .unwrap_err();

        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = Database::open_in_memory().unwrap();
        let err = db
            .conn
            .execute(
                "INSERT INTO season (tv_show_id, title, season_number) VALUES (99, 'x', 1)",
                [],
            )
            .unwrap_err();

        assert!(!is_unique_violation(&err));
    }
}
