//! TV show table access.

use super::Database;
use crate::models::catalog::{NewShow, Show, UpsertOutcome, Upserted};
use crate::{Error, Result};
use rusqlite::{params, OptionalExtension, Row};

const SHOW_COLUMNS: &str = "id, tmdb_id, title, original_title, year, plot, rating, mpaa, seasons";

fn show_from_row(row: &Row<'_>) -> rusqlite::Result<Show> {
    Ok(Show {
        id: row.get("id")?,
        tmdb_id: row.get("tmdb_id")?,
        title: row.get("title")?,
        original_title: row.get("original_title")?,
        year: row.get("year")?,
        plot: row.get("plot")?,
        rating: row.get("rating")?,
        mpaa: row.get("mpaa")?,
        seasons: row.get("seasons")?,
    })
}

impl Database {
    /// Create a show, or update its fields if the TMDB id is already catalogued.
    pub fn create_or_update_show(&self, show: &NewShow) -> Result<Upserted<Show>> {
        if show.title.trim().is_empty() {
            return Err(Error::Validation("show title must not be empty".to_string()));
        }

        if let Some(existing) = self.get_show_by_external_id(show.tmdb_id)? {
            let updated = Show {
                id: existing.id,
                tmdb_id: existing.tmdb_id,
                title: show.title.clone(),
                original_title: show.original_title.clone(),
                year: show.year,
                plot: show.plot.clone(),
                rating: show.rating.clone(),
                mpaa: show.mpaa.clone(),
                seasons: show.seasons,
            };
            if updated == existing {
                return Ok(Upserted::new(existing, UpsertOutcome::Unchanged));
            }

            self.conn.execute(
                "UPDATE tv_show SET title = ?1, original_title = ?2, year = ?3, plot = ?4, \
                 rating = ?5, mpaa = ?6, seasons = ?7 WHERE id = ?8",
                params![
                    updated.title,
                    updated.original_title,
                    updated.year,
                    updated.plot,
                    updated.rating,
                    updated.mpaa,
                    updated.seasons,
                    updated.id,
                ],
            )?;
            tracing::debug!("Updated show {} (tmdb {})", updated.id, updated.tmdb_id);
            return Ok(Upserted::new(updated, UpsertOutcome::Updated));
        }

        self.conn.execute(
            "INSERT INTO tv_show (tmdb_id, title, original_title, year, plot, rating, mpaa, seasons) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                show.tmdb_id,
                show.title,
                show.original_title,
                show.year,
                show.plot,
                show.rating,
                show.mpaa,
                show.seasons,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Created show {} (tmdb {})", id, show.tmdb_id);

        Ok(Upserted::new(
            Show {
                id,
                tmdb_id: show.tmdb_id,
                title: show.title.clone(),
                original_title: show.original_title.clone(),
                year: show.year,
                plot: show.plot.clone(),
                rating: show.rating.clone(),
                mpaa: show.mpaa.clone(),
                seasons: show.seasons,
            },
            UpsertOutcome::Created,
        ))
    }

    /// Resolve a TMDB id to the catalogued show. `None` when not catalogued.
    pub fn get_show_by_external_id(&self, tmdb_id: i64) -> Result<Option<Show>> {
        let show = self
            .conn
            .query_row(
                &format!("SELECT {} FROM tv_show WHERE tmdb_id = ?1", SHOW_COLUMNS),
                params![tmdb_id],
                show_from_row,
            )
            .optional()?;
        Ok(show)
    }

    /// Look up a show by internal id.
    pub fn get_show(&self, id: i64) -> Result<Option<Show>> {
        let show = self
            .conn
            .query_row(
                &format!("SELECT {} FROM tv_show WHERE id = ?1", SHOW_COLUMNS),
                params![id],
                show_from_row,
            )
            .optional()?;
        Ok(show)
    }

    /// All shows ordered by title.
    pub fn list_shows(&self) -> Result<Vec<Show>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM tv_show ORDER BY title", SHOW_COLUMNS))?;
        let shows = stmt
            .query_map([], show_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(shows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon() -> NewShow {
        NewShow {
            tmdb_id: 60572,
            title: "Pokémon".to_string(),
            year: Some(1997),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_existing_show() {
        let db = Database::open_in_memory().unwrap();
        let created = db.create_or_update_show(&pokemon()).unwrap();
        assert!(created.is_created());

        let mut changed = pokemon();
        changed.seasons = Some(25);
        let updated = db.create_or_update_show(&changed).unwrap();

        assert_eq!(updated.outcome, UpsertOutcome::Updated);
        assert_eq!(updated.record.id, created.record.id);
        assert_eq!(db.list_shows().unwrap().len(), 1);
        assert_eq!(db.get_show(created.record.id).unwrap().unwrap().seasons, Some(25));
    }

    #[test]
    fn test_identical_show_is_unchanged() {
        let db = Database::open_in_memory().unwrap();
        db.create_or_update_show(&pokemon()).unwrap();
        let again = db.create_or_update_show(&pokemon()).unwrap();
        assert_eq!(again.outcome, UpsertOutcome::Unchanged);
    }

    #[test]
    fn test_unknown_external_id() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_show_by_external_id(1).unwrap().is_none());
    }
}
