//! Season table access.

use super::Database;
use crate::models::catalog::{Season, SeasonAttributes, UpsertOutcome, Upserted};
use crate::{Error, Result};
use rusqlite::{params, OptionalExtension, Row};

const SEASON_COLUMNS: &str = "id, tv_show_id, title, season_number, year, plot, writer, rating, \
                              premiered, releasedate";

fn season_from_row(row: &Row<'_>) -> rusqlite::Result<Season> {
    Ok(Season {
        id: row.get("id")?,
        tv_show_id: row.get("tv_show_id")?,
        title: row.get("title")?,
        season_number: row.get("season_number")?,
        year: row.get("year")?,
        plot: row.get("plot")?,
        writer: row.get("writer")?,
        rating: row.get("rating")?,
        premiered: row.get("premiered")?,
        release_date: row.get("releasedate")?,
    })
}

impl Database {
    /// Create the season `(show_id, season_number)` or update it in place.
    ///
    /// Fails with [`Error::Validation`] when `show_id` is not a catalogued show.
    pub fn create_or_update_season(
        &self,
        show_id: i64,
        season_number: i32,
        attributes: &SeasonAttributes,
    ) -> Result<Upserted<Season>> {
        if self.get_show(show_id)?.is_none() {
            return Err(Error::Validation(format!(
                "show id {} does not exist; add it with `show add` first",
                show_id
            )));
        }
        if attributes.title.trim().is_empty() {
            return Err(Error::Validation("season title must not be empty".to_string()));
        }

        if let Some(existing) = self.get_season(show_id, season_number)? {
            self.conn.execute(
                "UPDATE season SET title = ?1, year = COALESCE(?2, year), \
                 plot = COALESCE(?3, plot), writer = COALESCE(?4, writer), \
                 rating = COALESCE(?5, rating), premiered = COALESCE(?6, premiered), \
                 releasedate = COALESCE(?7, releasedate) WHERE id = ?8",
                params![
                    attributes.title,
                    attributes.year,
                    attributes.plot,
                    attributes.writer,
                    attributes.rating,
                    attributes.premiered,
                    attributes.release_date,
                    existing.id,
                ],
            )?;

            let updated = self.get_season(show_id, season_number)?.ok_or_else(|| {
                Error::other(format!("season {} vanished during update", existing.id))
            })?;
            let outcome = if updated == existing {
                UpsertOutcome::Unchanged
            } else {
                UpsertOutcome::Updated
            };
            tracing::debug!("Season {} of show {} {}", season_number, show_id, outcome);
            return Ok(Upserted::new(updated, outcome));
        }

        self.conn.execute(
            "INSERT INTO season (tv_show_id, title, season_number, year, plot, writer, rating, \
             premiered, releasedate) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                show_id,
                attributes.title,
                season_number,
                attributes.year,
                attributes.plot,
                attributes.writer,
                attributes.rating,
                attributes.premiered,
                attributes.release_date,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Created season {} of show {} ({})", season_number, show_id, id);

        Ok(Upserted::new(
            Season {
                id,
                tv_show_id: show_id,
                title: attributes.title.clone(),
                season_number,
                year: attributes.year,
                plot: attributes.plot.clone(),
                writer: attributes.writer.clone(),
                rating: attributes.rating.clone(),
                premiered: attributes.premiered.clone(),
                release_date: attributes.release_date.clone(),
            },
            UpsertOutcome::Created,
        ))
    }

    /// Look up a season by its natural key.
    pub fn get_season(&self, show_id: i64, season_number: i32) -> Result<Option<Season>> {
        let season = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM season WHERE tv_show_id = ?1 AND season_number = ?2",
                    SEASON_COLUMNS
                ),
                params![show_id, season_number],
                season_from_row,
            )
            .optional()?;
        Ok(season)
    }

    /// Look up a season by internal id.
    pub fn get_season_by_id(&self, id: i64) -> Result<Option<Season>> {
        let season = self
            .conn
            .query_row(
                &format!("SELECT {} FROM season WHERE id = ?1", SEASON_COLUMNS),
                params![id],
                season_from_row,
            )
            .optional()?;
        Ok(season)
    }

    /// Seasons of a show, ordered by number.
    pub fn list_seasons_of_show(&self, show_id: i64) -> Result<Vec<Season>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM season WHERE tv_show_id = ?1 ORDER BY season_number",
            SEASON_COLUMNS
        ))?;
        let seasons = stmt
            .query_map(params![show_id], season_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(seasons)
    }
}
