//! Catalog schema.

use rusqlite::Connection;

/// Fixed catalog schema: four tables and the two natural-key indexes.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS people (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE,
    full_name     TEXT,
    birthday      TEXT,
    birthday_year INTEGER,
    birth_place   TEXT,
    biography     TEXT,
    famous_roles  TEXT,
    photo_src_url TEXT
);

CREATE TABLE IF NOT EXISTS tv_show (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    tmdb_id        INTEGER NOT NULL UNIQUE,
    title          TEXT NOT NULL,
    original_title TEXT,
    year           INTEGER,
    plot           TEXT,
    rating         TEXT,
    mpaa           TEXT,
    seasons        INTEGER
);

CREATE TABLE IF NOT EXISTS season (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    tv_show_id    INTEGER NOT NULL REFERENCES tv_show(id),
    title         TEXT NOT NULL,
    season_number INTEGER NOT NULL,
    year          INTEGER,
    plot          TEXT,
    writer        TEXT,
    rating        TEXT,
    premiered     TEXT,
    releasedate   TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_season_show_number
    ON season (tv_show_id, season_number);

CREATE TABLE IF NOT EXISTS role (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    type       TEXT NOT NULL,
    character  TEXT,
    people_id  INTEGER NOT NULL REFERENCES people(id),
    tv_show_id INTEGER NOT NULL REFERENCES tv_show(id),
    season_id  INTEGER NOT NULL REFERENCES season(id)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_role_natural_key
    ON role (character, people_id, tv_show_id, season_id);
";

/// Enable foreign keys and create any missing tables.
pub fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)
}
