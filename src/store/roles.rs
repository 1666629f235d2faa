//! Role table access.

use super::people::person_from_row;
use super::Database;
use crate::models::catalog::{ActorWithRole, Role, UpsertOutcome, Upserted};
use crate::{Error, Result};
use rusqlite::{params, OptionalExtension, Row};

const ROLE_COLUMNS: &str = "id, type, character, people_id, tv_show_id, season_id";

fn role_from_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get("id")?,
        role_type: row.get("type")?,
        character: row.get("character")?,
        people_id: row.get("people_id")?,
        tv_show_id: row.get("tv_show_id")?,
        season_id: row.get("season_id")?,
    })
}

impl Database {
    /// Record that `person_id` plays `character` in a show season.
    ///
    /// An existing role is left as is, except for its `role_type`, which is
    /// replaced when it differs. Dangling ids fail with
    /// [`Error::Referential`] and write nothing.
    pub fn create_or_update_role(
        &self,
        character: Option<&str>,
        person_id: i64,
        show_id: i64,
        season_id: i64,
        role_type: &str,
    ) -> Result<Upserted<Role>> {
        if self.get_person(person_id)?.is_none() {
            return Err(Error::Referential {
                entity: "person",
                id: person_id,
            });
        }
        if self.get_show(show_id)?.is_none() {
            return Err(Error::Referential {
                entity: "show",
                id: show_id,
            });
        }
        let season = self.get_season_by_id(season_id)?.ok_or(Error::Referential {
            entity: "season",
            id: season_id,
        })?;
        if season.tv_show_id != show_id {
            return Err(Error::Validation(format!(
                "season {} belongs to show {}, not show {}",
                season_id, season.tv_show_id, show_id
            )));
        }

        // `IS` so that a NULL character still matches its twin.
        let existing = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM role WHERE character IS ?1 AND people_id = ?2 \
                     AND tv_show_id = ?3 AND season_id = ?4",
                    ROLE_COLUMNS
                ),
                params![character, person_id, show_id, season_id],
                role_from_row,
            )
            .optional()?;

        if let Some(mut role) = existing {
            if role.role_type == role_type {
                return Ok(Upserted::new(role, UpsertOutcome::Unchanged));
            }
            self.conn.execute(
                "UPDATE role SET type = ?1 WHERE id = ?2",
                params![role_type, role.id],
            )?;
            role.role_type = role_type.to_string();
            return Ok(Upserted::new(role, UpsertOutcome::Updated));
        }

        self.conn.execute(
            "INSERT INTO role (type, character, people_id, tv_show_id, season_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![role_type, character, person_id, show_id, season_id],
        )?;
        let id = self.conn.last_insert_rowid();

        Ok(Upserted::new(
            Role {
                id,
                role_type: role_type.to_string(),
                character: character.map(str::to_string),
                people_id: person_id,
                tv_show_id: show_id,
                season_id,
            },
            UpsertOutcome::Created,
        ))
    }

    /// Roles recorded for a season, in insertion order.
    pub fn roles_of_season(&self, season_id: i64) -> Result<Vec<Role>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM role WHERE season_id = ?1 ORDER BY id",
            ROLE_COLUMNS
        ))?;
        let roles = stmt
            .query_map(params![season_id], role_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(roles)
    }

    /// People cast in a season, with the character each one plays.
    pub fn actors_of_season(&self, season_id: i64) -> Result<Vec<ActorWithRole>> {
        let mut stmt = self.conn.prepare(
            "SELECT people.id AS id, people.name AS name, people.full_name AS full_name, \
                    people.birthday AS birthday, people.birthday_year AS birthday_year, \
                    people.birth_place AS birth_place, people.biography AS biography, \
                    people.famous_roles AS famous_roles, people.photo_src_url AS photo_src_url, \
                    role.type AS role_type, role.character AS character \
             FROM role JOIN people ON role.people_id = people.id \
             WHERE role.season_id = ?1 ORDER BY role.id",
        )?;
        let actors = stmt
            .query_map(params![season_id], |row| {
                Ok(ActorWithRole {
                    person: person_from_row(row)?,
                    role_type: row.get("role_type")?,
                    character: row.get("character")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(actors)
    }
}
