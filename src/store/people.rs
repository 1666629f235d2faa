//! People table access.

use super::{is_unique_violation, Database};
use crate::models::catalog::{Person, PersonAttributes, UpsertOutcome, Upserted};
use crate::{Error, Result};
use rusqlite::{params, OptionalExtension, Row};

const PERSON_COLUMNS: &str = "id, name, full_name, birthday, birthday_year, birth_place, \
                              biography, famous_roles, photo_src_url";

pub(super) fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        name: row.get("name")?,
        full_name: row.get("full_name")?,
        birthday: row.get("birthday")?,
        birthday_year: row.get("birthday_year")?,
        birth_place: row.get("birth_place")?,
        biography: row.get("biography")?,
        famous_roles: row.get("famous_roles")?,
        photo_src_url: row.get("photo_src_url")?,
    })
}

impl Database {
    /// Return the person called `name`, creating it with `attributes` if absent.
    ///
    /// An existing person is returned untouched; `attributes` only apply to a
    /// newly created row.
    pub fn find_or_create_person(
        &self,
        name: &str,
        attributes: &PersonAttributes,
    ) -> Result<Upserted<Person>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("person name must not be empty".to_string()));
        }

        let inserted = self.conn.execute(
            "INSERT INTO people (name, full_name, birthday, birthday_year, birth_place, \
             biography, famous_roles, photo_src_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                name,
                attributes.full_name,
                attributes.birthday,
                attributes.birthday_year,
                attributes.birth_place,
                attributes.biography,
                attributes.famous_roles,
                attributes.photo_src_url,
            ],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                tracing::debug!("Created person {} ({})", name, id);
                Ok(Upserted::new(
                    Person {
                        id,
                        name: name.to_string(),
                        full_name: attributes.full_name.clone(),
                        birthday: attributes.birthday.clone(),
                        birthday_year: attributes.birthday_year,
                        birth_place: attributes.birth_place.clone(),
                        biography: attributes.biography.clone(),
                        famous_roles: attributes.famous_roles.clone(),
                        photo_src_url: attributes.photo_src_url.clone(),
                    },
                    UpsertOutcome::Created,
                ))
            }
            Err(e) if is_unique_violation(&e) => {
                let person = self.get_person_by_name(name)?.ok_or_else(|| {
                    Error::other(format!("person {} vanished after unique violation", name))
                })?;
                tracing::debug!("Person {} already exists ({})", name, person.id);
                Ok(Upserted::new(person, UpsertOutcome::Unchanged))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a person by exact name.
    pub fn get_person_by_name(&self, name: &str) -> Result<Option<Person>> {
        let person = self
            .conn
            .query_row(
                &format!("SELECT {} FROM people WHERE name = ?1", PERSON_COLUMNS),
                params![name],
                person_from_row,
            )
            .optional()?;
        Ok(person)
    }

    /// Look up a person by id.
    pub fn get_person(&self, id: i64) -> Result<Option<Person>> {
        let person = self
            .conn
            .query_row(
                &format!("SELECT {} FROM people WHERE id = ?1", PERSON_COLUMNS),
                params![id],
                person_from_row,
            )
            .optional()?;
        Ok(person)
    }

    /// All people ordered by name.
    pub fn list_people(&self) -> Result<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM people ORDER BY name", PERSON_COLUMNS))?;
        let people = stmt
            .query_map([], person_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_person_with_attributes() {
        let db = Database::open_in_memory().unwrap();
        let attributes = PersonAttributes {
            full_name: Some("Flora Maria Miranda".to_string()),
            birthday: Some("1980-03-12".to_string()),
            birthday_year: Some(1980),
            ..Default::default()
        };

        let created = db.find_or_create_person("Flora Miranda", &attributes).unwrap();
        assert!(created.is_created());
        assert_eq!(created.record.birthday_year, Some(1980));

        let loaded = db.get_person_by_name("Flora Miranda").unwrap().unwrap();
        assert_eq!(loaded, created.record);
    }

    #[test]
    fn test_existing_person_keeps_original_attributes() {
        let db = Database::open_in_memory().unwrap();
        let first = db
            .find_or_create_person(
                "Ivo Bastos",
                &PersonAttributes {
                    birth_place: Some("Lisboa".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let second = db
            .find_or_create_person(
                "Ivo Bastos",
                &PersonAttributes {
                    birth_place: Some("Porto".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(second.outcome, UpsertOutcome::Unchanged);
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.record.birth_place.as_deref(), Some("Lisboa"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let db = Database::open_in_memory().unwrap();
        let result = db.find_or_create_person("   ", &PersonAttributes::default());
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(db.list_people().unwrap().is_empty());
    }
}
