//! Integration tests for the catalog store.
//!
//! Tests cover:
//! - Idempotent create-or-update of shows, seasons, people and roles
//! - Referential checks on roles
//! - Persistence across reopen

use media_files_organizer::models::catalog::{
    NewShow, PersonAttributes, SeasonAttributes, UpsertOutcome,
};
use media_files_organizer::store::Database;
use media_files_organizer::Error;
use tempfile::TempDir;

fn pokemon() -> NewShow {
    NewShow {
        tmdb_id: 60572,
        title: "Pokémon".to_string(),
        year: Some(1997),
        ..Default::default()
    }
}

#[test]
fn test_show_round_trips_by_external_id() {
    let db = Database::open_in_memory().unwrap();
    let created = db.create_or_update_show(&pokemon()).unwrap();
    assert_eq!(created.outcome, UpsertOutcome::Created);

    let found = db.get_show_by_external_id(60572).unwrap().unwrap();
    assert_eq!(found.id, created.record.id);
    assert_eq!(found.title, "Pokémon");
    assert_eq!(found.year, Some(1997));

    assert!(db.get_show_by_external_id(1).unwrap().is_none());
}

#[test]
fn test_season_recreated_with_new_title_updates_in_place() {
    let db = Database::open_in_memory().unwrap();
    let show_id = db.create_or_update_show(&pokemon()).unwrap().record.id;

    let first = db
        .create_or_update_season(show_id, 1, &SeasonAttributes::titled("Season 1"))
        .unwrap();
    let second = db
        .create_or_update_season(show_id, 1, &SeasonAttributes::titled("Liga Índigo"))
        .unwrap();

    assert_eq!(second.outcome, UpsertOutcome::Updated);
    assert_eq!(second.record.id, first.record.id);
    let seasons = db.list_seasons_of_show(show_id).unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].title, "Liga Índigo");
}

#[test]
fn test_season_for_unknown_show_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .create_or_update_season(42, 1, &SeasonAttributes::titled("Season 1"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_duplicate_person_returns_first_id() {
    let db = Database::open_in_memory().unwrap();
    let first = db
        .find_or_create_person(
            "Peter Michael",
            &PersonAttributes {
                birth_place: Some("Lisboa".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let second = db
        .find_or_create_person("Peter Michael", &PersonAttributes::default())
        .unwrap();

    assert!(first.is_created());
    assert_eq!(second.outcome, UpsertOutcome::Unchanged);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(second.record.birth_place.as_deref(), Some("Lisboa"));
    assert_eq!(db.list_people().unwrap().len(), 1);
}

#[test]
fn test_identical_role_is_a_no_op() {
    let db = Database::open_in_memory().unwrap();
    let show_id = db.create_or_update_show(&pokemon()).unwrap().record.id;
    let season_id = db
        .create_or_update_season(show_id, 1, &SeasonAttributes::titled("Season 1"))
        .unwrap()
        .record
        .id;
    let person_id = db
        .find_or_create_person("Raquel Rosmaninho", &PersonAttributes::default())
        .unwrap()
        .record
        .id;

    let first = db
        .create_or_update_role(Some("Ash"), person_id, show_id, season_id, "actor")
        .unwrap();
    let second = db
        .create_or_update_role(Some("Ash"), person_id, show_id, season_id, "actor")
        .unwrap();

    assert_eq!(first.outcome, UpsertOutcome::Created);
    assert_eq!(second.outcome, UpsertOutcome::Unchanged);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(db.roles_of_season(season_id).unwrap().len(), 1);
}

#[test]
fn test_role_with_dangling_show_creates_nothing() {
    let db = Database::open_in_memory().unwrap();
    let show_id = db.create_or_update_show(&pokemon()).unwrap().record.id;
    let season_id = db
        .create_or_update_season(show_id, 1, &SeasonAttributes::titled("Season 1"))
        .unwrap()
        .record
        .id;
    let person_id = db
        .find_or_create_person("Raquel Rosmaninho", &PersonAttributes::default())
        .unwrap()
        .record
        .id;

    let err = db
        .create_or_update_role(Some("Ash"), person_id, 999, season_id, "actor")
        .unwrap_err();

    assert!(matches!(err, Error::Referential { entity: "show", id: 999 }));
    assert!(db.roles_of_season(season_id).unwrap().is_empty());
}

#[test]
fn test_role_with_season_of_other_show_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    let pokemon_id = db.create_or_update_show(&pokemon()).unwrap().record.id;
    let other_id = db
        .create_or_update_show(&NewShow {
            tmdb_id: 1,
            title: "Digimon".to_string(),
            ..Default::default()
        })
        .unwrap()
        .record
        .id;
    let season_id = db
        .create_or_update_season(other_id, 1, &SeasonAttributes::titled("Season 1"))
        .unwrap()
        .record
        .id;
    let person_id = db
        .find_or_create_person("Raquel Rosmaninho", &PersonAttributes::default())
        .unwrap()
        .record
        .id;

    let err = db
        .create_or_update_role(Some("Ash"), person_id, pokemon_id, season_id, "actor")
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_catalog_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.sqlite3");

    {
        let db = Database::open(&path).unwrap();
        db.create_or_update_show(&pokemon()).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let shows = db.list_shows().unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].tmdb_id, 60572);

    // Re-applying the schema on open leaves data alone.
    let again = db.create_or_update_show(&pokemon()).unwrap();
    assert_eq!(again.outcome, UpsertOutcome::Unchanged);
}
