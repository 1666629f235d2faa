//! Show command implementations.

use super::truncate;
use crate::models::catalog::{remote_tmdb_id, NewShow};
use crate::models::config::Config;
use crate::models::media::TvShowMetadata;
use crate::services::tmdb::TmdbClient;
use crate::store::Database;
use colored::Colorize;

/// Fill the fields the user left out from TMDB metadata.
pub fn merge_show(input: NewShow, metadata: &TvShowMetadata) -> NewShow {
    NewShow {
        tmdb_id: input.tmdb_id,
        title: if input.title.trim().is_empty() {
            metadata.name.clone()
        } else {
            input.title
        },
        original_title: input
            .original_title
            .or_else(|| Some(metadata.original_name.clone()).filter(|t| !t.is_empty())),
        year: input.year.or(metadata.year.map(i32::from)),
        plot: input.plot.or_else(|| metadata.overview.clone()),
        rating: input
            .rating
            .or_else(|| metadata.rating.map(|r| format!("{:.1}", r))),
        mpaa: input.mpaa,
        seasons: input
            .seasons
            .or(Some(metadata.number_of_seasons as i32).filter(|n| *n > 0)),
    }
}

/// Add a show to the catalog, or update it.
pub async fn add_show(config: &Config, input: NewShow, offline: bool) -> anyhow::Result<()> {
    let db = Database::open(&config.database.path)?;

    let show = if offline {
        if input.title.trim().is_empty() {
            anyhow::bail!("--title is required with --offline");
        }
        input
    } else {
        let tmdb = TmdbClient::from_config(&config.tmdb)?;
        let metadata = tmdb.fetch_show(remote_tmdb_id(input.tmdb_id)?).await?;
        merge_show(input, &metadata)
    };

    let stored = db.create_or_update_show(&show)?;
    println!(
        "{} {} (id {}, TMDB {}, {})",
        "[OK]".green(),
        stored.record.title.bold(),
        stored.record.id,
        stored.record.tmdb_id,
        stored.outcome
    );

    Ok(())
}

/// List catalogued shows.
pub fn list_shows(config: &Config) -> crate::Result<()> {
    let db = Database::open(&config.database.path)?;
    let shows = db.list_shows()?;

    if shows.is_empty() {
        println!("{}", "No shows catalogued.".yellow());
        return Ok(());
    }

    println!("{}", format!("Shows ({}):", shows.len()).bold().cyan());
    println!(" {:>4} | {:>8} | {:>4} | {:<40} | {}", "ID", "TMDB", "Year", "Title", "Seasons");
    println!("{}", "-".repeat(80));
    for show in shows {
        let seasons = db.list_seasons_of_show(show.id)?.len();
        println!(
            " {:>4} | {:>8} | {:>4} | {:<40} | {}",
            show.id,
            show.tmdb_id,
            show.year.map(|y| y.to_string()).unwrap_or_default(),
            truncate(&show.title, 40),
            seasons
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> TvShowMetadata {
        TvShowMetadata {
            tmdb_id: 60572,
            name: "Pokémon".to_string(),
            original_name: "ポケモン".to_string(),
            year: Some(1997),
            overview: Some("Ash Ketchum quer ser Mestre Pokémon.".to_string()),
            rating: Some(7.46),
            number_of_seasons: 25,
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_show_fills_missing() {
        let merged = merge_show(
            NewShow {
                tmdb_id: 60572,
                ..Default::default()
            },
            &metadata(),
        );
        assert_eq!(merged.title, "Pokémon");
        assert_eq!(merged.original_title.as_deref(), Some("ポケモン"));
        assert_eq!(merged.year, Some(1997));
        assert_eq!(merged.rating.as_deref(), Some("7.5"));
        assert_eq!(merged.seasons, Some(25));
    }

    #[test]
    fn test_merge_show_keeps_user_values() {
        let merged = merge_show(
            NewShow {
                tmdb_id: 60572,
                title: "Pokémon (PT)".to_string(),
                year: Some(1999),
                ..Default::default()
            },
            &metadata(),
        );
        assert_eq!(merged.title, "Pokémon (PT)");
        assert_eq!(merged.year, Some(1999));
    }
}
