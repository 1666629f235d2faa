//! Season command implementations.

use super::truncate;
use crate::core::scrape;
use crate::models::config::Config;
use crate::services::dub_wiki::WikiClient;
use crate::store::Database;
use crate::Result;
use colored::Colorize;

/// Scrape a season page into the catalog.
pub async fn scrape_season(
    config: &Config,
    url: &str,
    show_id: i64,
    season_number: i32,
    name: Option<&str>,
) -> Result<()> {
    let db = Database::open(&config.database.path)?;
    let wiki = WikiClient::new(&config.wiki)?;

    println!("{} {}", "[SCRAPE]".cyan(), url);
    let report = scrape::scrape_season(&db, &wiki, url, show_id, season_number, name).await?;

    println!(
        "{} Season {} \"{}\" ({})",
        "[OK]".green(),
        report.season.season_number,
        report.season.title,
        report.season_outcome
    );
    println!(
        "  People: {} new, {} existing",
        report.people_created, report.people_existing
    );
    println!(
        "  Roles: {} new, {} updated, {} unchanged",
        report.roles_created, report.roles_updated, report.roles_unchanged
    );
    if report.skipped_rows > 0 || report.person_page_failures > 0 {
        println!(
            "  {} {} rows skipped, {} person pages failed",
            "[WARN]".yellow(),
            report.skipped_rows,
            report.person_page_failures
        );
    }

    Ok(())
}

/// List the seasons of a show.
pub fn list_seasons(config: &Config, show_id: i64) -> Result<()> {
    let db = Database::open(&config.database.path)?;

    let Some(show) = db.get_show(show_id)? else {
        println!("{}", format!("No show with id {}.", show_id).yellow());
        return Ok(());
    };

    let seasons = db.list_seasons_of_show(show_id)?;
    println!("{}", format!("{} ({} seasons):", show.title, seasons.len()).bold().cyan());
    if seasons.is_empty() {
        return Ok(());
    }

    println!(" {:>4} | {:>6} | {:<40} | {}", "ID", "Season", "Title", "Cast");
    println!("{}", "-".repeat(70));
    for season in seasons {
        let cast = db.roles_of_season(season.id)?.len();
        println!(
            " {:>4} | {:>6} | {:<40} | {}",
            season.id,
            season.season_number,
            truncate(&season.title, 40),
            cast
        );
    }

    Ok(())
}
