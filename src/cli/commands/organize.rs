//! Organize command implementation.

use crate::core::organizer::{self, OrganizeOptions};
use crate::models::config::Config;
use crate::services::tmdb::TmdbClient;
use crate::store::Database;
use colored::Colorize;

/// Rename and tag one season directory.
pub async fn organize(config: &Config, tvshow: bool, options: OrganizeOptions) -> anyhow::Result<()> {
    if !tvshow {
        anyhow::bail!("Only TV show seasons can be organized; pass --tvshow");
    }

    let tmdb = TmdbClient::from_config(&config.tmdb)?;
    let db = Database::open(&config.database.path)?;

    println!(
        "{} {}",
        "[SCAN]".cyan(),
        options.directory.display()
    );

    let report = organizer::organize(&db, &tmdb, &options).await?;

    if options.dry_run {
        println!();
        println!("{}", "Dry run complete. No files were changed.".yellow());
        return Ok(());
    }

    println!();
    println!("{}", format!("Season {} organized", report.season_number).bold().green());
    if !options.nfo_only {
        println!(
            "  Renamed: {}  Unchanged: {}  Skipped: {}  Failed: {}",
            report.renames.renamed,
            report.renames.unchanged,
            report.renames.skipped,
            if report.renames.failed > 0 {
                report.renames.failed.to_string().red().to_string()
            } else {
                "0".to_string()
            }
        );
    }
    println!(
        "  Episode NFOs: {}  Skipped: {}",
        report.episode_nfos, report.skipped_files
    );
    println!(
        "  Cast: {}",
        if report.dub_cast { "Portuguese dub (catalog)" } else { "TMDB" }
    );
    for path in [&report.season_nfo, &report.tvshow_nfo, &report.poster]
        .into_iter()
        .flatten()
    {
        println!("  {} {}", "->".dimmed(), path.display());
    }

    Ok(())
}
