//! Media Files Organizer CLI
//!
//! Renames TV show episodes after TMDB, writes Kodi sidecars and catalogs
//! Portuguese dub casts scraped from the dubbing wiki.

use clap::Parser;
use media_files_organizer::cli::{
    args::{Cli, Commands, PersonAction, SeasonAction, ShowAction},
    commands::{init_db, organize, person, season, show},
};
use media_files_organizer::core::organizer::OrganizeOptions;
use media_files_organizer::models::catalog::{catalog_tmdb_id, NewShow};
use media_files_organizer::models::config::{self, Config};
use media_files_organizer::preflight::{self, Requirements};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = config::load_config();
    if let Some(db) = cli.db.clone() {
        config.database.path = db;
    }
    tracing::debug!("Catalog: {}", config.database.path.display());

    if !cli.skip_preflight {
        run_preflight_checks(&config, requirements(&cli.command)).await?;
    }

    match cli.command {
        Commands::Organize {
            tmdb_id,
            directory,
            tvshow,
            season,
            season_name,
            nfo_only,
            dry_run,
            prefix,
            show_nfo,
            poster,
        } => {
            let options = OrganizeOptions {
                tmdb_id,
                directory,
                season,
                season_name,
                nfo_only,
                dry_run,
                prefix,
                show_nfo,
                poster,
            };
            organize::organize(&config, tvshow, options).await?;
        }

        Commands::Season { action } => match action {
            SeasonAction::Scrape {
                url,
                show_id,
                season_number,
                name,
            } => {
                season::scrape_season(&config, &url, show_id, season_number, name.as_deref())
                    .await?;
            }
            SeasonAction::List { show_id } => {
                season::list_seasons(&config, show_id)?;
            }
        },

        Commands::Person { action } => match action {
            PersonAction::Scrape { url } => {
                person::scrape_person(&config, &url).await?;
            }
            PersonAction::List => {
                person::list_people(&config)?;
            }
        },

        Commands::Show { action } => match action {
            ShowAction::Add {
                tmdb_id,
                title,
                original_title,
                year,
                plot,
                mpaa,
                offline,
            } => {
                let input = NewShow {
                    tmdb_id: catalog_tmdb_id(tmdb_id)?,
                    title: title.unwrap_or_default(),
                    original_title,
                    year,
                    plot,
                    mpaa,
                    ..Default::default()
                };
                show::add_show(&config, input, offline).await?;
            }
            ShowAction::List => {
                show::list_shows(&config)?;
            }
        },

        Commands::InitDb => {
            init_db::init_db(&config.database.path)?;
        }
    }

    Ok(())
}

/// External dependencies each command needs.
fn requirements(command: &Commands) -> Requirements {
    match command {
        Commands::Organize { dry_run, .. } => Requirements {
            catalog: true,
            ffprobe: !dry_run,
            tmdb: true,
            wiki: false,
        },
        Commands::Season {
            action: SeasonAction::Scrape { .. },
        }
        | Commands::Person {
            action: PersonAction::Scrape { .. },
        } => Requirements {
            catalog: true,
            wiki: true,
            ..Default::default()
        },
        Commands::Show {
            action: ShowAction::Add { offline, .. },
        } => Requirements {
            catalog: true,
            tmdb: !offline,
            ..Default::default()
        },
        _ => Requirements::default(),
    }
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_files_organizer=debug")
    } else {
        EnvFilter::new("media_files_organizer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config, needs: Requirements) -> anyhow::Result<()> {
    use colored::Colorize;

    if needs.is_empty() {
        return Ok(());
    }

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config, needs).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
