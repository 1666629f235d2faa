//! Season organizer.
//!
//! Renames the episodes of one season directory after TMDB and writes the
//! Kodi sidecars, preferring the catalogued Portuguese dub cast over TMDB's.

use crate::core::renamer::{self, RenameSummary};
use crate::core::scanner::{extract_episode_number, infer_season, list_media_files};
use crate::generators::nfo;
use crate::models::catalog::{catalog_tmdb_id, ActorWithRole};
use crate::models::media::{Credit, MediaFile, SeasonMetadata, StreamDetails, TvShowMetadata};
use crate::services::ffprobe;
use crate::services::tmdb::TmdbClient;
use crate::store::Database;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Options of an organize run.
#[derive(Debug, Clone, Default)]
pub struct OrganizeOptions {
    /// TMDB id of the show.
    pub tmdb_id: u64,
    /// Season directory.
    pub directory: PathBuf,
    /// Season number; inferred from file names when absent.
    pub season: Option<u16>,
    /// Season display name for `season.nfo`.
    pub season_name: Option<String>,
    /// Only write sidecars, keep file names.
    pub nfo_only: bool,
    /// Print the rename plan and stop.
    pub dry_run: bool,
    /// Prepended to the series name of every file.
    pub prefix: Option<String>,
    /// Also write `tvshow.nfo` in the parent directory.
    pub show_nfo: bool,
    /// Also download `poster.jpg`.
    pub poster: bool,
}

/// Outcome of an organize run.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    pub season_number: u16,
    pub renames: RenameSummary,
    pub episode_nfos: usize,
    pub skipped_files: usize,
    pub season_nfo: Option<PathBuf>,
    pub tvshow_nfo: Option<PathBuf>,
    pub poster: Option<PathBuf>,
    /// Whether the dub cast from the catalog was used.
    pub dub_cast: bool,
}

/// Dub cast and title of a catalogued season.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSeason {
    pub title: String,
    pub cast: Vec<Credit>,
}

/// Map catalog actors to sidecar credits.
pub fn actor_credits(actors: &[ActorWithRole]) -> Vec<Credit> {
    actors
        .iter()
        .enumerate()
        .map(|(i, actor)| Credit {
            name: actor.person.name.clone(),
            original_name: actor.person.full_name.clone(),
            kind: "Actor".to_string(),
            role: actor.character.clone(),
            photo: actor.person.photo_src_url.clone(),
            order: Some(i as u32),
        })
        .collect()
}

/// Look up the dub cast of a season in the catalog.
///
/// `None` when the show or the season is not catalogued.
pub fn catalog_season(db: &Database, tmdb_id: u64, season_number: u16) -> Result<Option<CatalogSeason>> {
    let Some(show) = db.get_show_by_external_id(catalog_tmdb_id(tmdb_id)?)? else {
        tracing::debug!("Show {} is not catalogued", tmdb_id);
        return Ok(None);
    };
    let Some(season) = db.get_season(show.id, season_number as i32)? else {
        tracing::debug!("Season {} of {} is not catalogued", season_number, show.title);
        return Ok(None);
    };

    let actors = db.actors_of_season(season.id)?;
    Ok(Some(CatalogSeason {
        title: season.title,
        cast: actor_credits(&actors),
    }))
}

/// Organize one season directory.
pub async fn organize(
    db: &Database,
    tmdb: &TmdbClient,
    options: &OrganizeOptions,
) -> Result<OrganizeReport> {
    let files = list_media_files(&options.directory)?;
    let season_number = infer_season(&files, options.season)?;
    tracing::info!("Organizing season {} in {}", season_number, options.directory.display());

    let show = tmdb.fetch_show(options.tmdb_id).await?;
    let season = tmdb.fetch_season(options.tmdb_id, season_number).await?;
    println!(
        "{} {} ({}) - {} ({} episodes)",
        "[TMDB]".cyan(),
        show.name.bold(),
        show.year.map(|y| y.to_string()).unwrap_or_default(),
        season.name,
        season.episodes.len()
    );

    let catalog = catalog_season(db, options.tmdb_id, season_number)?;
    let (season_title, cast, dub_cast) = match catalog {
        Some(c) if !c.cast.is_empty() => {
            println!("{} Using {} dub cast members", "[DUB]".cyan(), c.cast.len());
            (c.title, c.cast, true)
        }
        Some(c) => (c.title, season.cast.clone(), false),
        None => (season.name.clone(), season.cast.clone(), false),
    };
    let season_title = options.season_name.clone().unwrap_or(season_title);

    let mut report = OrganizeReport {
        season_number,
        dub_cast,
        ..Default::default()
    };

    let prefix = options.prefix.as_deref();
    let mut current_files = files.clone();
    if !options.nfo_only {
        let mut plan = renamer::plan_renames(&files, &show.name, &season, prefix);
        if options.dry_run {
            println!("{}", "[DRY RUN] Planned renames:".bold().yellow());
            renamer::print_plan(&plan);
            return Ok(report);
        }
        report.renames = renamer::execute_renames(&mut plan);
        renamer::print_plan(&plan);
        current_files = files
            .iter()
            .zip(&plan)
            .map(|(file, entry)| MediaFile {
                path: entry.current_path().to_path_buf(),
                filename: entry
                    .current_path()
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.filename.clone()),
                extension: file.extension.clone(),
            })
            .collect();
    } else if options.dry_run {
        println!("{}", "[DRY RUN] Sidecars would be written; nothing changed.".yellow());
        return Ok(report);
    }

    let (written, skipped) =
        write_episode_nfos(&current_files, &show, &season, &cast, ffprobe::probe)?;
    report.episode_nfos = written;
    report.skipped_files = skipped;

    let today = chrono::Local::now().date_naive();
    let season_nfo = options.directory.join("season.nfo");
    std::fs::write(
        &season_nfo,
        nfo::generate_season_nfo(&show, &season, &season_title, &cast, today),
    )?;
    tracing::info!("Wrote {}", season_nfo.display());
    report.season_nfo = Some(season_nfo);

    if options.show_nfo {
        let parent = show_directory(&options.directory);
        let tvshow_nfo = parent.join("tvshow.nfo");
        std::fs::write(&tvshow_nfo, nfo::generate_tvshow_nfo(&show, &show.cast))?;
        tracing::info!("Wrote {}", tvshow_nfo.display());
        report.tvshow_nfo = Some(tvshow_nfo);
    }

    if options.poster {
        report.poster = download_poster(tmdb, &season, &show, &options.directory).await;
    }

    Ok(report)
}

/// Parent of the season directory, or the directory itself at the root.
fn show_directory(season_dir: &Path) -> PathBuf {
    let absolute = season_dir
        .canonicalize()
        .unwrap_or_else(|_| season_dir.to_path_buf());
    absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute)
}

/// Probe every episode and write `<stem>.nfo` next to it. Returns (written, skipped).
fn write_episode_nfos<P>(
    files: &[MediaFile],
    show: &TvShowMetadata,
    season: &SeasonMetadata,
    cast: &[Credit],
    probe: P,
) -> Result<(usize, usize)>
where
    P: Fn(&Path) -> Result<StreamDetails>,
{
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut written = 0;
    let mut skipped = 0;

    for file in files {
        pb.set_message(file.filename.clone());

        let Some(episode) = extract_episode_number(&file.filename).and_then(|n| season.episode(n)) else {
            pb.suspend(|| {
                tracing::warn!("Skipping {}: no matching TMDB episode", file.filename);
            });
            skipped += 1;
            pb.inc(1);
            continue;
        };

        let streams = match probe(&file.path) {
            Ok(streams) => Some(streams),
            Err(crate::Error::FfprobeNotFound) => {
                pb.finish_and_clear();
                return Err(crate::Error::FfprobeNotFound);
            }
            Err(e) => {
                pb.suspend(|| tracing::warn!("Could not probe {}: {}", file.filename, e));
                None
            }
        };

        let nfo_path = file.path.with_extension("nfo");
        std::fs::write(
            &nfo_path,
            nfo::generate_episode_nfo(show, episode, cast, streams.as_ref()),
        )?;
        written += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    tracing::info!("Wrote {} episode NFOs, skipped {}", written, skipped);

    Ok((written, skipped))
}

/// Download the season poster, falling back to the show poster.
async fn download_poster(
    tmdb: &TmdbClient,
    season: &SeasonMetadata,
    show: &TvShowMetadata,
    directory: &Path,
) -> Option<PathBuf> {
    let url = season.poster_url.as_deref().or(show.poster_url.as_deref())?;
    let path = directory.join("poster.jpg");

    match tmdb.download_image(url).await {
        Ok(bytes) => match std::fs::write(&path, bytes) {
            Ok(()) => {
                tracing::info!("Downloaded poster to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to save poster: {}", e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Failed to download poster {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{NewShow, PersonAttributes, SeasonAttributes};
    use crate::models::media::EpisodeMetadata;

    #[test]
    fn test_catalog_season_missing_show() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(catalog_season(&db, 60572, 1).unwrap(), None);
    }

    #[test]
    fn test_catalog_season_dub_cast() {
        let db = Database::open_in_memory().unwrap();
        let show = db
            .create_or_update_show(&NewShow {
                tmdb_id: 60572,
                title: "Pokémon".to_string(),
                ..Default::default()
            })
            .unwrap()
            .record;
        let season = db
            .create_or_update_season(show.id, 1, &SeasonAttributes::titled("Liga Índigo"))
            .unwrap()
            .record;
        let person = db
            .find_or_create_person(
                "Raquel Rosmaninho",
                &PersonAttributes {
                    photo_src_url: Some("https://img/raquel.png".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .record;
        db.create_or_update_role(Some("Ash"), person.id, show.id, season.id, "actor")
            .unwrap();

        let catalog = catalog_season(&db, 60572, 1).unwrap().unwrap();
        assert_eq!(catalog.title, "Liga Índigo");
        assert_eq!(catalog.cast.len(), 1);
        assert_eq!(catalog.cast[0].name, "Raquel Rosmaninho");
        assert_eq!(catalog.cast[0].role.as_deref(), Some("Ash"));
        assert_eq!(catalog.cast[0].photo.as_deref(), Some("https://img/raquel.png"));

        assert_eq!(catalog_season(&db, 60572, 2).unwrap(), None);
    }

    fn episode(number: u16, name: &str) -> EpisodeMetadata {
        EpisodeMetadata {
            season_number: 1,
            episode_number: number,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn media(dir: &Path, name: &str) -> MediaFile {
        let path = dir.join(name);
        std::fs::write(&path, "x").unwrap();
        MediaFile {
            filename: name.to_string(),
            extension: "mkv".to_string(),
            path,
        }
    }

    #[test]
    fn test_write_episode_nfos() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path();
        let show = TvShowMetadata {
            tmdb_id: 60572,
            name: "Pokémon".to_string(),
            ..Default::default()
        };
        let season = SeasonMetadata {
            season_number: 1,
            name: "Liga Índigo".to_string(),
            episodes: vec![episode(1, "Pokémon, Escolho-te!"), episode(2, "Pokémon Emergência!")],
            ..Default::default()
        };
        let files = vec![
            media(dir, "Pokemon.S01E01.mkv"),
            media(dir, "Pokemon.S01E02.mkv"),
            media(dir, "Pokemon.S01E09.mkv"),
            media(dir, "Pokemon Extras.mkv"),
        ];

        let (written, skipped) = write_episode_nfos(&files, &show, &season, &[], |_| {
            Err(crate::Error::Probe("unreadable".to_string()))
        })
        .unwrap();

        assert_eq!(written, 2);
        assert_eq!(skipped, 2);

        let nfo = std::fs::read_to_string(dir.join("Pokemon.S01E01.nfo")).unwrap();
        assert!(nfo.contains("<title>Pokémon, Escolho-te!</title>"));
        assert!(!nfo.contains("<fileinfo>"));
        assert!(dir.join("Pokemon.S01E02.nfo").exists());
        assert!(!dir.join("Pokemon.S01E09.nfo").exists());
        assert!(!dir.join("Pokemon Extras.nfo").exists());
    }

    #[test]
    fn test_write_episode_nfos_needs_ffprobe() {
        let temp = tempfile::TempDir::new().unwrap();
        let season = SeasonMetadata {
            episodes: vec![episode(1, "Pilot")],
            ..Default::default()
        };
        let files = vec![media(temp.path(), "Show.S01E01.mkv")];

        let result = write_episode_nfos(&files, &TvShowMetadata::default(), &season, &[], |_| {
            Err(crate::Error::FfprobeNotFound)
        });

        assert!(matches!(result, Err(crate::Error::FfprobeNotFound)));
        assert!(!temp.path().join("Show.S01E01.nfo").exists());
    }

    #[test]
    fn test_show_directory_is_parent() {
        let temp = tempfile::TempDir::new().unwrap();
        let season_dir = temp.path().join("Season 01");
        std::fs::create_dir(&season_dir).unwrap();
        assert_eq!(
            show_directory(&season_dir),
            temp.path().canonicalize().unwrap()
        );
    }
}
