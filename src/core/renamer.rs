//! Episode renamer.
//!
//! Renaming is split into a plan (pure, printable for `--dry-run`) and its
//! execution, which never aborts on a single failed file.

use crate::core::scanner::extract_episode_number;
use crate::generators::filename::generate_episode_filename;
use crate::models::media::{MediaFile, SeasonMetadata};
use crate::utils::fs::rename_file;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// State of one rename.
#[derive(Debug, Clone, PartialEq)]
pub enum RenameStatus {
    /// Waiting to be executed.
    Pending,
    /// No episode number could be read from the file name.
    Skipped,
    /// Already carries the target name.
    Unchanged,
    Renamed,
    /// Rename attempted and failed.
    Failed(String),
}

/// One planned rename.
#[derive(Debug, Clone)]
pub struct RenameEntry {
    pub source: PathBuf,
    pub target: Option<PathBuf>,
    pub episode: Option<u16>,
    pub status: RenameStatus,
}

impl RenameEntry {
    /// Where the file lives after execution.
    pub fn current_path(&self) -> &Path {
        match (&self.status, &self.target) {
            (RenameStatus::Renamed, Some(target)) => target,
            _ => &self.source,
        }
    }
}

/// Counts of a rename run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Plan new names for `files`.
///
/// Episode titles come from `season`; episodes TMDB does not know keep a
/// generic `Episode <n>` title.
pub fn plan_renames(
    files: &[MediaFile],
    series: &str,
    season: &SeasonMetadata,
    prefix: Option<&str>,
) -> Vec<RenameEntry> {
    files
        .iter()
        .map(|file| {
            let Some(episode) = extract_episode_number(&file.filename) else {
                return RenameEntry {
                    source: file.path.clone(),
                    target: None,
                    episode: None,
                    status: RenameStatus::Skipped,
                };
            };

            let title = season.episode(episode).map(|e| e.name.as_str());
            let filename = generate_episode_filename(
                series,
                season.season_number,
                episode,
                title,
                &file.extension,
                prefix,
            );
            let target = file.path.with_file_name(&filename);
            let status = if filename == file.filename {
                RenameStatus::Unchanged
            } else {
                RenameStatus::Pending
            };

            RenameEntry {
                source: file.path.clone(),
                target: Some(target),
                episode: Some(episode),
                status,
            }
        })
        .collect()
}

/// Execute every pending rename in place.
pub fn execute_renames(entries: &mut [RenameEntry]) -> RenameSummary {
    let mut summary = RenameSummary::default();

    for entry in entries.iter_mut() {
        match entry.status {
            RenameStatus::Pending => {}
            RenameStatus::Unchanged => {
                summary.unchanged += 1;
                continue;
            }
            RenameStatus::Skipped => {
                summary.skipped += 1;
                continue;
            }
            _ => continue,
        }

        let Some(target) = entry.target.clone() else {
            continue;
        };

        match rename_file(&entry.source, &target) {
            Ok(()) => {
                tracing::debug!("Renamed {} -> {}", entry.source.display(), target.display());
                entry.status = RenameStatus::Renamed;
                summary.renamed += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to rename {}: {}", entry.source.display(), e);
                entry.status = RenameStatus::Failed(e.to_string());
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Renamed {} files ({} unchanged, {} skipped, {} failed)",
        summary.renamed,
        summary.unchanged,
        summary.skipped,
        summary.failed
    );

    summary
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print the plan as a source/target table.
pub fn print_plan(entries: &[RenameEntry]) {
    for entry in entries {
        let source = display_name(&entry.source);
        match (&entry.status, &entry.target) {
            (RenameStatus::Skipped, _) => {
                println!("  {} {} {}", "[SKIP]".yellow(), source, "(no episode number)".dimmed());
            }
            (RenameStatus::Unchanged, _) => {
                println!("  {} {}", "[SAME]".dimmed(), source);
            }
            (RenameStatus::Failed(reason), _) => {
                println!("  {} {} {}", "[FAIL]".red(), source, reason.red());
            }
            (_, Some(target)) => {
                println!("  {} {} -> {}", "[MOVE]".cyan(), source, display_name(target).green());
            }
            (_, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::EpisodeMetadata;
    use std::fs;
    use tempfile::TempDir;

    fn season() -> SeasonMetadata {
        SeasonMetadata {
            season_number: 1,
            name: "Indigo League".to_string(),
            episodes: vec![EpisodeMetadata {
                season_number: 1,
                episode_number: 1,
                name: "Pokémon, Escolho-te!".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn media(dir: &Path, name: &str) -> MediaFile {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        MediaFile {
            path,
            filename: name.to_string(),
            extension: "mkv".to_string(),
        }
    }

    #[test]
    fn test_plan_renames() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            media(temp.path(), "pokemon 01.mkv"),
            media(temp.path(), "pokemon 02.mkv"),
            media(temp.path(), "Pokémon.S01E03.Episode 3.mkv"),
            media(temp.path(), "extras.mkv"),
        ];

        let plan = plan_renames(&files, "Pokémon", &season(), None);

        assert_eq!(plan[0].status, RenameStatus::Pending);
        assert_eq!(
            plan[0].target.as_deref().map(display_name).as_deref(),
            Some("Pokémon.S01E01.Pokémon, Escolho-te!.mkv")
        );
        assert_eq!(
            plan[1].target.as_deref().map(display_name).as_deref(),
            Some("Pokémon.S01E02.Episode 2.mkv")
        );
        assert_eq!(plan[2].status, RenameStatus::Unchanged);
        assert_eq!(plan[3].status, RenameStatus::Skipped);
    }

    #[test]
    fn test_execute_renames() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            media(temp.path(), "pokemon 01.mkv"),
            media(temp.path(), "pokemon 02.mkv"),
        ];
        // Occupy the second target so that rename fails.
        fs::write(temp.path().join("Pokémon.S01E02.Episode 2.mkv"), "other").unwrap();

        let mut plan = plan_renames(&files, "Pokémon", &season(), None);
        let summary = execute_renames(&mut plan);

        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 1);
        assert!(temp.path().join("Pokémon.S01E01.Pokémon, Escolho-te!.mkv").exists());
        assert!(!temp.path().join("pokemon 01.mkv").exists());
        assert!(temp.path().join("pokemon 02.mkv").exists());
        assert!(matches!(plan[1].status, RenameStatus::Failed(_)));
        assert_eq!(plan[1].current_path(), temp.path().join("pokemon 02.mkv"));
    }
}
