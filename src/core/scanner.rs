//! Season directory scanner.
//!
//! Lists the episode files of a single season directory and works out which
//! season and episode each file holds from its name.

use crate::models::media::MediaFile;
use crate::utils::fs::{ensure_directory, get_extension, is_sample, is_video_file};
use crate::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Episode number patterns, tried in order.
const EPISODE_PATTERNS: &[&str] = &[
    r"(?i)(?:S|T)\d{1,2}E(\d{1,3})",
    r"(?i)\bE(\d{1,2})\b",
    r"(?i)\bEp\.?\s?(\d{1,2})\b",
    r"^(\d{1,2})\s+",
    r"-\s*(\d{1,2})\s",
    r"\b(\d{1,2})\b",
];

/// List the video files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into and sample files are left out.
pub fn list_media_files(dir: &Path) -> Result<Vec<MediaFile>> {
    ensure_directory(dir)?;

    let mut files: Vec<MediaFile> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_video_file(e.path()))
        .filter(|e| {
            let sample = is_sample(e.path());
            if sample {
                tracing::debug!("Skipping sample: {}", e.path().display());
            }
            !sample
        })
        .map(|e| MediaFile {
            path: e.path().to_path_buf(),
            filename: e.file_name().to_string_lossy().to_string(),
            extension: get_extension(e.path()).unwrap_or_default(),
        })
        .collect();

    if files.is_empty() {
        return Err(crate::Error::NoMediaFiles(dir.display().to_string()));
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    tracing::info!("Found {} media files in {}", files.len(), dir.display());

    Ok(files)
}

/// Season number encoded as `S01E02` or `T01E02` in a file name.
pub fn season_from_filename(filename: &str) -> Option<u16> {
    let re = regex::Regex::new(r"(?i)(?:S|T)(\d{1,2})E\d{1,3}").ok()?;
    re.captures(filename)?.get(1)?.as_str().parse().ok()
}

/// Work out the season held by `files`.
///
/// With `expected` set, every file that names a season must name that one.
/// Otherwise the first named season wins and the rest must agree with it.
pub fn infer_season(files: &[MediaFile], expected: Option<u16>) -> Result<u16> {
    let mut season = expected;

    for file in files {
        let Some(found) = season_from_filename(&file.filename) else {
            continue;
        };
        match season {
            None => season = Some(found),
            Some(s) if s != found => {
                return Err(crate::Error::MixedSeasons {
                    expected: s,
                    found,
                    file: file.filename.clone(),
                });
            }
            Some(_) => {}
        }
    }

    season.ok_or(crate::Error::SeasonNotInferred)
}

/// Episode number from a file name, or `None` if nothing looks like one.
pub fn extract_episode_number(filename: &str) -> Option<u16> {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string());

    for pattern in EPISODE_PATTERNS {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(n) = re
                .captures(&stem)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
            {
                return Some(n);
            }
        }
    }

    None
}
