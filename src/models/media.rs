//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Media file found in a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without path.
    pub filename: String,
    /// Lowercase extension without the dot.
    pub extension: String,
}

/// A cast or crew credit as written into sidecar files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    /// Person name.
    pub name: String,
    /// Original (native) name, if known.
    pub original_name: Option<String>,
    /// Credit type: "Actor", "GuestStar", or a crew job like "Director".
    pub kind: String,
    /// Character played (cast only).
    pub role: Option<String>,
    /// Remote photo URL.
    pub photo: Option<String>,
    /// Billing order.
    pub order: Option<u32>,
}

/// TMDB metadata for a TV show.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TvShowMetadata {
    /// TMDB ID.
    pub tmdb_id: u64,
    /// IMDB ID.
    pub imdb_id: Option<String>,
    /// TVDB ID.
    pub tvdb_id: Option<u64>,
    /// Localized name.
    pub name: String,
    /// Original name.
    pub original_name: String,
    /// First air year.
    pub year: Option<u16>,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Overview/synopsis.
    pub overview: Option<String>,
    /// Status (e.g. "Returning Series").
    pub status: Option<String>,
    pub genres: Vec<String>,
    pub number_of_seasons: u16,
    pub number_of_episodes: u16,
    /// User rating (0-10).
    pub rating: Option<f32>,
    pub votes: Option<u32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub cast: Vec<Credit>,
}

/// TMDB metadata for one season, including its episodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonMetadata {
    pub season_number: u16,
    /// Season name as TMDB reports it.
    pub name: String,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub rating: Option<f32>,
    pub poster_url: Option<String>,
    pub episodes: Vec<EpisodeMetadata>,
    /// Aggregate cast across the season.
    pub cast: Vec<Credit>,
    /// Aggregate crew across the season.
    pub crew: Vec<Credit>,
}

impl SeasonMetadata {
    /// Find an episode by number.
    pub fn episode(&self, episode_number: u16) -> Option<&EpisodeMetadata> {
        self.episodes
            .iter()
            .find(|e| e.episode_number == episode_number)
    }
}

/// TMDB metadata for a TV episode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeMetadata {
    /// Season number.
    pub season_number: u16,
    /// Episode number.
    pub episode_number: u16,
    /// Episode name.
    pub name: String,
    /// Air date.
    pub air_date: Option<String>,
    /// Overview.
    pub overview: Option<String>,
    pub rating: Option<f32>,
    pub still_url: Option<String>,
    pub guest_stars: Vec<Credit>,
    pub crew: Vec<Credit>,
}

/// Technical stream information read from a media file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamDetails {
    pub video: Option<VideoStream>,
    pub audio: Vec<AudioStream>,
    /// Subtitle languages.
    pub subtitles: Vec<String>,
}

/// Video track attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoStream {
    /// Codec name (e.g. "h264", "hevc").
    pub codec: String,
    /// Codec tag (e.g. "avc1").
    pub micodec: String,
    pub bitrate: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Display aspect, e.g. "16:9".
    pub aspect: Option<String>,
    /// Numeric aspect ratio, e.g. 1.78.
    pub aspect_ratio: Option<f64>,
    pub framerate: Option<f64>,
    /// "progressive" or "interlaced".
    pub scan_type: String,
    pub default: bool,
    pub forced: bool,
    pub duration_seconds: Option<u64>,
}

impl VideoStream {
    /// Duration formatted as `"<m>m <s>s"`.
    pub fn duration_display(&self) -> Option<String> {
        self.duration_seconds
            .map(|s| format!("{}m {}s", s / 60, s % 60))
    }
}

/// Audio track attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioStream {
    pub codec: String,
    pub micodec: String,
    pub bitrate: Option<u64>,
    /// ISO language code, "unknown" if untagged.
    pub language: String,
    pub channels: Option<u32>,
    pub sampling_rate: Option<u32>,
    pub default: bool,
    pub forced: bool,
}
