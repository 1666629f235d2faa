//! Error types for the media files organizer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media files organizer.
#[derive(Error, Debug)]
pub enum Error {
    // Preflight errors
    #[error("ffprobe not found. Install FFmpeg: sudo apt install ffmpeg")]
    FfprobeNotFound,

    #[error("TMDB API key not configured. Set API_KEY (or TMDB_API_KEY) environment variable")]
    TmdbApiKeyMissing,

    #[error("TMDB API key invalid")]
    TmdbApiKeyInvalid,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("No supported media files found in: {0}")]
    NoMediaFiles(String),

    // Season inference errors
    #[error("Mixed seasons detected: expected season {expected}, found season {found} in {file}")]
    MixedSeasons {
        expected: u16,
        found: u16,
        file: String,
    },

    #[error("Could not infer season from filenames. Use --season or name files like S01E01")]
    SeasonNotInferred,

    // Catalog store errors
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Referential integrity violated: {entity} with id {id} does not exist")]
    Referential { entity: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // TMDB errors
    #[error("TMDB request failed with HTTP {status}: {endpoint}")]
    TmdbRequest { status: u16, endpoint: String },

    #[error("Season {season} not found on TMDB for show {tmdb_id}")]
    SeasonNotFound { tmdb_id: u64, season: u16 },

    // Wiki scraping errors
    #[error("Scrape failed: {0}")]
    Scrape(String),

    // Media probing errors
    #[error("ffprobe failed for {0}")]
    Probe(String),

    // Config errors
    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a scrape error from a string.
    pub fn scrape<S: Into<String>>(msg: S) -> Self {
        Error::Scrape(msg.into())
    }
}
