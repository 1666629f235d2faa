//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// Catalog database configuration.
    pub database: DatabaseConfig,
    /// Dubbing wiki configuration.
    pub wiki: WikiConfig,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

/// Catalog database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file.
    pub path: PathBuf,
}

/// Dubbing wiki configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Base URL that relative wiki links are joined onto.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            database: DatabaseConfig::default(),
            wiki: WikiConfig::default(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "en-US".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: dirs_data_path().join("catalog.sqlite3"),
        }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wikidobragens.fandom.com".to_string(),
            timeout: 10,
        }
    }
}

impl Config {
    /// Apply environment overrides: `API_KEY`/`TMDB_API_KEY`, `TMDB_LANGUAGE`, `DB_PATH`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup function.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("API_KEY").or_else(|| non_empty("TMDB_API_KEY")) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(language) = non_empty("TMDB_LANGUAGE") {
            self.tmdb.language = language;
        }
        if let Some(path) = non_empty("DB_PATH") {
            self.database.path = PathBuf::from(path);
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_files_organizer")
}

/// Get the data directory path.
fn dirs_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_files_organizer")
}

/// Path of the optional config file.
pub fn config_file_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Parse a config from TOML text.
pub fn parse_config(content: &str) -> crate::Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from file, then apply environment overrides.
pub fn load_config() -> Config {
    let config_path = config_file_path();

    let mut config = if config_path.exists() {
        match std::fs::read_to_string(&config_path)
            .map_err(crate::Error::from)
            .and_then(|content| parse_config(&content))
        {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", config_path.display(), e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    config.apply_env();
    config
}
