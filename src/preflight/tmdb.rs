//! TMDB API preflight check.

use super::CheckResult;
use crate::models::config::TmdbConfig;
use crate::services::tmdb::{self, TmdbClient};

const NAME: &str = "TMDB API";

/// Check that the configured key is accepted by TMDB.
pub async fn check(config: &TmdbConfig) -> CheckResult {
    let client_config = match tmdb::TmdbConfig::from_config(config) {
        Ok(c) => c,
        Err(_) => {
            return CheckResult::fail(
                NAME,
                "API key not configured",
                "Set API_KEY (or TMDB_API_KEY) in the environment, .env or config.toml",
            )
        }
    };

    let auth = if client_config.use_bearer {
        "bearer token"
    } else {
        "v3 key"
    };
    let client = TmdbClient::new(client_config);

    match client.verify_api_key().await {
        Ok(true) => CheckResult::ok(
            NAME,
            &format!("connected ({}, {})", auth, config.language),
        ),
        Ok(false) => CheckResult::fail(
            NAME,
            &format!("{} rejected", auth),
            "Check the value of API_KEY",
        ),
        Err(e) => CheckResult::fail(
            NAME,
            &format!("connection failed: {}", e),
            "Check your network connection",
        ),
    }
}
