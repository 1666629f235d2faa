//! Dubbing wiki preflight check.

use super::CheckResult;
use crate::models::config::WikiConfig;
use crate::services::dub_wiki::WikiClient;

/// Check if the dubbing wiki is reachable.
pub async fn check(config: &WikiConfig) -> CheckResult {
    let client = match WikiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::fail(
                "Dub wiki",
                &format!("client error: {}", e),
                "Check the [wiki] section of your config file",
            )
        }
    };

    match client.health_check().await {
        Ok(true) => CheckResult::ok("Dub wiki", &format!("reachable ({})", config.base_url)),
        Ok(false) | Err(_) => CheckResult::fail(
            "Dub wiki",
            "not reachable",
            "Check your network connection or wiki.base_url",
        ),
    }
}
