//! Preflight checks module.

mod database;
mod ffprobe;
mod tmdb;
mod wiki;

use crate::models::config::Config;
use colored::Colorize;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// External dependencies a command needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub catalog: bool,
    pub ffprobe: bool,
    pub tmdb: bool,
    pub wiki: bool,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Run the preflight checks a command needs.
pub async fn run_preflight_checks(config: &Config, needs: Requirements) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if needs.catalog {
        results.push(database::check(&config.database.path));
    }
    if needs.ffprobe {
        results.push(ffprobe::check());
    }
    if needs.tmdb {
        results.push(tmdb::check(&config.tmdb).await);
    }
    if needs.wiki {
        results.push(wiki::check(&config.wiki).await);
    }

    results
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if result.success {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_passed() {
        let results = vec![
            CheckResult::ok("ffprobe", "installed"),
            CheckResult::fail("TMDB API", "API key not configured", "Set API_KEY"),
        ];
        assert!(!all_passed(&results));
        assert!(all_passed(&results[..1]));
    }

    #[test]
    fn test_requirements_is_empty() {
        assert!(Requirements::default().is_empty());
        assert!(!Requirements {
            tmdb: true,
            ..Default::default()
        }
        .is_empty());
    }
}
