//! CLI command implementations.

pub mod init_db;
pub mod organize;
pub mod person;
pub mod season;
pub mod show;

/// Shorten `text` to `max` characters for table output.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        text.to_string()
    }
}
