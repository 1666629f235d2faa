//! Filename generator.

/// Characters that are not allowed in file names on common file systems.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Remove characters that cannot appear in a file name.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Generate an episode filename.
///
/// Format: `${prefix}${series}.S${season:02}E${episode:02}.${title}.${extension}`
///
/// A missing or blank title becomes `Episode <n>`.
pub fn generate_episode_filename(
    series: &str,
    season: u16,
    episode: u16,
    title: Option<&str>,
    extension: &str,
    prefix: Option<&str>,
) -> String {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Episode {}", episode));

    let mut filename = format!(
        "{}{}.S{:02}E{:02}.{}",
        prefix.unwrap_or(""),
        series,
        season,
        episode,
        title
    );
    if !extension.is_empty() {
        filename.push('.');
        filename.push_str(extension.trim_start_matches('.'));
    }

    sanitize_filename(&filename)
}
