//! FFprobe preflight check.

use super::CheckResult;
use crate::services::ffprobe;

/// Short version from ffprobe's banner, e.g. "6.1.1" from
/// "ffprobe version 6.1.1-3ubuntu5 Copyright ...".
fn short_version(banner: &str) -> Option<&str> {
    banner
        .strip_prefix("ffprobe version ")?
        .split_whitespace()
        .next()
}

/// Check that ffprobe can be run to read stream details.
pub fn check() -> CheckResult {
    if !ffprobe::is_installed() {
        return CheckResult::fail(
            "ffprobe",
            "not found",
            "Install FFmpeg (sudo apt install ffmpeg); episode NFOs need stream details",
        );
    }

    match ffprobe::get_version() {
        Ok(banner) => match short_version(&banner) {
            Some(version) => CheckResult::ok("ffprobe", &format!("installed ({})", version)),
            None => CheckResult::ok("ffprobe", "installed"),
        },
        Err(_) => CheckResult::ok("ffprobe", "installed"),
    }
}
