//! FFprobe service for extracting stream details from media files.

use crate::models::media::{AudioStream, StreamDetails, VideoStream};
use crate::Result;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// FFprobe output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

/// FFprobe stream information.
#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    codec_tag_string: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    display_aspect_ratio: Option<String>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    field_order: Option<String>,
    bit_rate: Option<String>,
    channels: Option<u32>,
    sample_rate: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    disposition: FfprobeDisposition,
    #[serde(default)]
    tags: FfprobeTags,
}

/// Stream disposition flags.
#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    default: u8,
    #[serde(default)]
    forced: u8,
}

/// Stream tags.
#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

/// FFprobe format information.
#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    bit_rate: Option<String>,
}

/// Check if ffprobe is installed.
pub fn is_installed() -> bool {
    Command::new("ffprobe")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get ffprobe version.
pub fn get_version() -> Result<String> {
    let output = Command::new("ffprobe").arg("-version").output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.to_string())
}

/// Probe a media file.
pub fn probe(path: &Path) -> Result<StreamDetails> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                crate::Error::FfprobeNotFound
            } else {
                e.into()
            }
        })?;

    if !output.status.success() {
        return Err(crate::Error::Probe(path.display().to_string()));
    }

    parse_stream_details(&output.stdout)
}

/// Map ffprobe JSON output to stream details.
pub fn parse_stream_details(json: &[u8]) -> Result<StreamDetails> {
    let ffprobe: FfprobeOutput = serde_json::from_slice(json)?;

    let format_duration = ffprobe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(parse_seconds);
    let format_bit_rate = ffprobe
        .format
        .as_ref()
        .and_then(|f| f.bit_rate.as_deref())
        .and_then(|b| b.parse().ok());

    let mut details = StreamDetails::default();

    for stream in &ffprobe.streams {
        match stream.codec_type.as_str() {
            "video" if details.video.is_none() => {
                details.video = Some(video_stream(stream, format_duration, format_bit_rate));
            }
            "audio" => details.audio.push(audio_stream(stream)),
            "subtitle" => details.subtitles.push(language_of(stream)),
            _ => {}
        }
    }

    Ok(details)
}

fn video_stream(
    stream: &FfprobeStream,
    format_duration: Option<u64>,
    format_bit_rate: Option<u64>,
) -> VideoStream {
    let aspect = stream
        .display_aspect_ratio
        .clone()
        .filter(|a| a != "0:1" && a != "N/A");
    let aspect_ratio = aspect
        .as_deref()
        .and_then(parse_ratio)
        .or_else(|| match (stream.width, stream.height) {
            (Some(w), Some(h)) if h > 0 => Some(w as f64 / h as f64),
            _ => None,
        })
        .map(round2);

    let framerate = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_ratio)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_ratio))
        .map(round2);

    VideoStream {
        codec: stream.codec_name.clone().unwrap_or_else(|| "unknown".to_string()),
        micodec: stream.codec_tag_string.clone().unwrap_or_default(),
        bitrate: stream
            .bit_rate
            .as_deref()
            .and_then(|b| b.parse().ok())
            .or(format_bit_rate),
        width: stream.width,
        height: stream.height,
        aspect,
        aspect_ratio,
        framerate,
        scan_type: scan_type(stream.field_order.as_deref()).to_string(),
        default: stream.disposition.default == 1,
        forced: stream.disposition.forced == 1,
        duration_seconds: stream
            .duration
            .as_deref()
            .and_then(parse_seconds)
            .or(format_duration),
    }
}

fn audio_stream(stream: &FfprobeStream) -> AudioStream {
    AudioStream {
        codec: stream.codec_name.clone().unwrap_or_else(|| "unknown".to_string()),
        micodec: stream.codec_tag_string.clone().unwrap_or_default(),
        bitrate: stream.bit_rate.as_deref().and_then(|b| b.parse().ok()),
        language: language_of(stream),
        channels: stream.channels,
        sampling_rate: stream.sample_rate.as_deref().and_then(|s| s.parse().ok()),
        default: stream.disposition.default == 1,
        forced: stream.disposition.forced == 1,
    }
}

fn language_of(stream: &FfprobeStream) -> String {
    stream
        .tags
        .language
        .clone()
        .filter(|l| !l.is_empty() && l != "und")
        .unwrap_or_else(|| "unknown".to_string())
}

/// Map ffprobe's field order to a scan type.
fn scan_type(field_order: Option<&str>) -> &'static str {
    match field_order {
        Some("tt") | Some("bb") | Some("tb") | Some("bt") => "interlaced",
        _ => "progressive",
    }
}

/// Parse "24000/1001" or "16:9" into a float.
fn parse_ratio(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/').or_else(|| s.split_once(':'))?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 || num == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Parse "1420.512000" into whole seconds.
fn parse_seconds(s: &str) -> Option<u64> {
    s.parse::<f64>().ok().filter(|d| *d >= 0.0).map(|d| d as u64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
