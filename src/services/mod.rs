//! External services: TMDB, ffprobe, and the dubbing wiki.

pub mod dub_wiki;
pub mod ffprobe;
pub mod tmdb;
