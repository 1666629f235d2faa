//! Media Files Organizer Library
//!
//! Renames TV show episodes, writes media-center sidecar files, and keeps a
//! local catalogue of Portuguese dub casts scraped from the dubbing wiki.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
