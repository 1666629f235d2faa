//! Core business logic modules.

pub mod organizer;
pub mod renamer;
pub mod scanner;
pub mod scrape;
