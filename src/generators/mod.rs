//! Output generators: episode file names and NFO sidecars.

pub mod filename;
pub mod nfo;
