// Media handling
//
// - Classify: name-based MIME inference deciding which files are videos
// - Entry: an accepted video and its derived subtitle sidecar
// - Commands: external command builder and executor shared by ffmpeg and videogrep

pub mod classify;
pub mod commands;
pub mod entry;

pub use classify::{guess_mime_type, is_video};
pub use commands::*;
pub use entry::*;
