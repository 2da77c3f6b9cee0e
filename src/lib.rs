//! Supercut - Batch Dialogue Supercut Generation
//!
//! Walks a tree of video files, extracts missing subtitles with ffmpeg, and
//! asks videogrep to cut the clips whose dialogue matches a search into
//! per-episode or combined supercuts.

pub mod audio;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod naming;
pub mod options;
pub mod subtitle;
pub mod supercut;
pub mod walker;
pub mod workflow;
