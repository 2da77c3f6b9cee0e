use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::MediaConfig;
use crate::error::{Result, SupercutError};
use crate::media::{MediaCommandBuilder, MediaEntry};

/// Produces a subtitle file for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubtitleExtractor: Send + Sync {
    /// Write the video's subtitles to `subtitle_path`, overwriting it
    async fn extract(&self, video_path: &Path, subtitle_path: &Path) -> Result<()>;
}

/// Extracts the embedded subtitle stream with ffmpeg
pub struct FfmpegSubtitleExtractor {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl FfmpegSubtitleExtractor {
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl SubtitleExtractor for FfmpegSubtitleExtractor {
    async fn extract(&self, video_path: &Path, subtitle_path: &Path) -> Result<()> {
        info!("Extracting subtitles from {} to {}", video_path.display(), subtitle_path.display());

        let command = self.command_builder.extract_subtitles(
            video_path,
            subtitle_path,
            &self.config.subtitle_stream,
        );
        command.execute().await?;

        Ok(())
    }
}

/// Which subtitle files are removed when the run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// Never delete subtitles
    KeepAll,
    /// Delete only subtitles extracted during this run
    DeleteGenerated,
    /// Delete every subtitle found; extraction and search are skipped
    DeleteAll,
}

impl CleanupPolicy {
    pub fn from_flags(delete_generated: bool, delete_all: bool) -> Self {
        if delete_all {
            CleanupPolicy::DeleteAll
        } else if delete_generated {
            CleanupPolicy::DeleteGenerated
        } else {
            CleanupPolicy::KeepAll
        }
    }
}

/// Where the subtitle of a video came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleOrigin {
    /// Already on disk before the run
    Existing,
    /// Extracted during this run
    Generated,
    /// Not present and not extracted
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provision {
    pub subtitle_path: PathBuf,
    pub origin: SubtitleOrigin,
    pub mark_for_deletion: bool,
}

/// Make sure the entry's subtitle exists, extracting it when missing
pub async fn provision(
    extractor: &dyn SubtitleExtractor,
    entry: &MediaEntry,
    policy: CleanupPolicy,
) -> Result<Provision> {
    entry.check_subtitle_path()?;

    let subtitle_path = entry.subtitle_path.clone();
    let exists = subtitle_path.is_file();

    if policy == CleanupPolicy::DeleteAll {
        debug!("Delete-all mode, skipping extraction for {}", entry.path.display());
        return Ok(Provision {
            subtitle_path,
            origin: if exists { SubtitleOrigin::Existing } else { SubtitleOrigin::Absent },
            mark_for_deletion: exists,
        });
    }

    if exists {
        debug!("Reusing existing subtitles {}", subtitle_path.display());
        return Ok(Provision {
            subtitle_path,
            origin: SubtitleOrigin::Existing,
            mark_for_deletion: false,
        });
    }

    extractor.extract(&entry.path, &subtitle_path).await?;

    if !subtitle_path.is_file() {
        return Err(SupercutError::Tool(format!(
            "Subtitle extraction produced no file at {}",
            subtitle_path.display()
        )));
    }

    Ok(Provision {
        subtitle_path,
        origin: SubtitleOrigin::Generated,
        mark_for_deletion: policy == CleanupPolicy::DeleteGenerated,
    })
}
