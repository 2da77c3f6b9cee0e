use std::path::{Path, PathBuf};

use super::classify::{guess_mime_type, is_video};
use crate::error::{Result, SupercutError};

/// Extension every subtitle sidecar carries
pub const SUBTITLE_EXTENSION: &str = "srt";

/// A video file accepted for processing, with the attributes derived from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub path: PathBuf,
    /// File name without directory or extension
    pub stem: String,
    pub mime_type: &'static str,
    pub subtitle_path: PathBuf,
}

impl MediaEntry {
    /// Build an entry for `path`, or `None` when the name does not denote a video
    pub fn from_path(path: &Path) -> Option<Self> {
        if !is_video(path) {
            return None;
        }
        let mime_type = guess_mime_type(path)?;
        let stem = path.file_stem()?.to_string_lossy().to_string();

        Some(Self {
            path: path.to_path_buf(),
            stem,
            mime_type,
            subtitle_path: subtitle_path_for(path),
        })
    }

    /// Ensure the sidecar path satisfies the `.srt` relation
    pub fn check_subtitle_path(&self) -> Result<()> {
        let is_srt = self
            .subtitle_path
            .extension()
            .is_some_and(|ext| ext == SUBTITLE_EXTENSION);

        if is_srt && self.subtitle_path == subtitle_path_for(&self.path) {
            Ok(())
        } else {
            Err(SupercutError::Precondition(format!(
                "subtitle path must be {} with an .{} extension, got {}",
                self.path.display(),
                SUBTITLE_EXTENSION,
                self.subtitle_path.display()
            )))
        }
    }
}

/// The video's path with its extension replaced by `.srt`
pub fn subtitle_path_for(video_path: &Path) -> PathBuf {
    video_path.with_extension(SUBTITLE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_for_video() {
        let entry = MediaEntry::from_path(Path::new("/shows/Drama/Season 1/Drama.S01E01.mp4")).unwrap();

        assert_eq!(entry.stem, "Drama.S01E01");
        assert_eq!(entry.mime_type, "video/mp4");
        assert_eq!(entry.subtitle_path, PathBuf::from("/shows/Drama/Season 1/Drama.S01E01.srt"));
        assert!(entry.check_subtitle_path().is_ok());
    }

    #[test]
    fn test_non_video_has_no_entry() {
        assert!(MediaEntry::from_path(Path::new("/shows/Drama/Season 1/Drama.S01E01.srt")).is_none());
        assert!(MediaEntry::from_path(Path::new("/shows/Drama/notes")).is_none());
    }

    #[test]
    fn test_tampered_subtitle_path_violates_precondition() {
        let mut entry = MediaEntry::from_path(Path::new("/tmp/clip.mkv")).unwrap();
        entry.subtitle_path = PathBuf::from("/tmp/clip.vtt");

        let err = entry.check_subtitle_path().unwrap_err();
        assert!(matches!(err, SupercutError::Precondition(_)));
    }
}
