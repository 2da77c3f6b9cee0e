//! Name-based media type inference.
//!
//! Only the file extension is consulted; contents are never sniffed, so a
//! misnamed file is classified by its name.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

static MIME_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Video
        ("mp4", "video/mp4"),
        ("m4v", "video/x-m4v"),
        ("mkv", "video/x-matroska"),
        ("webm", "video/webm"),
        ("avi", "video/x-msvideo"),
        ("mov", "video/quicktime"),
        ("qt", "video/quicktime"),
        ("wmv", "video/x-ms-wmv"),
        ("flv", "video/x-flv"),
        ("mpg", "video/mpeg"),
        ("mpeg", "video/mpeg"),
        ("mpe", "video/mpeg"),
        ("m1v", "video/mpeg"),
        ("ts", "video/mp2t"),
        ("3gp", "video/3gpp"),
        ("ogv", "video/ogg"),
        // Audio
        ("mp3", "audio/mpeg"),
        ("m4a", "audio/mp4"),
        ("aac", "audio/aac"),
        ("wav", "audio/x-wav"),
        ("flac", "audio/flac"),
        ("ogg", "audio/ogg"),
        ("opus", "audio/opus"),
        // Subtitles and sidecars
        ("srt", "application/x-subrip"),
        ("vtt", "text/vtt"),
        ("ass", "text/x-ssa"),
        ("txt", "text/plain"),
        ("nfo", "text/plain"),
        ("json", "application/json"),
        // Images
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("webp", "image/webp"),
    ])
});

/// Guess a MIME type from the file's extension
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    MIME_TYPES.get(extension.as_str()).copied()
}

/// True when the guessed type is in the `video/` category
pub fn is_video(path: &Path) -> bool {
    guess_mime_type(path).is_some_and(|mime| mime.starts_with("video/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extensions() {
        assert_eq!(guess_mime_type(Path::new("Show.S02E05.mp4")), Some("video/mp4"));
        assert_eq!(guess_mime_type(Path::new("movie.MKV")), Some("video/x-matroska"));
        assert!(is_video(Path::new("/tv/Drama/Season 1/Drama.S01E01.avi")));
        assert!(is_video(Path::new("clip.Mov")));
    }

    #[test]
    fn test_non_video_types_are_not_videos() {
        assert!(!is_video(Path::new("Drama.S01E01.srt")));
        assert!(!is_video(Path::new("theme.mp3")));
        assert!(!is_video(Path::new("poster.jpg")));
    }

    #[test]
    fn test_unknown_type_is_none() {
        assert_eq!(guess_mime_type(Path::new("README")), None);
        assert_eq!(guess_mime_type(Path::new("archive.xyz")), None);
        assert_eq!(guess_mime_type(Path::new(".hidden")), None);
        assert!(!is_video(Path::new("archive.xyz")));
    }
}
