//! English audio selection for the audio reads done by the supercut tool.
//!
//! videogrep renders clips through moviepy, whose audio reader spawns ffmpeg
//! without any stream mapping, so a multi-language source may yield the wrong
//! track. moviepy resolves ffmpeg through the `FFMPEG_BINARY` environment
//! variable; pointing it at the `supercut-ffmpeg` shim lets us add a
//! `-map 0:a:m:language:<lang>?` selector to audio reads of that one child
//! process, leaving every other ffmpeg call untouched.

use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::AudioConfig;
use crate::error::{Result, SupercutError};
use crate::media::MediaCommand;

/// Variable moviepy reads to locate ffmpeg
pub const MOVIEPY_FFMPEG_ENV: &str = "FFMPEG_BINARY";
/// Real ffmpeg the shim forwards to
pub const REAL_FFMPEG_ENV: &str = "SUPERCUT_REAL_FFMPEG";
/// JSON array of arguments the shim adds to audio reads
pub const AUDIO_ARGS_ENV: &str = "SUPERCUT_AUDIO_ARGS";

const SHIM_NAME: &str = "supercut-ffmpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSelection {
    pub language: String,
    /// The `supercut-ffmpeg` shim moviepy is pointed at
    pub shim: PathBuf,
}

impl AudioSelection {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(language: S, shim: P) -> Self {
        Self {
            language: language.into(),
            shim: shim.into(),
        }
    }

    /// Stream mapping picking the first audio stream in the language, if any
    pub fn stream_args(&self) -> Vec<String> {
        vec!["-map".to_string(), format!("0:a:m:language:{}?", self.language)]
    }

    /// Environment that routes a child's ffmpeg calls through the shim
    pub fn shim_env(&self, real_ffmpeg: &str) -> Result<Vec<(String, String)>> {
        Ok(vec![
            (MOVIEPY_FFMPEG_ENV.to_string(), self.shim.to_string_lossy().to_string()),
            (REAL_FFMPEG_ENV.to_string(), real_ffmpeg.to_string()),
            (AUDIO_ARGS_ENV.to_string(), serde_json::to_string(&self.stream_args())?),
        ])
    }
}

/// Add `extra` right after `-vn` when `args` describe an audio read piped to stdout
pub fn inject_stream_args(args: Vec<OsString>, extra: &[String]) -> Vec<OsString> {
    let is_audio_read = args.last().is_some_and(|last| last == "-");
    let no_video = args.iter().position(|arg| arg == "-vn");

    match no_video {
        Some(index) if is_audio_read && !extra.is_empty() => {
            let mut injected = Vec::with_capacity(args.len() + extra.len());
            injected.extend_from_slice(&args[..=index]);
            injected.extend(extra.iter().map(OsString::from));
            injected.extend_from_slice(&args[index + 1..]);
            injected
        }
        _ => args,
    }
}

/// Default shim location: next to the running executable
pub fn shim_binary_path(config: &AudioConfig) -> Result<PathBuf> {
    if let Some(path) = &config.shim_binary {
        return Ok(path.clone());
    }

    let exe = std::env::current_exe()?;
    Ok(exe.with_file_name(format!("{}{}", SHIM_NAME, std::env::consts::EXE_SUFFIX)))
}

/// The shim path, provided a file is actually there
pub fn locate_shim(config: &AudioConfig) -> Result<PathBuf> {
    let path = shim_binary_path(config)?;
    if !path.is_file() {
        return Err(SupercutError::Precondition(format!(
            "{} not found at {}",
            SHIM_NAME,
            path.display()
        )));
    }

    Ok(path)
}

/// Installed moviepy version, as reported by the configured interpreter
pub async fn probe_moviepy_version(python_binary: &str) -> Result<String> {
    let output = MediaCommand::new(python_binary, "moviepy version probe")
        .arg("-c")
        .arg("import importlib.metadata as m; print(m.version('moviepy'))")
        .execute()
        .await?;

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(SupercutError::Tool("moviepy version probe printed nothing".to_string()));
    }

    Ok(version)
}

/// Whether `version` is a moviepy release we know how to handle
pub fn supports_version(version: &str, config: &AudioConfig) -> bool {
    config
        .supported_moviepy_versions
        .iter()
        .any(|supported| supported == version)
}

/// Decide whether the English audio workaround applies to this run.
/// Any failure degrades to `None` with a console message.
pub async fn resolve_audio_selection(enabled: bool, config: &AudioConfig) -> Option<AudioSelection> {
    if !enabled {
        debug!("Audio language selection disabled");
        return None;
    }

    let shim = match locate_shim(config) {
        Ok(shim) => shim,
        Err(e) => {
            println!("unable to apply audio language selection: {}", e);
            warn!("Audio selection not applied: {}", e);
            return None;
        }
    };

    match probe_moviepy_version(&config.python_binary).await {
        Ok(version) if supports_version(&version, config) => {
            info!("Selecting '{}' audio for moviepy {}", config.language, version);
            Some(AudioSelection::new(&config.language, shim))
        }
        Ok(version) => {
            println!(
                "unable to apply audio language selection: moviepy {} found, supported: {}",
                version,
                config.supported_moviepy_versions.join(", ")
            );
            warn!("Unsupported moviepy version {}, audio selection not applied", version);
            None
        }
        Err(e) => {
            println!("unable to apply audio language selection: {}", e);
            warn!("moviepy version probe failed, audio selection not applied: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> AudioSelection {
        AudioSelection::new("eng", "/opt/bin/supercut-ffmpeg")
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_stream_args() {
        assert_eq!(
            selection().stream_args(),
            vec!["-map", "0:a:m:language:eng?"]
        );
    }

    #[test]
    fn test_injects_into_audio_reader() {
        let extra = selection().stream_args();
        let args = os_args(&[
            "-i", "clip.mp4", "-vn", "-loglevel", "error", "-f", "s16le", "-acodec", "pcm_s16le",
            "-ar", "44100", "-ac", "2", "-",
        ]);

        let injected = inject_stream_args(args, &extra);

        assert_eq!(
            injected,
            os_args(&[
                "-i", "clip.mp4", "-vn", "-map", "0:a:m:language:eng?", "-loglevel", "error", "-f",
                "s16le", "-acodec", "pcm_s16le", "-ar", "44100", "-ac", "2", "-",
            ])
        );
    }

    #[test]
    fn test_injects_after_seek_form() {
        let extra = selection().stream_args();
        let args = os_args(&["-ss", "9.0", "-i", "clip.mp4", "-vn", "-ss", "1.0", "-f", "s16le", "-"]);

        let injected = inject_stream_args(args, &extra);

        assert_eq!(&injected[4..7], &os_args(&["-vn", "-map", "0:a:m:language:eng?"])[..]);
        assert_eq!(injected.len(), 12);
    }

    #[test]
    fn test_other_invocations_untouched() {
        let extra = selection().stream_args();

        let video_read = os_args(&["-i", "clip.mp4", "-f", "image2pipe", "-"]);
        assert_eq!(inject_stream_args(video_read.clone(), &extra), video_read);

        let writer = os_args(&["-y", "-i", "in.mp4", "-vn", "out.wav"]);
        assert_eq!(inject_stream_args(writer.clone(), &extra), writer);

        assert!(inject_stream_args(Vec::new(), &extra).is_empty());
    }

    #[test]
    fn test_supports_version() {
        let config = AudioConfig::default();
        assert!(supports_version("1.0.3", &config));
        assert!(!supports_version("2.1.1", &config));
    }

    #[test]
    fn test_shim_env_carries_json_args() {
        let selection = selection();
        let env = selection.shim_env("ffmpeg").unwrap();

        assert_eq!(env[0], (MOVIEPY_FFMPEG_ENV.to_string(), "/opt/bin/supercut-ffmpeg".to_string()));
        assert_eq!(env[1], (REAL_FFMPEG_ENV.to_string(), "ffmpeg".to_string()));
        let args: Vec<String> = serde_json::from_str(&env[2].1).unwrap();
        assert_eq!(args, selection.stream_args());
    }

    #[test]
    fn test_configured_shim_path_wins() {
        let config = AudioConfig {
            shim_binary: Some(PathBuf::from("/usr/local/bin/supercut-ffmpeg")),
            ..AudioConfig::default()
        };
        assert_eq!(shim_binary_path(&config).unwrap(), PathBuf::from("/usr/local/bin/supercut-ffmpeg"));
    }

    #[test]
    fn test_locate_shim_requires_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let shim = dir.path().join("supercut-ffmpeg");

        let config = AudioConfig {
            shim_binary: Some(shim.clone()),
            ..AudioConfig::default()
        };
        assert!(matches!(locate_shim(&config), Err(SupercutError::Precondition(_))));

        std::fs::write(&shim, "").unwrap();
        assert_eq!(locate_shim(&config).unwrap(), shim);
    }

    #[tokio::test]
    async fn test_missing_shim_disables_selection() {
        let config = AudioConfig {
            shim_binary: Some(PathBuf::from("/nonexistent/supercut-ffmpeg")),
            ..AudioConfig::default()
        };
        assert_eq!(resolve_audio_selection(true, &config).await, None);
    }

    #[tokio::test]
    async fn test_disabled_or_unprobeable_selection_is_none() {
        let config = AudioConfig {
            python_binary: "/nonexistent/python".to_string(),
            ..AudioConfig::default()
        };
        assert_eq!(resolve_audio_selection(false, &config).await, None);
        assert_eq!(resolve_audio_selection(true, &config).await, None);
    }
}
