use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, SupercutError};

/// Name of the config file picked up from the current directory
pub const DEFAULT_CONFIG_FILE: &str = "supercut.toml";

fn default_ffmpeg_binary() -> String {
    "ffmpeg".to_string()
}

fn default_subtitle_stream() -> String {
    "0:s:0".to_string()
}

fn default_videogrep_binary() -> String {
    "videogrep".to_string()
}

fn default_container_extension() -> String {
    "mp4".to_string()
}

fn default_combined_padding() -> Option<f64> {
    Some(1.0)
}

fn default_python_binary() -> String {
    "python3".to_string()
}

fn default_audio_language() -> String {
    "eng".to_string()
}

fn default_supported_moviepy_versions() -> Vec<String> {
    vec!["1.0.3".to_string()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub supercut: SupercutConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    #[serde(default = "default_ffmpeg_binary")]
    pub binary_path: String,
    /// Stream selector used when extracting subtitles (first subtitle stream by default)
    #[serde(default = "default_subtitle_stream")]
    pub subtitle_stream: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupercutConfig {
    /// Path to videogrep binary
    #[serde(default = "default_videogrep_binary")]
    pub binary_path: String,
    /// Container extension of generated supercuts
    #[serde(default = "default_container_extension")]
    pub container_extension: String,
    /// Directory receiving supercuts; current directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Seconds of padding around each clip of a combined supercut
    #[serde(default = "default_combined_padding", skip_serializing_if = "Option::is_none")]
    pub combined_padding: Option<f64>,
    /// Seconds of padding around each clip of a per-episode supercut
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_padding: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Interpreter used to probe the moviepy version videogrep runs on
    #[serde(default = "default_python_binary")]
    pub python_binary: String,
    /// Audio language selected by the stream mapping
    #[serde(default = "default_audio_language")]
    pub language: String,
    /// moviepy releases whose audio reader accepts the injected mapping
    #[serde(default = "default_supported_moviepy_versions")]
    pub supported_moviepy_versions: Vec<String>,
    /// Explicit path to the supercut-ffmpeg shim; defaults to a sibling of the running binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shim_binary: Option<PathBuf>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: default_ffmpeg_binary(),
            subtitle_stream: default_subtitle_stream(),
        }
    }
}

impl Default for SupercutConfig {
    fn default() -> Self {
        Self {
            binary_path: default_videogrep_binary(),
            container_extension: default_container_extension(),
            output_dir: None,
            combined_padding: default_combined_padding(),
            episode_padding: None,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            python_binary: default_python_binary(),
            language: default_audio_language(),
            supported_moviepy_versions: default_supported_moviepy_versions(),
            shim_binary: None,
        }
    }
}

impl Config {
    /// Load from an explicit path, then `supercut.toml` in the current directory, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SupercutError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SupercutError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SupercutError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SupercutError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
