use std::path::Path;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SupercutError};

/// Abstract external command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            envs: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set an environment variable for the child process only
    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Add a path argument
    pub fn path<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").path(path)
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.path(path)
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Select a stream of the input
    pub fn map_stream<S: Into<String>>(self, selector: S) -> Self {
        self.arg("-map").arg(selector)
    }

    /// Execute the command, failing when the process exits abnormally
    pub async fn execute(&self) -> Result<Output> {
        debug!("Executing command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let output = cmd.output().await.map_err(|e| {
            SupercutError::Tool(format!("Failed to execute {}: {}", self.binary_path, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SupercutError::Tool(format!(
                "{} failed ({}): {}",
                self.description,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

/// Builder for the ffmpeg invocations the run needs
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build subtitle extraction command
    pub fn extract_subtitles<P: AsRef<Path>>(
        &self,
        video_path: P,
        subtitle_path: P,
        stream_selector: &str,
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Subtitle extraction")
            .overwrite()
            .input(video_path)
            .map_stream(stream_selector)
            .output(subtitle_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_subtitles_selects_first_subtitle_stream() {
        let builder = MediaCommandBuilder::new("ffmpeg");
        let cmd = builder.extract_subtitles(
            Path::new("/shows/Drama/Season 1/Drama.S01E01.mp4"),
            Path::new("/shows/Drama/Season 1/Drama.S01E01.srt"),
            "0:s:0",
        );

        assert_eq!(cmd.binary_path, "ffmpeg");
        assert_eq!(
            cmd.args,
            vec![
                "-y",
                "-i",
                "/shows/Drama/Season 1/Drama.S01E01.mp4",
                "-map",
                "0:s:0",
                "/shows/Drama/Season 1/Drama.S01E01.srt",
            ]
        );
        assert!(cmd.envs.is_empty());
    }

    #[test]
    fn test_env_is_recorded_per_command() {
        let cmd = MediaCommand::new("videogrep", "Supercut generation").env("FFMPEG_BINARY", "/bin/shim");
        assert_eq!(cmd.envs, vec![("FFMPEG_BINARY".to_string(), "/bin/shim".to_string())]);
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_error() {
        let cmd = MediaCommand::new("/nonexistent/bin/ffmpeg-missing", "Version check").arg("-version");
        let err = cmd.execute().await.unwrap_err();
        assert!(matches!(err, SupercutError::Tool(_)));
    }
}
