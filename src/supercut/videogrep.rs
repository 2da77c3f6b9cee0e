use async_trait::async_trait;
use tracing::{debug, info};

use super::{SupercutGenerator, SupercutRequest};
use crate::config::Config;
use crate::error::Result;
use crate::media::MediaCommand;

/// Generates supercuts by running the videogrep CLI
pub struct VideogrepGenerator {
    binary_path: String,
    /// Real ffmpeg handed to the shim when an audio selection is active
    ffmpeg_binary: String,
}

impl VideogrepGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            binary_path: config.supercut.binary_path.clone(),
            ffmpeg_binary: config.media.binary_path.clone(),
        }
    }

    /// Build the videogrep invocation for a request
    pub fn command(&self, request: &SupercutRequest) -> Result<MediaCommand> {
        let mut command = MediaCommand::new(&self.binary_path, "Supercut generation").arg("--input");
        for input in &request.inputs {
            command = command.path(input);
        }

        command = command
            .arg("--search")
            .arg(request.search.as_str())
            .arg("--search-type")
            .arg(request.search_type.as_str())
            .arg("--output")
            .path(&request.output);

        if let Some(padding) = request.padding {
            command = command.arg("--padding").arg(padding.to_string());
        }

        if let Some(audio) = &request.audio {
            for (key, value) in audio.shim_env(&self.ffmpeg_binary)? {
                command = command.env(key, value);
            }
        }

        Ok(command)
    }
}

#[async_trait]
impl SupercutGenerator for VideogrepGenerator {
    async fn generate(&self, request: &SupercutRequest) -> Result<()> {
        info!(
            "Generating supercut {} from {} file(s) for '{}'",
            request.output.display(),
            request.inputs.len(),
            request.search
        );

        let output = self.command(request)?.execute().await?;
        debug!("videogrep output: {}", String::from_utf8_lossy(&output.stdout).trim());

        info!("Supercut generation completed");
        Ok(())
    }
}
