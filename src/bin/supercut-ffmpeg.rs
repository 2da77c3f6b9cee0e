//! ffmpeg shim used as moviepy's `FFMPEG_BINARY` while videogrep renders a supercut.
//!
//! Every invocation is forwarded to the real ffmpeg; audio reads additionally
//! get the stream mapping passed in by the parent `supercut` process.

use anyhow::{Context, Result};
use std::env;
use std::process::{exit, Command};

use supercut::audio::{inject_stream_args, AUDIO_ARGS_ENV, REAL_FFMPEG_ENV};

fn main() -> Result<()> {
    let real_ffmpeg = env::var_os(REAL_FFMPEG_ENV).unwrap_or_else(|| "ffmpeg".into());
    let extra: Vec<String> = match env::var(AUDIO_ARGS_ENV) {
        Ok(raw) => serde_json::from_str(&raw).with_context(|| format!("invalid {}", AUDIO_ARGS_ENV))?,
        Err(_) => Vec::new(),
    };

    let args = inject_stream_args(env::args_os().skip(1).collect(), &extra);

    let status = Command::new(&real_ffmpeg)
        .args(&args)
        .status()
        .with_context(|| format!("failed to run {}", real_ffmpeg.to_string_lossy()))?;

    exit(status.code().unwrap_or(1));
}
