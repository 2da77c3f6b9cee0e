//! Supercut - Batch Dialogue Supercut Generation
//!
//! Entry point of the `supercut` binary: walks a tree of videos, makes sure
//! each has subtitles, and builds supercuts of the matching dialogue with
//! ffmpeg and videogrep.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use supercut::audio::resolve_audio_selection;
use supercut::cli::Args;
use supercut::config::Config;
use supercut::walker::InputKind;
use supercut::workflow::{RunOutcome, Workflow};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;
    info!("Starting Supercut");

    if let Some(path) = &args.init_config {
        Config::default().save_to_file(path)?;
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let options = args.run_options(&config)?;

    if InputKind::of(&options.input) == InputKind::Missing {
        println!("invalid input");
        warn!("Input does not exist: {}", options.input.display());
        return Ok(());
    }

    let audio = resolve_audio_selection(options.force_english, &config.audio).await;
    let workflow = Workflow::from_config(config, audio)?;

    match workflow.run(&options).await? {
        RunOutcome::InvalidInput(_) => println!("invalid input"),
        RunOutcome::Completed(summary) => {
            info!(
                "Done: {} files visited, {} videos, {} subtitles extracted, {} subtitles deleted",
                summary.files_visited,
                summary.videos_accepted,
                summary.subtitles_extracted,
                summary.subtitles_deleted
            );
            for supercut in &summary.supercuts {
                println!("{}", supercut.display());
            }
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".supercut").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "supercut.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
