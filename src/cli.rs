use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Result, SupercutError};
use crate::options::RunOptions;
use crate::supercut::SearchType;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,

    /// Dialogue to search for
    #[arg(short, long, required_unless_present = "init_config")]
    pub search: Option<String>,

    /// How the search expression is matched
    #[arg(short = 't', long, value_enum, default_value_t = SearchType::Sentence)]
    pub search_type: SearchType,

    /// Video file or directory tree to process
    #[arg(short, long, required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Delete subtitles generated during this run
    #[arg(short = 'd', long)]
    pub delete_generated: bool,

    /// Delete every subtitle found, without extracting or searching
    #[arg(short = 'D', long)]
    pub delete_all_srt: bool,

    /// Collate all matches into a single supercut
    #[arg(long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub combine: bool,

    /// Prefer English audio streams when rendering clips
    #[arg(long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub force_english: bool,

    /// Directory for generated supercuts (overrides the config file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    /// Resolve the run settings from the arguments and the loaded configuration
    pub fn run_options(&self, config: &Config) -> Result<RunOptions> {
        let search = self
            .search
            .clone()
            .ok_or_else(|| SupercutError::Config("--search is required".to_string()))?;
        let input = self
            .input
            .clone()
            .ok_or_else(|| SupercutError::Config("--input is required".to_string()))?;
        let output_dir = self
            .output_dir
            .clone()
            .or_else(|| config.supercut.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(RunOptions {
            input,
            search,
            search_type: self.search_type,
            combine: self.combine,
            delete_generated: self.delete_generated,
            delete_all_srt: self.delete_all_srt,
            force_english: self.force_english,
            output_dir,
        })
    }
}
