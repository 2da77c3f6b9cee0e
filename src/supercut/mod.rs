// Supercut generation
//
// Dialogue search and clip concatenation are done by an external tool. This
// module describes one generation request and hides the tool behind
// `SupercutGenerator`:
// - Videogrep: drives the videogrep CLI

pub mod videogrep;

use async_trait::async_trait;
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

use crate::audio::AudioSelection;
use crate::config::Config;
use crate::error::Result;

pub use videogrep::VideogrepGenerator;

/// How the search expression is matched against subtitles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchType {
    /// Whole subtitle lines containing the expression
    Sentence,
    /// Only the matching words (needs word-level timestamps)
    Fragment,
    /// Individual words, stitched in order
    Mash,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Sentence => "sentence",
            SearchType::Fragment => "fragment",
            SearchType::Mash => "mash",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One supercut to produce from one or more source videos
#[derive(Debug, Clone, PartialEq)]
pub struct SupercutRequest {
    pub inputs: Vec<PathBuf>,
    pub search: String,
    pub search_type: SearchType,
    pub output: PathBuf,
    /// Seconds added around each matched clip
    pub padding: Option<f64>,
    pub audio: Option<AudioSelection>,
}

/// Main trait for supercut generation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupercutGenerator: Send + Sync {
    /// Search the inputs' subtitles and write the concatenated clips to `request.output`
    async fn generate(&self, request: &SupercutRequest) -> Result<()>;
}

/// Factory for creating supercut generators
pub struct SupercutGeneratorFactory;

impl SupercutGeneratorFactory {
    /// Create the default generator (videogrep-based)
    pub fn create_generator(config: &Config) -> Result<Box<dyn SupercutGenerator>> {
        Ok(Box::new(VideogrepGenerator::new(config)))
    }
}
