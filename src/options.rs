use std::path::PathBuf;

use crate::subtitle::CleanupPolicy;
use crate::supercut::SearchType;

/// Settings of one run, fixed once the command line is parsed
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Root file or directory to process
    pub input: PathBuf,
    pub search: String,
    pub search_type: SearchType,
    /// One merged supercut instead of one per episode
    pub combine: bool,
    pub delete_generated: bool,
    pub delete_all_srt: bool,
    pub force_english: bool,
    /// Directory receiving generated supercuts
    pub output_dir: PathBuf,
}

impl RunOptions {
    pub fn cleanup_policy(&self) -> CleanupPolicy {
        CleanupPolicy::from_flags(self.delete_generated, self.delete_all_srt)
    }
}
