use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::audio::AudioSelection;
use crate::cleanup::{CleanupReport, PendingDeletions};
use crate::config::Config;
use crate::error::Result;
use crate::media::MediaEntry;
use crate::naming;
use crate::options::RunOptions;
use crate::subtitle::{self, CleanupPolicy, FfmpegSubtitleExtractor, SubtitleExtractor, SubtitleOrigin};
use crate::supercut::{SupercutGenerator, SupercutGeneratorFactory, SupercutRequest};
use crate::walker::{self, InputKind};

pub struct Workflow {
    config: Config,
    extractor: Box<dyn SubtitleExtractor>,
    generator: Box<dyn SupercutGenerator>,
    audio: Option<AudioSelection>,
}

/// What happened to one file of the walk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileOutcome {
    /// Accepted video, when the file was a video taking part in the run
    pub video: Option<PathBuf>,
    /// Subtitle to remove at the end of the run
    pub delete: Option<PathBuf>,
    pub extracted: bool,
    /// Supercut written for this file alone
    pub supercut: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files_visited: usize,
    pub videos_accepted: usize,
    pub subtitles_extracted: usize,
    pub supercuts: Vec<PathBuf>,
    pub subtitles_deleted: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The input path does not exist; nothing was done
    InvalidInput(PathBuf),
    Completed(RunSummary),
}

/// Per-run bookkeeping, merged from each file's outcome
#[derive(Debug, Default)]
struct RunLedger {
    pending_deletions: PendingDeletions,
    pending_combine: Vec<PathBuf>,
    summary: RunSummary,
}

impl RunLedger {
    fn record(&mut self, outcome: FileOutcome, combine: bool) {
        self.summary.files_visited += 1;

        if let Some(video) = outcome.video {
            self.summary.videos_accepted += 1;
            if combine {
                self.pending_combine.push(video);
            }
        }
        if let Some(subtitle) = outcome.delete {
            self.pending_deletions.mark(&subtitle);
        }
        if outcome.extracted {
            self.summary.subtitles_extracted += 1;
        }
        if let Some(supercut) = outcome.supercut {
            self.summary.supercuts.push(supercut);
        }
    }
}

impl Workflow {
    pub fn new(
        config: Config,
        extractor: Box<dyn SubtitleExtractor>,
        generator: Box<dyn SupercutGenerator>,
        audio: Option<AudioSelection>,
    ) -> Self {
        Self {
            config,
            extractor,
            generator,
            audio,
        }
    }

    /// Workflow backed by ffmpeg and videogrep
    pub fn from_config(config: Config, audio: Option<AudioSelection>) -> Result<Self> {
        let extractor = Box::new(FfmpegSubtitleExtractor::new(config.media.clone()));
        let generator = SupercutGeneratorFactory::create_generator(&config)?;

        Ok(Self::new(config, extractor, generator, audio))
    }

    /// Walk the input, provision subtitles, generate supercuts, then sweep marked subtitles
    pub async fn run(&self, options: &RunOptions) -> Result<RunOutcome> {
        if InputKind::of(&options.input) == InputKind::Missing {
            warn!("Input does not exist: {}", options.input.display());
            return Ok(RunOutcome::InvalidInput(options.input.clone()));
        }

        // Names are derived from real folder names, so `.` or `../x` must be resolved first
        let root = fs::canonicalize(&options.input).await?;
        let root = root.as_path();

        info!("Processing {}", root.display());
        let files = walker::collect_files(root)?;
        info!("Found {} files", files.len());

        let progress = progress_bar(files.len() as u64);
        let mut ledger = RunLedger::default();

        for path in &files {
            progress.set_message(walker::relative_display(path, root));
            let outcome = self.process_file(options, root, path).await?;
            ledger.record(outcome, options.combine);
            progress.inc(1);
        }
        progress.finish_and_clear();

        if options.combine && options.cleanup_policy() != CleanupPolicy::DeleteAll {
            if let Some(output) = self.generate_combined(options, root, &ledger.pending_combine).await? {
                ledger.summary.supercuts.push(output);
            }
        }

        if !ledger.pending_deletions.is_empty() {
            info!("Deleting {} marked subtitle file(s)", ledger.pending_deletions.len());
        }
        let report = ledger.pending_deletions.sweep().await.into_result()?;
        ledger.summary.subtitles_deleted = report.removed.len();
        log_cleanup(&report);

        Ok(RunOutcome::Completed(ledger.summary))
    }

    async fn process_file(&self, options: &RunOptions, root: &Path, path: &Path) -> Result<FileOutcome> {
        let Some(entry) = MediaEntry::from_path(path) else {
            debug!("Skipping non-video file {}", path.display());
            return Ok(FileOutcome::default());
        };

        let policy = options.cleanup_policy();
        let provision = subtitle::provision(self.extractor.as_ref(), &entry, policy).await?;

        let mut outcome = FileOutcome {
            video: None,
            delete: provision.mark_for_deletion.then(|| provision.subtitle_path.clone()),
            extracted: provision.origin == SubtitleOrigin::Generated,
            supercut: None,
        };

        if policy == CleanupPolicy::DeleteAll {
            return Ok(outcome);
        }

        outcome.video = Some(entry.path.clone());

        if !options.combine {
            let request = self.episode_request(options, root, &entry);
            self.generate(&request).await?;
            outcome.supercut = Some(request.output);
        }

        Ok(outcome)
    }

    fn episode_request(&self, options: &RunOptions, root: &Path, entry: &MediaEntry) -> SupercutRequest {
        let extension = &self.config.supercut.container_extension;
        let name = naming::episode_output_name(&entry.stem, extension).unwrap_or_else(|| {
            let show_dir = entry.path.parent().unwrap_or(root);
            naming::fallback_output_name(&naming::top_level_name(show_dir), extension)
        });

        SupercutRequest {
            inputs: vec![entry.path.clone()],
            search: options.search.clone(),
            search_type: options.search_type,
            output: options.output_dir.join(name),
            padding: self.config.supercut.episode_padding,
            audio: self.audio.clone(),
        }
    }

    async fn generate_combined(
        &self,
        options: &RunOptions,
        root: &Path,
        videos: &[PathBuf],
    ) -> Result<Option<PathBuf>> {
        if videos.is_empty() {
            info!("No videos to combine");
            return Ok(None);
        }

        let name = naming::combined_output_name(
            root,
            &options.search,
            &self.config.supercut.container_extension,
        );
        let request = SupercutRequest {
            inputs: videos.to_vec(),
            search: options.search.clone(),
            search_type: options.search_type,
            output: options.output_dir.join(name),
            padding: self.config.supercut.combined_padding,
            audio: self.audio.clone(),
        };

        info!("Combining {} videos: {:?}", videos.len(), videos);
        self.generate(&request).await?;
        Ok(Some(request.output))
    }

    async fn generate(&self, request: &SupercutRequest) -> Result<()> {
        if let Some(dir) = request.output.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await?;
            }
        }
        self.generator.generate(request).await
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(style);
    progress
}

fn log_cleanup(report: &CleanupReport) {
    if report.total() == 0 {
        return;
    }
    info!(
        "Cleanup: {} subtitle file(s) deleted, {} already gone",
        report.removed.len(),
        report.missing.len()
    );
}
