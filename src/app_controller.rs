use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::batch::{BatchProcessor, BatchReport, DocumentJob, Pipeline};
use crate::dictionary::DictionaryCache;
use crate::file_utils::FileManager;
use crate::markup::Dialect;

// @module: Application controller for batch transliteration

/// Main application controller for document transliteration
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Compiled dictionaries, shared across runs
    dictionaries: DictionaryCache,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            dictionaries: DictionaryCache::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Transliterate `inputs`, or every configured source when `inputs` is empty
    pub async fn run(&self, inputs: &[PathBuf], dialect: Option<Dialect>) -> Result<BatchReport> {
        let dictionary = self
            .dictionaries
            .get_or_load(&self.config.dictionary_dir, &self.config.script)
            .with_context(|| format!("Failed to load the '{}' dictionary", self.config.script))?;

        let jobs = self.collect_jobs(inputs, dialect)?;
        self.run_jobs(Pipeline::Transliterate(dictionary), jobs).await
    }

    /// Write canonical markup only, without any dictionary stage
    pub async fn normalize(&self, inputs: &[PathBuf], dialect: Option<Dialect>) -> Result<BatchReport> {
        let jobs = self.collect_jobs(inputs, dialect)?;
        self.run_jobs(Pipeline::NormalizeOnly, jobs).await
    }

    async fn run_jobs(&self, pipeline: Pipeline, jobs: Vec<DocumentJob>) -> Result<BatchReport> {
        if jobs.is_empty() {
            warn!("No documents found to process");
            return Ok(BatchReport::default());
        }

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Transliterating");

        let processor = BatchProcessor::new(pipeline, self.config.jobs);
        let report = processor
            .process(jobs, |done, _total| progress_bar.set_position(done as u64))
            .await;
        progress_bar.finish_and_clear();

        let stats = report.total_stats();
        info!(
            "{} of {} document(s) written to {:?} in {}: {}",
            report.succeeded.len(),
            report.total(),
            self.config.output_dir,
            Self::format_duration(report.elapsed),
            stats.summary()
        );
        if !stats.unresolved.is_empty() {
            info!("Unresolved codes: {}", stats.unresolved.join(", "));
        }

        Ok(report)
    }

    /// Build one job per document under the explicit inputs or the configured sources
    pub fn collect_jobs(&self, inputs: &[PathBuf], dialect: Option<Dialect>) -> Result<Vec<DocumentJob>> {
        let mut jobs = Vec::new();

        if inputs.is_empty() {
            for source in &self.config.sources {
                let path = self.config.source_path(source);
                if !path.exists() {
                    warn!("Configured source not found: {:?}", path);
                    continue;
                }
                let dialect = dialect.or(source.dialect);
                for input in FileManager::find_documents(&path)? {
                    let output =
                        FileManager::mirrored_output_path(&input, &self.config.source_dir, &self.config.output_dir)?;
                    jobs.push(DocumentJob::new(input, output, dialect));
                }
            }
        } else {
            for path in inputs {
                let root = self.input_root(path)?;
                for input in FileManager::find_documents(path)? {
                    let output = FileManager::mirrored_output_path(&input, &root, &self.config.output_dir)?;
                    jobs.push(DocumentJob::new(input, output, dialect));
                }
            }
        }

        Ok(jobs)
    }

    // Inputs under `source_dir` mirror from there like configured sources.
    // Elsewhere a folder keeps its own name as the group and a single file
    // lands directly in the output dir.
    fn input_root(&self, path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(anyhow!("Input path does not exist: {:?}", path));
        }
        if let Some(root) = Self::enclosing_root(path, &self.config.source_dir) {
            return Ok(root);
        }

        let parent = path.parent().map(Path::to_path_buf);
        if FileManager::dir_exists(path) {
            Ok(parent.unwrap_or_else(|| path.to_path_buf()))
        } else {
            Ok(parent.unwrap_or_default())
        }
    }

    // `root` as a prefix of `path`, comparing canonical forms when the written ones differ
    fn enclosing_root(path: &Path, root: &Path) -> Option<PathBuf> {
        if path.starts_with(root) {
            return Some(root.to_path_buf());
        }

        let canonical_path = path.canonicalize().ok()?;
        let canonical_root = root.canonicalize().ok()?;
        canonical_path.starts_with(&canonical_root).then(|| {
            // Keep the path as written so mirrored outputs strip the right prefix
            let depth = canonical_path.components().count() - canonical_root.components().count();
            path.ancestors().nth(depth).map(Path::to_path_buf).unwrap_or_default()
        })
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}
