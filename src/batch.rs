/*!
 * Batch document processing.
 *
 * Every document runs the whole pipeline on a blocking worker, with a bounded
 * number of documents in flight. A failing document is recorded in the
 * report and never stops the rest of the batch.
 */

use futures::stream::{self, StreamExt};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dictionary::Dictionary;
use crate::errors::DocumentError;
use crate::file_utils::FileManager;
use crate::markup::{Dialect, Document, MarkupNormalizer};
use crate::transliteration::{DocumentStats, Transliterator};

/// One document to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentJob {
    /// Input document
    pub input: PathBuf,

    /// Where the result is written
    pub output: PathBuf,

    /// Dialect forced by configuration; detected when `None`
    pub dialect: Option<Dialect>,
}

impl DocumentJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, dialect: Option<Dialect>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            dialect,
        }
    }
}

/// Which stages a batch runs
#[derive(Debug, Clone)]
pub enum Pipeline {
    /// All stages with a shared dictionary
    Transliterate(Arc<Dictionary>),
    /// Markup normalization only
    NormalizeOnly,
}

impl Pipeline {
    /// Read, process and write one document. Blocking.
    pub fn process_document(&self, job: &DocumentJob) -> Result<DocumentStats, DocumentError> {
        let markup = FileManager::read_to_string(&job.input).map_err(|e| DocumentError::Read {
            path: job.input.clone(),
            message: format!("{:#}", e),
        })?;

        let mut document = Document::new(markup).with_source_path(&job.input);
        if let Some(dialect) = job.dialect {
            document = document.with_dialect(dialect);
        }
        let document = document.with_detected_dialect();

        let (document, stats) = match self {
            Self::Transliterate(dictionary) => Transliterator::new(dictionary).run(document),
            Self::NormalizeOnly => (MarkupNormalizer::normalize(document), DocumentStats::new()),
        };

        FileManager::write_to_file(&job.output, document.markup()).map_err(|e| DocumentError::Write {
            path: job.output.clone(),
            message: format!("{:#}", e),
        })?;

        Ok(stats)
    }
}

/// A document that went through the pipeline
#[derive(Debug, Clone)]
pub struct DocumentSuccess {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: DocumentStats,
}

/// A document that did not
#[derive(Debug)]
pub struct DocumentFailure {
    pub input: PathBuf,
    pub error: DocumentError,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Processed documents, sorted by input path
    pub succeeded: Vec<DocumentSuccess>,

    /// Failed documents, sorted by input path
    pub failed: Vec<DocumentFailure>,

    /// Wall time of the batch
    pub elapsed: Duration,
}

impl BatchReport {
    /// Whether no document failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Counters summed over all processed documents
    pub fn total_stats(&self) -> DocumentStats {
        let mut total = DocumentStats::new();
        for success in &self.succeeded {
            total.merge(&success.stats);
        }
        total
    }

    /// Find the failure for `input`, if any
    pub fn failure_for(&self, input: &Path) -> Option<&DocumentFailure> {
        self.failed.iter().find(|failure| failure.input == input)
    }
}

/// Runs a pipeline over many documents concurrently
pub struct BatchProcessor {
    /// Stages to run
    pipeline: Pipeline,

    /// Maximum number of documents in flight
    jobs: usize,
}

impl BatchProcessor {
    pub fn new(pipeline: Pipeline, jobs: usize) -> Self {
        Self {
            pipeline,
            jobs: jobs.max(1),
        }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Process every job; `progress_callback(done, total)` is called after each document
    pub async fn process(
        &self,
        jobs: Vec<DocumentJob>,
        progress_callback: impl Fn(usize, usize),
    ) -> BatchReport {
        let start_time = Instant::now();
        let total = jobs.len();
        let mut report = BatchReport::default();

        let mut results = stream::iter(jobs)
            .map(|job| {
                let pipeline = self.pipeline.clone();
                async move {
                    let input = job.input.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        pipeline.process_document(&job).map(|stats| DocumentSuccess {
                            input: job.input,
                            output: job.output,
                            stats,
                        })
                    });

                    match handle.await {
                        Ok(result) => result.map_err(|error| DocumentFailure { input, error }),
                        Err(join_error) => Err(DocumentFailure {
                            error: DocumentError::Worker {
                                path: input.clone(),
                                message: join_error.to_string(),
                            },
                            input,
                        }),
                    }
                }
            })
            .buffer_unordered(self.jobs);

        let mut done = 0;
        while let Some(result) = results.next().await {
            done += 1;
            match result {
                Ok(success) => report.succeeded.push(success),
                Err(failure) => {
                    error!("{}", failure.error);
                    report.failed.push(failure);
                }
            }
            progress_callback(done, total);
        }

        report.succeeded.sort_by(|a, b| a.input.cmp(&b.input));
        report.failed.sort_by(|a, b| a.input.cmp(&b.input));
        report.elapsed = start_time.elapsed();

        info!(
            "Processed {} document(s), {} failed, in {:.2}s",
            report.total(),
            report.failed.len(),
            report.elapsed.as_secs_f64()
        );

        report
    }
}
