/*!
 * Error types for the cuneify engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dictionary.
///
/// Any of these aborts the run for the affected script.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The dictionary file does not exist
    #[error("Dictionary file not found: {0:?}")]
    NotFound(PathBuf),

    /// The dictionary file exists but could not be read
    #[error("Failed to read dictionary file {path:?}: {source}")]
    Io {
        /// Path of the dictionary file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dictionary is not valid JSON or does not follow the schema
    #[error("Dictionary schema error: {0}")]
    Schema(#[from] serde_json::Error),

    /// A rule pattern is not a valid regular expression
    #[error("Invalid pattern in '{collection}' rule {index}: {message}")]
    InvalidPattern {
        /// Rule collection name as it appears in the dictionary file
        collection: &'static str,
        /// Zero-based position of the rule in its collection
        index: usize,
        /// Regex compiler message
        message: String,
    },

    /// A ruby template has an unparseable selector or expression
    #[error("Invalid ruby template {index}: {message}")]
    InvalidTemplate {
        /// Zero-based position of the template
        index: usize,
        /// What went wrong
        message: String,
    },
}

/// Errors that can occur while processing a single document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input document could not be read
    #[error("Failed to read document {path:?}: {message}")]
    Read {
        /// Path of the input document
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The output document could not be written
    #[error("Failed to write document {path:?}: {message}")]
    Write {
        /// Path of the output document
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The worker processing the document panicked or was cancelled
    #[error("Worker failed for document {path:?}: {message}")]
    Worker {
        /// Path of the input document
        path: PathBuf,
        /// Error message
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from dictionary loading
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
