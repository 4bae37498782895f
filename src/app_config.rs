use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::markup::Dialect;

/// Application configuration module
///
/// Handles loading, defaulting, validating and saving the `conf.json` that
/// tells the batch runner which script to use and where documents live.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Script identifier; selects `<dictionary_dir>/<script>.json`
    #[serde(default = "default_script")]
    pub script: String,

    /// Directory holding dictionary files
    #[serde(default = "default_dictionary_dir")]
    pub dictionary_dir: PathBuf,

    /// Root that source paths are resolved against
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Root of the mirrored output tree
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum number of documents in flight
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Document sources, each a file or a folder
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

/// One configured document source
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    // @field: File or folder, relative to `source_dir`
    pub path: PathBuf,

    // @field: Dialect of every document under `path`; detected when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>, dialect: Option<Dialect>) -> Self {
        Self {
            path: path.into(),
            dialect,
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching `log` filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_script() -> String {
    "cuneiform".to_string()
}

fn default_dictionary_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_jobs() -> usize {
    4
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("etcsl", Some(Dialect::Etcsl)),
        SourceConfig::new("cdli", Some(Dialect::Cdli)),
        SourceConfig::new("enuma-elish.html", Some(Dialect::EnumaElish)),
    ]
}

impl Config {
    /// Load the configuration at `path`, writing a default one first when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Load the configuration at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration to `path` as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.script.trim().is_empty() {
            return Err(anyhow!("Script identifier must not be empty"));
        }
        if self.script.contains(['/', '\\']) {
            return Err(anyhow!("Script identifier must be a file stem, got '{}'", self.script));
        }
        if self.jobs == 0 {
            return Err(anyhow!("jobs must be at least 1"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }
        if let Some(source) = self.sources.iter().find(|s| s.path.is_absolute()) {
            return Err(anyhow!("Source path must be relative to source_dir: {:?}", source.path));
        }

        Ok(())
    }

    /// Path of a configured source under `source_dir`
    pub fn source_path(&self, source: &SourceConfig) -> PathBuf {
        self.source_dir.join(&source.path)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            script: default_script(),
            dictionary_dir: default_dictionary_dir(),
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            jobs: default_jobs(),
            log_level: LogLevel::default(),
            sources: default_sources(),
        }
    }
}
