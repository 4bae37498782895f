use std::path::{Path, PathBuf};

use super::dialect::Dialect;
use super::element::ElementTree;

// @module: Markup document owned by one pipeline run

/// One markup document and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    // @field: Markup text
    markup: String,

    // @field: Input file, when read from disk
    source_path: Option<PathBuf>,

    // @field: Source dialect, if known
    dialect: Option<Dialect>,
}

impl Document {
    /// Create a document with no provenance
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            source_path: None,
            dialect: None,
        }
    }

    /// Set the input path
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Set the dialect explicitly
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Fill in the dialect from the path or content if none was set
    pub fn with_detected_dialect(mut self) -> Self {
        if self.dialect.is_none() {
            self.dialect = Dialect::detect(self.source_path.as_deref(), &self.markup);
        }
        self
    }

    /// Replace the markup, keeping provenance
    pub fn with_markup(mut self, markup: String) -> Self {
        self.markup = markup;
        self
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    /// Name for log messages
    pub fn display_name(&self) -> String {
        match &self.source_path {
            Some(path) => path.display().to_string(),
            None => "<inline document>".to_string(),
        }
    }

    /// Scan the markup into elements
    pub fn elements(&self) -> ElementTree<'_> {
        ElementTree::parse(&self.markup)
    }
}
