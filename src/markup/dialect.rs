/*!
 * Source markup dialects.
 *
 * Dialects are named for where the texts come from, not for their format.
 * A document belongs to at most one of them.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

static CDLI_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Q\d{6}").expect("Invalid CDLI id regex")
});

/// Source markup dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// ETCSL: table rows with hover-title spans
    Etcsl,
    /// CDLI: table cells with line-label markers and `&amp;` ligatures
    Cdli,
    /// Enuma Elish: running text with literal hyphens and `&#x20;` spaces
    EnumaElish,
}

impl Dialect {
    /// All dialects, in detection priority order
    pub const ALL: [Dialect; 3] = [Dialect::Etcsl, Dialect::Cdli, Dialect::EnumaElish];

    /// Identifier used in configuration and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Etcsl => "etcsl",
            Self::Cdli => "cdli",
            Self::EnumaElish => "enuma-elish",
        }
    }

    /// Dialect implied by where a file lives
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem_matches = path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case("enuma-elish"));
        if stem_matches {
            return Some(Self::EnumaElish);
        }

        path.components().find_map(|component| {
            let component = component.as_os_str().to_string_lossy().to_lowercase();
            match component.as_str() {
                "etcsl" => Some(Self::Etcsl),
                "cdli" => Some(Self::Cdli),
                _ => None,
            }
        })
    }

    /// Guess the dialect from document content
    pub fn sniff(content: &str) -> Option<Self> {
        if content.contains("onMouseover") || content.contains("onmouseover") {
            return Some(Self::Etcsl);
        }
        if content.contains("<td") && CDLI_ID_REGEX.is_match(content) {
            return Some(Self::Cdli);
        }
        if content.contains("&#x20;") || content.contains("<strong>") {
            return Some(Self::EnumaElish);
        }
        None
    }

    /// Path first, then content
    pub fn detect(path: Option<&Path>, content: &str) -> Option<Self> {
        path.and_then(Self::from_path).or_else(|| Self::sniff(content))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "etcsl" => Ok(Self::Etcsl),
            "cdli" => Ok(Self::Cdli),
            "enuma-elish" | "enuma_elish" | "enumaelish" => Ok(Self::EnumaElish),
            _ => Err(anyhow::anyhow!("Invalid dialect: {}", s)),
        }
    }
}
