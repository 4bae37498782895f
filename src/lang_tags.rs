//! Language tag utilities for ruby annotations
//!
//! Ruby tiers carry `lang` attributes such as `en`, `sux` (Sumerian) or
//! `akk-Latn`. Only the primary subtag is checked, against ISO 639-1 and
//! ISO 639-3.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Kind of primary language subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Primary subtag of a BCP 47 style tag, lowercased
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate that a tag's primary subtag is a known ISO 639 code
pub fn validate_lang_tag(tag: &str) -> Result<LanguageCodeType> {
    let primary = primary_subtag(tag);

    // Check for ISO 639-1 (2-letter) code
    if primary.len() == 2 {
        if Language::from_639_1(&primary).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-3 (3-letter) code
    else if primary.len() == 3 && Language::from_639_3(&primary).is_some() {
        return Ok(LanguageCodeType::Part3);
    }

    Err(anyhow!("Invalid language tag: {}", tag))
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let primary = primary_subtag(tag);
    let lang = match validate_lang_tag(&primary)? {
        LanguageCodeType::Part1 => Language::from_639_1(&primary),
        LanguageCodeType::Part3 => Language::from_639_3(&primary),
    }
    .ok_or_else(|| anyhow!("Failed to get language from tag: {}", tag))?;

    Ok(lang.to_name().to_string())
}
