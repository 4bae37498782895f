/*!
 * Script dictionaries.
 *
 * A dictionary is loaded once per script from `<dir>/<script>.json`,
 * compiled, and then shared read-only by every document of the run.
 *
 * - `schema`: the JSON shape as written on disk
 * - `pattern`: anchoring and replacement conventions of dictionary patterns
 * - `cache`: loaded-once sharing of compiled dictionaries
 */

pub mod cache;
pub mod pattern;
pub mod schema;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::gloss::template::RubyTemplate;

use self::pattern::{anchor_literal_pattern, compile, compile_anchored, js_replacement};
use self::schema::{RawDictionary, RawRule};

pub use self::cache::DictionaryCache;

/// Sign patterns that are numerals, left for the numeral table
static NUMERIC_PATTERN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9,]+$").expect("Invalid numeric pattern regex")
});

/// Sign patterns that spell out number words
static NUMBER_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(?:or|one|two|three|four|five|six|seven|eight|nine)(?-u:\b)")
        .expect("Invalid number word regex")
});

/// A find-and-replace rule applied across the document text
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    /// Pattern as written in the dictionary
    pub pattern: String,
    /// Whether applications are logged
    pub logs: bool,
    regex: Regex,
    replacement: String,
}

impl SubstitutionRule {
    /// Replace every match in `text`
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.logs {
            let hits = self.regex.find_iter(text).count();
            if hits > 0 {
                info!("Rule '{}' replaced {} occurrence(s)", self.pattern, hits);
            }
        }
        self.regex.replace_all(text, self.replacement.as_str())
    }

    /// The compiled pattern
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// A rule that resolves one whole segment to a glyph
#[derive(Debug, Clone)]
pub struct SignRule {
    /// Pattern as written in the dictionary
    pub pattern: String,
    /// Glyph(s) the segment becomes
    pub replacement: String,
    /// Whether applications are logged
    pub logs: bool,
    anchored: Regex,
}

impl SignRule {
    /// Whether the pattern matches all of `segment`
    pub fn matches(&self, segment: &str) -> bool {
        self.anchored.is_match(segment)
    }
}

/// Ordered sign rules, searched first match wins
#[derive(Debug, Clone, Default)]
pub struct SignTable {
    rules: Vec<SignRule>,
}

impl SignTable {
    fn compile(raw: &[RawRule], collection: &'static str) -> Result<Self, ConfigError> {
        let rules = raw
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                Ok(SignRule {
                    pattern: rule.pattern().to_string(),
                    replacement: rule.replacement().to_string(),
                    logs: rule.logs(),
                    anchored: compile_anchored(rule.pattern(), collection, index)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { rules })
    }

    /// First rule matching the whole segment
    pub fn resolve(&self, segment: &str) -> Option<&SignRule> {
        let rule = self.rules.iter().find(|rule| rule.matches(segment))?;
        if rule.logs {
            info!("Sign rule '{}' resolved '{}'", rule.pattern, segment);
        }
        Some(rule)
    }

    pub fn rules(&self) -> &[SignRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Immutable, compiled rule set for one script
#[derive(Debug, Clone)]
pub struct Dictionary {
    script: String,
    remove: Option<Regex>,
    special_chars: Vec<SubstitutionRule>,
    words: Vec<SubstitutionRule>,
    signs: SignTable,
    numbers: SignTable,
    ruby: Vec<RubyTemplate>,
}

impl Dictionary {
    /// Parse and compile a dictionary from JSON text
    pub fn from_json_str(script: &str, json: &str) -> Result<Self, ConfigError> {
        let raw: RawDictionary = serde_json::from_str(json)?;
        Self::from_raw(script, raw)
    }

    /// Load `<dir>/<script>.json`
    pub fn load(dir: &Path, script: &str) -> Result<Self, ConfigError> {
        let path = dictionary_path(dir, script);
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        let json = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let dictionary = Self::from_json_str(script, &json)?;
        info!(
            "Loaded '{}' dictionary from {:?}: {} sign rule(s), {} numeral rule(s), {} ruby template(s)",
            script,
            path,
            dictionary.signs.len(),
            dictionary.numbers.len(),
            dictionary.ruby.len()
        );
        Ok(dictionary)
    }

    /// Compile a parsed dictionary.
    ///
    /// The `unicode` table is derived here: numeral and number-word patterns
    /// are dropped and the remainder reversed so later declarations win.
    pub fn from_raw(script: &str, raw: RawDictionary) -> Result<Self, ConfigError> {
        let remove = compile_remove(&raw.remove)?;

        let special_chars = compile_substitutions(&raw.special_chars, "special-chars", |p| {
            anchor_literal_pattern(p)
        })?;
        let words = compile_substitutions(&raw.dictionary, "dictionary", |p| {
            anchor_literal_pattern(&format!(r">\s?{}\s?<", p))
        })?;
        let words = words
            .into_iter()
            .map(|mut rule| {
                rule.replacement = format!(">{}<", rule.replacement);
                rule
            })
            .collect();

        let signs = SignTable::compile(&derive_sign_rules(&raw.unicode), "unicode")?;
        let numbers = SignTable::compile(&raw.numbers, "numbers")?;

        let ruby = raw
            .ruby
            .map(|ruby| ruby.into_vec())
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, template)| RubyTemplate::from_raw(template, index))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        debug!(
            "Compiled '{}' dictionary: {} of {} unicode rule(s) kept after numeral filtering",
            script,
            signs.len(),
            raw.unicode.len()
        );

        Ok(Self {
            script: script.to_string(),
            remove,
            special_chars,
            words,
            signs,
            numbers,
            ruby,
        })
    }

    /// Script identifier
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Combined deletion pattern, if any
    pub fn remove(&self) -> Option<&Regex> {
        self.remove.as_ref()
    }

    pub fn special_chars(&self) -> &[SubstitutionRule] {
        &self.special_chars
    }

    /// Whole-span overrides (the `dictionary` collection)
    pub fn words(&self) -> &[SubstitutionRule] {
        &self.words
    }

    /// Derived sign table
    pub fn signs(&self) -> &SignTable {
        &self.signs
    }

    pub fn numbers(&self) -> &SignTable {
        &self.numbers
    }

    pub fn ruby(&self) -> &[RubyTemplate] {
        &self.ruby
    }
}

/// Path of a script's dictionary file
pub fn dictionary_path(dir: &Path, script: &str) -> PathBuf {
    dir.join(format!("{}.json", script))
}

/// Load a script's dictionary from `dir`
pub fn load_dictionary(dir: &Path, script: &str) -> Result<Dictionary, ConfigError> {
    Dictionary::load(dir, script)
}

/// Whether a `unicode` pattern belongs to the numeral table instead
pub fn is_numeral_pattern(pattern: &str) -> bool {
    NUMERIC_PATTERN_REGEX.is_match(pattern) || NUMBER_WORD_REGEX.is_match(pattern)
}

/// Filter numerals out of the sign rules and reverse the remainder
pub fn derive_sign_rules(unicode: &[RawRule]) -> Vec<RawRule> {
    unicode
        .iter()
        .rev()
        .filter(|rule| !is_numeral_pattern(rule.pattern()))
        .cloned()
        .collect()
}

fn compile_remove(patterns: &[String]) -> Result<Option<Regex>, ConfigError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    for (index, pattern) in patterns.iter().enumerate() {
        compile(pattern, "remove", index)?;
    }
    compile(&format!("(?:{})", patterns.join("|")), "remove", 0).map(Some)
}

fn compile_substitutions(
    raw: &[RawRule],
    collection: &'static str,
    to_pattern: impl Fn(&str) -> String,
) -> Result<Vec<SubstitutionRule>, ConfigError> {
    raw.iter()
        .enumerate()
        .map(|(index, rule)| {
            Ok(SubstitutionRule {
                pattern: rule.pattern().to_string(),
                logs: rule.logs(),
                regex: compile(&to_pattern(rule.pattern()), collection, index)?,
                replacement: js_replacement(rule.replacement()),
            })
        })
        .collect()
}
