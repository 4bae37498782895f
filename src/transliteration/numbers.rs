use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::dictionary::Dictionary;

use super::decomposer::resolve_group;
use super::stats::DocumentStats;

// @module: Numeral transliteration

// @const: Span holding a numeral, `>NU:body<`; the marker is case-insensitive
static NUMERAL_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)>\s*NU:([^<>]*?)\s*<").expect("Invalid numeral span regex")
});

/// Numeral pieces are separated by hyphens only
pub const NUMERAL_DELIMITERS: [char; 1] = ['-'];

/// Replaces `NU:` numeral codes using the dictionary's `numbers` table
pub struct NumberTransliterator<'d> {
    dictionary: &'d Dictionary,
}

impl<'d> NumberTransliterator<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    /// Resolve every numeral span; the `NU:` marker is consumed
    pub fn transliterate(&self, markup: &str, stats: &mut DocumentStats) -> String {
        NUMERAL_SPAN_REGEX
            .replace_all(markup, |caps: &Captures<'_>| {
                let (resolved, count) = resolve_group(self.dictionary.numbers(), &caps[1], &NUMERAL_DELIMITERS, stats);
                stats.numerals_resolved += count;
                format!(">{}<", resolved)
            })
            .into_owned()
    }
}
