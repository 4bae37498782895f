/*!
 * Compound decomposition.
 *
 * Runs the dictionary's text-level rules over a canonical document and then
 * resolves every sign-group, the code text between `>` and `<`, one sign at
 * a time against the derived sign table.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::dictionary::{Dictionary, SignTable};

use super::glyph::is_sign_group;
use super::segment::{self, Piece, Resolved};
use super::stats::DocumentStats;

/// Text between a tag end and the next tag start
pub(crate) static TEXT_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r">([^<>]*)<").expect("Invalid text span regex")
});

/// Sign-group delimiters
pub const SIGN_DELIMITERS: [char; 2] = ['-', '.'];

/// Replaces sign-codes with glyphs
pub struct CompoundDecomposer<'d> {
    dictionary: &'d Dictionary,
}

impl<'d> CompoundDecomposer<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    /// Apply removals, special characters, word overrides and then sign decomposition
    pub fn decompose(&self, markup: &str, stats: &mut DocumentStats) -> String {
        let mut text = match self.dictionary.remove() {
            Some(remove) => remove.replace_all(markup, "").into_owned(),
            None => markup.to_string(),
        };

        for rule in self.dictionary.special_chars() {
            text = rule.apply(&text).into_owned();
        }
        for rule in self.dictionary.words() {
            text = rule.apply(&text).into_owned();
        }

        self.resolve_sign_groups(&text, stats)
    }

    /// Resolve every sign-group in `markup`
    pub fn resolve_sign_groups(&self, markup: &str, stats: &mut DocumentStats) -> String {
        TEXT_SPAN_REGEX
            .replace_all(markup, |caps: &Captures<'_>| {
                let group = caps[1].trim();
                if group.is_empty() || !is_sign_group(group) {
                    return caps[0].to_string();
                }

                let (resolved, count) = resolve_group(self.dictionary.signs(), group, &SIGN_DELIMITERS, stats);
                stats.signs_resolved += count;
                if resolved == group {
                    caps[0].to_string()
                } else {
                    format!(">{}<", resolved)
                }
            })
            .into_owned()
    }
}

/// Resolve the literal pieces of one group against `table`.
///
/// Returns the rewritten group and the number of pieces the table resolved.
pub(crate) fn resolve_group(
    table: &SignTable,
    group: &str,
    delimiters: &[char],
    stats: &mut DocumentStats,
) -> (String, usize) {
    let mut resolved = 0;
    let pieces: Vec<Resolved<'_>> = segment::split(group, delimiters)
        .into_iter()
        .map(|piece| match piece {
            Piece::Glyph(glyph) => Resolved::Glyph(glyph.to_string()),
            Piece::Delimiter(c) => Resolved::Delimiter(c),
            Piece::Literal(code) => match table.resolve(code) {
                Some(rule) => {
                    resolved += 1;
                    Resolved::Glyph(rule.replacement.clone())
                }
                None => {
                    debug!("No rule for '{}' in '{}'", code, group);
                    stats.record_unresolved(code);
                    Resolved::Literal(code)
                }
            },
        })
        .collect();

    (segment::join(&pieces), resolved)
}
