use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::glyph::GLYPH;
use super::stats::DocumentStats;

/// `<sup>` wrapping nothing but glyphs
static GLYPH_SUPERSCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)<sup>((?:{})+)</sup>", GLYPH)).expect("Invalid superscript regex")
});

/// Promote determinative glyphs out of their `<sup>` wrappers.
///
/// Wrappers that still hold unresolved codes are left in place.
pub fn unwrap_superscripts(markup: &str, stats: &mut DocumentStats) -> String {
    GLYPH_SUPERSCRIPT_REGEX
        .replace_all(markup, |caps: &Captures<'_>| {
            stats.superscripts_unwrapped += 1;
            caps[1].to_string()
        })
        .into_owned()
}
