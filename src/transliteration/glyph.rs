use once_cell::sync::Lazy;
use regex::Regex;

// @module: Character classes of transliterated text

/// One cuneiform glyph, raw or as a hex entity, with an optional trailing joiner
pub const GLYPH: &str = r"(?:[\x{12000}-\x{1254F}]|&#[xX]12[0-5][0-9a-fA-F]{2};)(?:\x{200D}|&#[xX]200[dD];)?";

/// Characters a sign-code may be spelled with
pub const TRANSLIT_CHAR: &str = r"(?i:[a-z0-9ÀàÁáÉéĜĝḪḫÍíŠšÙùÚúÛû×])";

static GLYPH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(GLYPH).expect("Invalid glyph regex")
});

static GLYPH_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})+$", GLYPH)).expect("Invalid glyph run regex")
});

static SIGN_GROUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?:{}|{}|[-.])+$", GLYPH, TRANSLIT_CHAR)).expect("Invalid sign group regex")
});

/// Compiled single-glyph matcher
pub fn glyph_regex() -> &'static Regex {
    &GLYPH_REGEX
}

/// Whether `text` is one or more glyphs and nothing else
pub fn is_glyph_run(text: &str) -> bool {
    GLYPH_RUN_REGEX.is_match(text)
}

/// Whether `text` is a sign-group: sign-code characters, delimiters and glyphs only
pub fn is_sign_group(text: &str) -> bool {
    SIGN_GROUP_REGEX.is_match(text)
}
