/*!
 * Segmentation of sign-groups.
 *
 * A sign-group like `ed3-de3-a-ba` splits into literal sign-codes separated
 * by delimiters. Glyphs already present in the group are kept as atomic
 * pieces so a second pass never re-reads them as codes.
 */

use super::glyph::glyph_regex;

/// One piece of a split sign-group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// A sign-code still to be resolved
    Literal(&'a str),
    /// A separator between codes
    Delimiter(char),
    /// A glyph, never re-matched
    Glyph(&'a str),
}

/// A piece after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    Literal(&'a str),
    Delimiter(char),
    Glyph(String),
}

impl Resolved<'_> {
    fn is_glyph(&self) -> bool {
        matches!(self, Self::Glyph(_))
    }
}

/// Split `group` on `delimiters` and around embedded glyphs
pub fn split<'a>(group: &'a str, delimiters: &[char]) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for glyph in glyph_regex().find_iter(group) {
        split_text(&group[last..glyph.start()], delimiters, &mut pieces);
        pieces.push(Piece::Glyph(glyph.as_str()));
        last = glyph.end();
    }
    split_text(&group[last..], delimiters, &mut pieces);

    pieces
}

fn split_text<'a>(text: &'a str, delimiters: &[char], pieces: &mut Vec<Piece<'a>>) {
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if delimiters.contains(&c) {
            if start < i {
                pieces.push(Piece::Literal(&text[start..i]));
            }
            pieces.push(Piece::Delimiter(c));
            start = i + c.len_utf8();
        }
    }
    if start < text.len() {
        pieces.push(Piece::Literal(&text[start..]));
    }
}

/// Concatenate resolved pieces.
///
/// A delimiter is dropped only when both of its neighbours are glyphs; next
/// to an unresolved code or at either edge of the group it stays.
pub fn join(pieces: &[Resolved<'_>]) -> String {
    let mut out = String::new();

    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Resolved::Literal(text) => out.push_str(text),
            Resolved::Glyph(glyph) => out.push_str(glyph),
            Resolved::Delimiter(c) => {
                let between_glyphs = i > 0
                    && pieces[i - 1].is_glyph()
                    && pieces.get(i + 1).is_some_and(Resolved::is_glyph);
                if !between_glyphs {
                    out.push(*c);
                }
            }
        }
    }

    out
}
