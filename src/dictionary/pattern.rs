/*!
 * Pattern and replacement conventions of dictionary files.
 *
 * Dictionary patterns are written as plain strings. Substitution rules get a
 * word-boundary anchor on each side that starts or ends in a word character.
 * This is a heuristic: it misfires on patterns that end in an escaped
 * character class or that already carry their own anchors.
 *
 * Word characters are ASCII only, so `š` or `ḫ` next to a pattern counts as
 * a boundary.
 */

use regex::Regex;

use crate::errors::ConfigError;

/// Word boundary over ASCII word characters
pub const ASCII_WORD_BOUNDARY: &str = r"(?-u:\b)";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Add an ASCII `\b` around a literal pattern where it begins or ends with a word character.
///
/// A trailing word character preceded by a backslash (`\d`, `\w`, ...) is an
/// escape sequence and gets no trailing anchor.
pub fn anchor_literal_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut anchored = String::with_capacity(pattern.len() + 4);

    if chars.first().is_some_and(|c| is_word_char(*c)) {
        anchored.push_str(ASCII_WORD_BOUNDARY);
    }
    anchored.push_str(pattern);

    let len = chars.len();
    if len > 0 && is_word_char(chars[len - 1]) && (len == 1 || chars[len - 2] != '\\') {
        anchored.push_str(ASCII_WORD_BOUNDARY);
    }

    anchored
}

/// Translate `$&` / `$1` style group references into `${0}` / `${1}`.
///
/// A `$` that does not start a reference is emitted as a literal dollar.
pub fn js_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('&') => {
                chars.next();
                out.push_str("${0}");
            }
            Some('$') => {
                chars.next();
                out.push_str("$$");
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(|d| d.is_ascii_digit()) {
                    digits.push(d);
                    chars.next();
                    if digits.len() == 2 {
                        break;
                    }
                }
                out.push_str("${");
                out.push_str(&digits);
                out.push('}');
            }
            Some('<') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '>' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                if closed {
                    out.push_str("${");
                    out.push_str(&name);
                    out.push('}');
                } else {
                    out.push_str("$$<");
                    out.push_str(&name);
                }
            }
            _ => out.push_str("$$"),
        }
    }

    out
}

/// Compile one rule pattern, mapping failures to a [`ConfigError`]
pub fn compile(pattern: &str, collection: &'static str, index: usize) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        collection,
        index,
        message: e.to_string(),
    })
}

/// Compile a pattern so that it must match an entire segment
pub fn compile_anchored(pattern: &str, collection: &'static str, index: usize) -> Result<Regex, ConfigError> {
    compile(&format!("^(?:{})$", pattern), collection, index)
}
