/*!
 * A closed subset of CSS selectors for picking gloss targets.
 *
 * Supported: tag names and `*`, `.class`, `#id`, `[attr]`, `[attr=value]`
 * (value optionally quoted), descendant (whitespace) and child (`>`)
 * combinators, and comma-separated alternatives.
 */

use std::fmt;
use std::str::FromStr;

use super::element::{Element, ElementTree};

/// Failure to parse a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError(pub String);

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector: {}", self.0)
    }
}

impl std::error::Error for SelectorError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeTest {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeTest>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.ids.is_empty() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != element.tag {
                return false;
            }
        }
        if !self.ids.iter().all(|id| element.raw_attribute("id") == Some(id.as_str())) {
            return false;
        }
        if !self.classes.iter().all(|class| element.classes().any(|c| c == class)) {
            return false;
        }
        self.attributes.iter().all(|test| match (&test.value, element.attribute(&test.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => *expected == actual,
        })
    }
}

/// One alternative: compounds joined by combinators, left to right.
/// The combinator stored with compound `k` relates it to compound `k - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches_at(&self, tree: &ElementTree<'_>, index: usize, k: usize) -> bool {
        let Some(element) = tree.get(index) else {
            return false;
        };
        let (combinator, compound) = &self.parts[k];
        if !compound.matches(element) {
            return false;
        }
        if k == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => element.parent.is_some_and(|p| self.matches_at(tree, p, k - 1)),
            Combinator::Descendant => {
                let mut ancestor = element.parent;
                while let Some(p) = ancestor {
                    if self.matches_at(tree, p, k - 1) {
                        return true;
                    }
                    ancestor = tree.get(p).and_then(|e| e.parent);
                }
                false
            }
        }
    }
}

/// Parsed selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for alternative in split_alternatives(source) {
            alternatives.push(parse_complex(alternative.trim())?);
        }
        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    /// The selector as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the element at `index` matches
    pub fn matches(&self, tree: &ElementTree<'_>, index: usize) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches_at(tree, index, complex.parts.len() - 1))
    }

    /// Indices of all matching elements in document order
    pub fn select_all(&self, tree: &ElementTree<'_>) -> Vec<usize> {
        (0..tree.len()).filter(|&i| self.matches(tree, i)).collect()
    }

    /// Matching elements that are not inside another matching element
    pub fn select_outermost(&self, tree: &ElementTree<'_>) -> Vec<usize> {
        let mut selected: Vec<usize> = Vec::new();
        for index in self.select_all(tree) {
            let element = &tree.elements()[index];
            let nested = selected
                .last()
                .is_some_and(|&last| tree.elements()[last].contains(element));
            if !nested {
                selected.push(index);
            }
        }
        selected
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split on commas outside quotes and attribute brackets
fn split_alternatives(source: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut in_brackets = false;

    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => in_brackets = true,
            (None, ']') => in_brackets = false,
            (None, ',') if !in_brackets => {
                parts.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_complex(source: &str) -> Result<Complex, SelectorError> {
    if source.is_empty() {
        return Err(SelectorError("empty selector".to_string()));
    }

    let chars: Vec<char> = source.chars().collect();
    let mut pos = 0;
    let mut parts: Vec<(Combinator, Compound)> = Vec::new();
    let mut pending = Combinator::Descendant;

    while pos < chars.len() {
        let mut saw_space = false;
        while pos < chars.len() && chars[pos].is_whitespace() {
            saw_space = true;
            pos += 1;
        }
        if pos >= chars.len() {
            break;
        }
        if chars[pos] == '>' {
            if parts.is_empty() {
                return Err(SelectorError(format!("'{}' starts with a combinator", source)));
            }
            pending = Combinator::Child;
            pos += 1;
            continue;
        }
        if !parts.is_empty() && !saw_space && pending != Combinator::Child {
            return Err(SelectorError(format!("unexpected '{}' in '{}'", chars[pos], source)));
        }

        let (compound, next) = parse_compound(&chars, pos, source)?;
        parts.push((pending, compound));
        pending = Combinator::Descendant;
        pos = next;
    }

    if parts.is_empty() || pending == Combinator::Child {
        return Err(SelectorError(format!("incomplete selector '{}'", source)));
    }

    Ok(Complex { parts })
}

fn read_name(chars: &[char], mut pos: usize) -> (String, usize) {
    let mut name = String::new();
    while pos < chars.len() && is_name_char(chars[pos]) {
        name.push(chars[pos]);
        pos += 1;
    }
    (name, pos)
}

fn parse_compound(chars: &[char], mut pos: usize, source: &str) -> Result<(Compound, usize), SelectorError> {
    let mut compound = Compound::default();

    if chars[pos] == '*' {
        compound.tag = Some("*".to_string());
        pos += 1;
    } else if is_name_char(chars[pos]) {
        let (name, next) = read_name(chars, pos);
        compound.tag = Some(name.to_ascii_lowercase());
        pos = next;
    }

    while pos < chars.len() {
        match chars[pos] {
            '.' | '#' => {
                let marker = chars[pos];
                let (name, next) = read_name(chars, pos + 1);
                if name.is_empty() {
                    return Err(SelectorError(format!("missing name after '{}' in '{}'", marker, source)));
                }
                if marker == '.' {
                    compound.classes.push(name);
                } else {
                    compound.ids.push(name);
                }
                pos = next;
            }
            '[' => {
                let close = chars[pos..]
                    .iter()
                    .position(|&c| c == ']')
                    .map(|offset| pos + offset)
                    .ok_or_else(|| SelectorError(format!("unclosed '[' in '{}'", source)))?;
                let body: String = chars[pos + 1..close].iter().collect();
                compound.attributes.push(parse_attribute_test(&body, source)?);
                pos = close + 1;
            }
            c if c.is_whitespace() || c == '>' => break,
            other => {
                return Err(SelectorError(format!("unsupported '{}' in '{}'", other, source)));
            }
        }
    }

    if compound.is_empty() {
        return Err(SelectorError(format!("empty compound in '{}'", source)));
    }
    Ok((compound, pos))
}

fn parse_attribute_test(body: &str, source: &str) -> Result<AttributeTest, SelectorError> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };

    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(SelectorError(format!("bad attribute test '[{}]' in '{}'", body, source)));
    }

    Ok(AttributeTest {
        name: name.to_ascii_lowercase(),
        value,
    })
}
