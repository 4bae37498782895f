/*!
 * Lightweight element scanner for canonical markup.
 *
 * This is not an HTML parser. It finds start and end tags, pairs them with
 * a stack, and records byte ranges into the original text so callers can
 * splice replacements without re-serializing anything. Stray end tags are
 * ignored and elements left open at the end of input run to the end of it.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::entities;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:"[^"]*"|'[^']*'|[^'">])*)>"#)
        .expect("Invalid tag regex")
});

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=/"'>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("Invalid attribute regex")
});

static TAG_STRIP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").expect("Invalid tag strip regex")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// One element located in a markup string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub tag: String,

    /// Attributes in source order; names lowercased, values as written
    pub attributes: Vec<(String, String)>,

    /// Byte offset of the opening `<`
    pub start: usize,

    /// Byte offset just past the start tag
    pub content_start: usize,

    /// Byte offset of the end tag (equal to `content_start` for void elements)
    pub content_end: usize,

    /// Byte offset just past the end tag
    pub end: usize,

    /// Index of the enclosing element
    pub parent: Option<usize>,
}

impl Element {
    /// Raw attribute value as written in the source
    pub fn raw_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value with character references decoded
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.raw_attribute(name).map(|v| entities::decode(v).into_owned())
    }

    /// Whitespace-separated entries of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.raw_attribute("class").unwrap_or("").split_whitespace()
    }

    /// Whether `[start, end)` of `other` lies inside this element
    pub fn contains(&self, other: &Element) -> bool {
        other.start >= self.start && other.end <= self.end && other != self
    }
}

/// All elements of a markup string, in document order
#[derive(Debug, Clone)]
pub struct ElementTree<'a> {
    source: &'a str,
    elements: Vec<Element>,
}

impl<'a> ElementTree<'a> {
    /// Scan `source` for elements
    pub fn parse(source: &'a str) -> Self {
        let mut elements: Vec<Element> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for caps in TAG_REGEX.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let closing = !caps[1].is_empty();
            let tag = caps[2].to_ascii_lowercase();

            if closing {
                if let Some(depth) = open.iter().rposition(|&i| elements[i].tag == tag) {
                    // Elements opened after the matched one close with it
                    for &i in &open[depth + 1..] {
                        elements[i].content_end = whole.start();
                        elements[i].end = whole.start();
                    }
                    let matched = open[depth];
                    elements[matched].content_end = whole.start();
                    elements[matched].end = whole.end();
                    open.truncate(depth);
                }
                continue;
            }

            let raw_attributes = &caps[3];
            let self_closing = raw_attributes.trim_end().ends_with('/');
            let element = Element {
                attributes: parse_attributes(raw_attributes),
                start: whole.start(),
                content_start: whole.end(),
                content_end: whole.end(),
                end: whole.end(),
                parent: open.last().copied(),
                tag,
            };
            let void = self_closing || VOID_ELEMENTS.contains(&element.tag.as_str());
            elements.push(element);
            if !void {
                open.push(elements.len() - 1);
            }
        }

        for i in open {
            elements[i].content_end = source.len();
            elements[i].end = source.len();
        }

        Self { source, elements }
    }

    /// The scanned markup
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// All elements in document order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Markup between the start and end tag
    pub fn inner_html(&self, element: &Element) -> &'a str {
        &self.source[element.content_start..element.content_end]
    }

    /// Markup of the whole element including its tags
    pub fn outer_html(&self, element: &Element) -> &'a str {
        &self.source[element.start..element.end]
    }

    /// Text of the element with tags removed and references decoded
    pub fn text_content(&self, element: &Element) -> String {
        let stripped = TAG_STRIP_REGEX.replace_all(self.inner_html(element), "");
        entities::decode(&stripped).into_owned()
    }
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE_REGEX
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}
