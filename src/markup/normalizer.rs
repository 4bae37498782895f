/*!
 * Markup normalization.
 *
 * Each dialect is rewritten into the canonical shape (`<ol>` of `<li>` of
 * `<span>`, determinatives as `<sup>`, hover text as `title` attributes) by
 * a fixed ordered list of named rewrite steps. Every step assumes the text
 * left by the step before it, so the order is part of the contract. A step
 * whose pattern finds nothing leaves the text unchanged.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use super::dialect::Dialect;
use super::document::Document;

static TAG_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").expect("Invalid tag split regex")
});

/// Where a step applies its pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole document, tags included
    Everywhere,
    /// Only text between tags
    TextOnly,
}

/// One named rewrite of a dialect's sequence
#[derive(Debug)]
pub struct RewriteStep {
    /// Step name, unique within its dialect
    pub name: &'static str,
    /// Shape of the text this step expects to see
    pub precondition: &'static str,
    /// Where the pattern applies
    pub scope: Scope,
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteStep {
    fn new(
        name: &'static str,
        precondition: &'static str,
        pattern: &str,
        replacement: &'static str,
    ) -> Self {
        Self {
            name,
            precondition,
            scope: Scope::Everywhere,
            pattern: Regex::new(pattern).expect("Invalid rewrite step regex"),
            replacement,
        }
    }

    fn text_only(mut self) -> Self {
        self.scope = Scope::TextOnly;
        self
    }

    /// Apply this step to `text`
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.scope {
            Scope::Everywhere => self.pattern.replace_all(text, self.replacement),
            Scope::TextOnly => {
                if !self.pattern.is_match(text) {
                    return Cow::Borrowed(text);
                }
                let mut out = String::with_capacity(text.len());
                let mut last = 0;
                for tag in TAG_SPLIT_REGEX.find_iter(text) {
                    out.push_str(&self.pattern.replace_all(&text[last..tag.start()], self.replacement));
                    out.push_str(tag.as_str());
                    last = tag.end();
                }
                out.push_str(&self.pattern.replace_all(&text[last..], self.replacement));
                Cow::Owned(out)
            }
        }
    }
}

static ETCSL_STEPS: Lazy<Vec<RewriteStep>> = Lazy::new(|| {
    vec![
        RewriteStep::new(
            "strip-document-wrapper",
            "raw ETCSL page",
            r"(?i)</?(?:!DOCTYPE html|html|meta|link|head\b|title|body)[^>]*>",
            "",
        ),
        RewriteStep::new(
            "open-list",
            "wrapper tags removed; text lines inside a <table>",
            r"<table[^>]*>\s*(?:<tbody[^>]*>\s*)?",
            "<ol>\n",
        ),
        RewriteStep::new(
            "row-to-item",
            "rows start with a cell of line-number anchors followed by the text cell",
            r"<tr><td[^>]*>(?:<a[^>]*>[^<]*</a>)+</td><td[^>]*>\s*",
            "\t<li>",
        ),
        RewriteStep::new(
            "hover-to-title",
            "words are spans with an onMouseover handler quoting the gloss",
            r"<span onMouseover=[^']+'([^']+)'[^>]*>",
            r#"<span title="${1}">"#,
        ),
        RewriteStep::new(
            "close-item",
            "rows opened as <li> still end in </td></tr>",
            r"\s*</td></tr>",
            "</li>",
        ),
        RewriteStep::new(
            "close-list",
            "list opened as <ol> still ends in </table>",
            r"(?:</tbody>\s*)?</table>",
            "</ol>",
        ),
    ]
});

static CDLI_STEPS: Lazy<Vec<RewriteStep>> = Lazy::new(|| {
    vec![
        RewriteStep::new(
            "strip-preamble",
            "raw CDLI page; the text is the first <table>",
            r"(?i)<!DOCTYPE html[^>]*>(?:.|\n)*?<table>",
            "<ol>",
        ),
        RewriteStep::new(
            "drop-rows",
            "one <tr> per line",
            r"(?i)\s*(?:<tr\b[^>]*>|</tr>)\s*",
            "",
        ),
        RewriteStep::new(
            "drop-label-cells",
            "each line starts with a label cell holding &nbsp; or a Q-number",
            r"(?i)\s*<td>(?:&nbsp;|Q\d{6}).*?</td>\s*",
            "",
        ),
        RewriteStep::new(
            "close-cell",
            "only text cells remain",
            r"\s*</td>\s*",
            "</span></li>",
        ),
        RewriteStep::new(
            "open-cell",
            "text cells closed as items",
            r"\s*<td[^>]*>\s*",
            "\n\t<li><span>",
        ),
        RewriteStep::new(
            "strip-trailer",
            "page continues after the text table",
            r"(?i)</table>(?:.|\n)*?</html>",
            "\n</ol>",
        ),
        RewriteStep::new(
            "ligature-ampersand",
            "ligatures written with an escaped ampersand",
            r"&amp;",
            " / ",
        ),
        RewriteStep::new(
            "drop-editorial-marks",
            "breakage and collation marks around signs",
            r"[\[\]#|]",
            "",
        ),
        RewriteStep::new(
            "open-determinative",
            "determinatives written in braces",
            r"\{",
            "<sup>",
        ),
        RewriteStep::new(
            "close-determinative",
            "determinative opened as <sup>",
            r"\}",
            "</sup>",
        ),
        RewriteStep::new(
            "split-words",
            "words separated by single spaces inside one span per line",
            r" ",
            "</span> <span>",
        ),
    ]
});

static ENUMA_ELISH_STEPS: Lazy<Vec<RewriteStep>> = Lazy::new(|| {
    vec![
        RewriteStep::new(
            "decode-space-entity",
            "spaces written as &#x20;",
            r"&#x20;",
            " ",
        ),
        RewriteStep::new(
            "strong-to-title",
            "sign groups emphasized with <strong>",
            r"<strong>([a-z0-9.-]+)</strong>",
            r#"<span title="${1}">${1}</span>"#,
        ),
        RewriteStep::new(
            "hyphen-to-wbr",
            "sign groups joined by literal hyphens in running text",
            r"-",
            "<wbr>",
        )
        .text_only(),
    ]
});

/// The ordered rewrite steps of a dialect
pub fn rewrite_steps(dialect: Dialect) -> &'static [RewriteStep] {
    match dialect {
        Dialect::Etcsl => &ETCSL_STEPS,
        Dialect::Cdli => &CDLI_STEPS,
        Dialect::EnumaElish => &ENUMA_ELISH_STEPS,
    }
}

/// Look up one step by dialect and name
pub fn rewrite_step(dialect: Dialect, name: &str) -> Option<&'static RewriteStep> {
    rewrite_steps(dialect).iter().find(|step| step.name == name)
}

/// Rewrites dialect markup into the canonical shape
pub struct MarkupNormalizer;

impl MarkupNormalizer {
    /// Run the full step sequence of `dialect` over `markup`
    pub fn normalize_markup(dialect: Dialect, markup: &str) -> String {
        let mut text = markup.to_string();
        for step in rewrite_steps(dialect) {
            if let Cow::Owned(rewritten) = step.apply(&text) {
                debug!("{} rewrite '{}' applied", dialect, step.name);
                text = rewritten;
            }
        }
        text
    }

    /// Normalize a document according to its dialect.
    ///
    /// Documents without a dialect pass through unchanged.
    pub fn normalize(document: Document) -> Document {
        match document.dialect() {
            Some(dialect) => {
                let markup = Self::normalize_markup(dialect, document.markup());
                document.with_markup(markup)
            }
            None => {
                warn!(
                    "No dialect for {}; skipping normalization",
                    document.display_name()
                );
                document
            }
        }
    }
}
