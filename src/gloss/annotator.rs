use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::element::ElementTree;

use super::expr::ElementView;
use super::template::RubyTemplate;

// @module: Ruby gloss insertion

// @const: Document wrapper tags that must not survive into a fragment
static WRAPPER_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:!DOCTYPE html|html|body|head\b)[^>]*>").expect("Invalid wrapper tag regex")
});

/// Replaces template-selected elements with ruby annotation blocks
pub struct GlossAnnotator<'d> {
    templates: &'d [RubyTemplate],
}

impl<'d> GlossAnnotator<'d> {
    pub fn new(templates: &'d [RubyTemplate]) -> Self {
        Self { templates }
    }

    /// Apply every template in order; returns the markup and the number of blocks inserted
    pub fn annotate(&self, markup: &str) -> (String, usize) {
        let mut text = markup.to_string();
        let mut inserted = 0;

        for template in self.templates {
            let (annotated, count) = Self::apply_template(template, &text);
            debug!("Ruby template '{}' annotated {} element(s)", template.selector, count);
            text = strip_wrapper_tags(&annotated);
            inserted += count;
        }

        (text, inserted)
    }

    /// Apply one template to `markup`
    pub fn apply_template(template: &RubyTemplate, markup: &str) -> (String, usize) {
        let tree = ElementTree::parse(markup);
        let selected = template.selector.select_outermost(&tree);
        if selected.is_empty() {
            return (markup.to_string(), 0);
        }

        let mut out = String::with_capacity(markup.len() + selected.len() * 96);
        let mut last = 0;
        for &index in &selected {
            let element = &tree.elements()[index];
            out.push_str(&markup[last..element.start]);
            out.push_str(&template.render(&ElementView::new(&tree, element)));
            last = element.end;
        }
        out.push_str(&markup[last..]);

        (out, selected.len())
    }
}

/// Remove `<!DOCTYPE html>`, `html`, `head` and `body` tags
pub fn strip_wrapper_tags(markup: &str) -> String {
    WRAPPER_TAG_REGEX.replace_all(markup, "").into_owned()
}
