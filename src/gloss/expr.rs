/*!
 * Gloss template expressions.
 *
 * Templates describe each annotation tier with a small expression evaluated
 * against the selected element. The grammar is closed:
 *
 * ```text
 * expr     := concat ("||" concat)*          first non-empty alternative
 * concat   := postfix ("+" postfix)*
 * postfix  := term (".trim()")*
 * term     := 'literal' | "literal"
 *           | el.textContent | el.innerText | text()
 *           | el.innerHTML | html()
 *           | el.getAttribute('name') | @name
 *           | el.title | el.id | el.lang | el.className | el.dataset.name
 *           | "(" expr ")"
 * ```
 *
 * Evaluation only sees the element it is bound to.
 */

use std::fmt;

use crate::markup::element::{Element, ElementTree};
use crate::markup::entities;

/// Expression parse failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprError {
    /// Byte offset of the problem
    pub position: usize,
    /// What was expected
    pub message: String,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for ExprError {}

/// Expression AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Fixed string, inserted verbatim
    Literal(String),
    /// Text content of the element, escaped
    Text,
    /// Inner markup of the element, verbatim
    InnerHtml,
    /// Attribute value, escaped; empty when absent
    Attribute(String),
    /// Concatenation of parts
    Concat(Vec<Expr>),
    /// First alternative with a non-empty value
    Fallback(Vec<Expr>),
    /// Surrounding whitespace removed
    Trim(Box<Expr>),
}

/// An element bound for evaluation
pub struct ElementView<'t, 'a> {
    tree: &'t ElementTree<'a>,
    element: &'t Element,
}

impl<'t, 'a> ElementView<'t, 'a> {
    pub fn new(tree: &'t ElementTree<'a>, element: &'t Element) -> Self {
        Self { tree, element }
    }

    pub fn element(&self) -> &Element {
        self.element
    }

    pub fn inner_html(&self) -> &'a str {
        self.tree.inner_html(self.element)
    }

    pub fn text_content(&self) -> String {
        self.tree.text_content(self.element)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element.attribute(name)
    }
}

impl Expr {
    /// Parse an expression
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let mut parser = Parser { src: source, pos: 0 };
        let expr = parser.parse_fallback()?;
        parser.skip_ws();
        if parser.pos < source.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }

    /// Evaluate against an element
    pub fn evaluate(&self, view: &ElementView<'_, '_>) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Text => entities::escape_text(&view.text_content()).into_owned(),
            Self::InnerHtml => view.inner_html().to_string(),
            Self::Attribute(name) => view
                .attribute(name)
                .map(|value| entities::escape_text(&value).into_owned())
                .unwrap_or_default(),
            Self::Concat(parts) => parts.iter().map(|part| part.evaluate(view)).collect(),
            Self::Fallback(alternatives) => alternatives
                .iter()
                .map(|alternative| alternative.evaluate(view))
                .find(|value| !value.is_empty())
                .unwrap_or_default(),
            Self::Trim(inner) => inner.evaluate(view).trim().to_string(),
        }
    }
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn error(&self, message: &str) -> ExprError {
        ExprError {
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), ExprError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", token)))
        }
    }

    fn identifier(&mut self) -> Result<&'s str, ExprError> {
        self.skip_ws();
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(self.error("expected a name"));
        }
        let ident = &self.rest()[..len];
        self.pos += len;
        Ok(ident)
    }

    fn string_literal(&mut self) -> Result<String, ExprError> {
        self.skip_ws();
        let mut chars = self.rest().char_indices();
        let quote = match chars.next() {
            Some((_, q @ ('\'' | '"'))) => q,
            _ => return Err(self.error("expected a string literal")),
        };

        let mut value = String::new();
        let mut escaped = false;
        for (offset, c) in chars {
            if escaped {
                value.push(match c {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                self.pos += offset + c.len_utf8();
                return Ok(value);
            } else {
                value.push(c);
            }
        }
        Err(self.error("unterminated string literal"))
    }

    fn parse_fallback(&mut self) -> Result<Expr, ExprError> {
        let mut alternatives = vec![self.parse_concat()?];
        while self.eat("||") {
            alternatives.push(self.parse_concat()?);
        }
        Ok(if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            Expr::Fallback(alternatives)
        })
    }

    fn parse_concat(&mut self) -> Result<Expr, ExprError> {
        let mut parts = vec![self.parse_postfix()?];
        while self.eat("+") {
            parts.push(self.parse_postfix()?);
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Expr::Concat(parts)
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.parse_term()?;
        while self.eat(".trim()") {
            expr = Expr::Trim(Box::new(expr));
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        self.skip_ws();
        let rest = self.rest();

        if rest.starts_with('\'') || rest.starts_with('"') {
            return self.string_literal().map(Expr::Literal);
        }
        if self.eat("(") {
            let inner = self.parse_fallback()?;
            self.expect(")")?;
            return Ok(inner);
        }
        if self.eat("@") {
            return self.identifier().map(|name| Expr::Attribute(name.to_ascii_lowercase()));
        }
        if self.eat("text()") {
            return Ok(Expr::Text);
        }
        if self.eat("html()") {
            return Ok(Expr::InnerHtml);
        }
        if self.eat("el.") || self.eat("this.") {
            return self.parse_member();
        }

        Err(self.error("expected a string, @attribute, text(), html() or el.<member>"))
    }

    fn parse_member(&mut self) -> Result<Expr, ExprError> {
        let start = self.pos;
        let member = self.identifier()?;
        match member {
            "textContent" | "innerText" => Ok(Expr::Text),
            "innerHTML" => Ok(Expr::InnerHtml),
            "title" | "id" | "lang" => Ok(Expr::Attribute(member.to_string())),
            "className" => Ok(Expr::Attribute("class".to_string())),
            "getAttribute" => {
                self.expect("(")?;
                let name = self.string_literal()?;
                self.expect(")")?;
                Ok(Expr::Attribute(name.to_ascii_lowercase()))
            }
            "dataset" => {
                self.expect(".")?;
                let key = self.identifier()?;
                Ok(Expr::Attribute(format!("data-{}", camel_to_kebab(key))))
            }
            _ => {
                self.pos = start;
                Err(self.error(&format!("unsupported element member '{}'", member)))
            }
        }
    }
}

fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
