/*!
 * Compiled ruby templates.
 *
 * A template selects elements and turns each into a `<ruby>` block: the
 * base form followed by phonetic (`rt`) tiers and then gloss (`rtc`) tiers.
 */

use log::{debug, warn};

use crate::dictionary::schema::{RawRuby, RawTier};
use crate::errors::ConfigError;
use crate::lang_tags;
use crate::markup::entities;
use crate::markup::selector::Selector;

use super::expr::{ElementView, Expr};

/// Language used when a template or tier names none
pub const DEFAULT_LANG: &str = "en";

/// Tier values that mean "no annotation"
const OMITTED_VALUES: [&str; 2] = ["X", "…"];

/// Kind of annotation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    /// Pronunciation; never machine-translated
    Phonetic,
    /// Translation gloss; may be machine-translated
    Gloss,
}

impl TierKind {
    /// Element name of the tier
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Phonetic => "rt",
            Self::Gloss => "rtc",
        }
    }

    /// Value of the `translate` attribute
    pub fn translate_hint(&self) -> &'static str {
        match self {
            Self::Phonetic => "no",
            Self::Gloss => "yes",
        }
    }
}

/// One annotation tier of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub kind: TierKind,
    pub expr: Expr,
    pub lang: String,
}

/// A compiled ruby template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubyTemplate {
    pub selector: Selector,
    pub lang: String,
    pub base: Expr,
    /// Phonetic tiers first, then gloss tiers, each in declared order
    pub tiers: Vec<Tier>,
}

impl RubyTemplate {
    /// Compile a raw template; `index` is its position for error messages
    pub fn from_raw(raw: RawRuby, index: usize) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidTemplate { index, message };

        let selector = Selector::parse(&raw.query).map_err(|e| invalid(e.to_string()))?;
        let base = Expr::parse(&raw.rb).map_err(|e| invalid(format!("rb: {}", e)))?;
        let lang = checked_lang(raw.lang.as_deref(), index);

        let mut tiers = Vec::new();
        for (kind, raw_tiers) in [(TierKind::Phonetic, raw.rt), (TierKind::Gloss, raw.rtc)] {
            let Some(raw_tiers) = raw_tiers else {
                continue;
            };
            for raw_tier in raw_tiers.into_vec() {
                tiers.push(compile_tier(kind, &raw_tier, index)?);
            }
        }

        Ok(Self {
            selector,
            lang,
            base,
            tiers,
        })
    }

    /// Build the ruby block for one element
    pub fn render(&self, view: &ElementView<'_, '_>) -> String {
        let class = view.attribute("class").unwrap_or_default();
        let mut html = format!(
            " <ruby class=\"{}\" lang=\"{}\" translate=\"no\">{}",
            entities::escape_attribute(&class),
            entities::escape_attribute(&self.lang),
            self.base.evaluate(view)
        );

        for tier in &self.tiers {
            let value = tier.expr.evaluate(view);
            if is_omitted(&value) {
                continue;
            }
            html.push_str(&format!(
                "<{tag} lang=\"{lang}\" translate=\"{hint}\">{value}</{tag}>",
                tag = tier.kind.tag(),
                lang = entities::escape_attribute(&tier.lang),
                hint = tier.kind.translate_hint(),
                value = value,
            ));
        }

        html.push_str("</ruby> ");
        html
    }
}

/// Whether a tier value should be left out of the block
pub fn is_omitted(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || OMITTED_VALUES.contains(&value)
}

fn compile_tier(kind: TierKind, raw: &RawTier, index: usize) -> Result<Tier, ConfigError> {
    let expr = Expr::parse(raw.eval()).map_err(|e| ConfigError::InvalidTemplate {
        index,
        message: format!("{}: {}", kind.tag(), e),
    })?;
    Ok(Tier {
        kind,
        expr,
        lang: checked_lang(raw.lang(), index),
    })
}

fn checked_lang(lang: Option<&str>, index: usize) -> String {
    let lang = lang.unwrap_or(DEFAULT_LANG).trim();
    match lang_tags::get_language_name(lang) {
        Ok(name) => debug!("Ruby template {}: language '{}' ({})", index, lang, name),
        Err(_) => warn!("Ruby template {}: unrecognized language tag '{}'", index, lang),
    }
    lang.to_string()
}
