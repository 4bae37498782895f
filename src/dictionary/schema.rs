/*!
 * On-disk shape of a dictionary file.
 *
 * These types mirror the JSON exactly, including the places where the file
 * format accepts more than one shape (tuple or object rules, a single ruby
 * template or an array of them). They are only used while loading; the
 * loader turns them into the compiled, immutable [`super::Dictionary`].
 */

use serde::Deserialize;

/// Raw dictionary document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDictionary {
    /// Patterns whose matches are deleted
    #[serde(default)]
    pub remove: Vec<String>,

    /// Literal substitutions, applied in order
    #[serde(default, rename = "special-chars")]
    pub special_chars: Vec<RawRule>,

    /// Whole-span overrides
    #[serde(default)]
    pub dictionary: Vec<RawRule>,

    /// Sign table
    #[serde(default)]
    pub unicode: Vec<RawRule>,

    /// Numeral table
    #[serde(default)]
    pub numbers: Vec<RawRule>,

    /// Gloss templates
    #[serde(default)]
    pub ruby: Option<OneOrMany<RawRuby>>,
}

/// A rule written either as `["pattern", "replacement"]` or as an object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRule {
    Pair(String, String),
    Object {
        pattern: String,
        replacement: String,
        #[serde(default)]
        logs: bool,
    },
}

impl RawRule {
    pub fn pattern(&self) -> &str {
        match self {
            Self::Pair(pattern, _) => pattern,
            Self::Object { pattern, .. } => pattern,
        }
    }

    pub fn replacement(&self) -> &str {
        match self {
            Self::Pair(_, replacement) => replacement,
            Self::Object { replacement, .. } => replacement,
        }
    }

    pub fn logs(&self) -> bool {
        match self {
            Self::Pair(..) => false,
            Self::Object { logs, .. } => *logs,
        }
    }
}

/// Either a single value or an array of values
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into an ordered list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// Raw ruby template
#[derive(Debug, Clone, Deserialize)]
pub struct RawRuby {
    /// Element selector
    pub query: String,

    /// Base-form expression
    pub rb: String,

    /// Phonetic tier expression(s)
    #[serde(default)]
    pub rt: Option<OneOrMany<RawTier>>,

    /// Gloss tier expression(s)
    #[serde(default)]
    pub rtc: Option<OneOrMany<RawTier>>,

    /// Language of the ruby element itself
    #[serde(default, rename = "@lang")]
    pub lang: Option<String>,
}

/// Raw tier: a bare expression string or `{ "eval": ..., "@lang": ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTier {
    Expr(String),
    Object {
        eval: String,
        #[serde(default, rename = "@lang")]
        lang: Option<String>,
    },
}

impl RawTier {
    pub fn eval(&self) -> &str {
        match self {
            Self::Expr(expr) => expr,
            Self::Object { eval, .. } => eval,
        }
    }

    pub fn lang(&self) -> Option<&str> {
        match self {
            Self::Expr(_) => None,
            Self::Object { lang, .. } => lang.as_deref(),
        }
    }
}
