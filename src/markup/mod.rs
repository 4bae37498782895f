/*!
 * Markup handling: documents, dialects, normalization, and the small
 * element/selector layer used by the gloss annotator.
 */

pub mod dialect;
pub mod document;
pub mod element;
pub mod entities;
pub mod normalizer;
pub mod selector;

pub use dialect::Dialect;
pub use document::Document;
pub use element::{Element, ElementTree};
pub use normalizer::{MarkupNormalizer, RewriteStep};
pub use selector::{Selector, SelectorError};
