/*!
 * Gloss annotation.
 *
 * - `expr`: the closed expression language templates use to read elements
 * - `template`: compiled ruby templates and tier rendering
 * - `annotator`: applies templates to a document
 */

pub mod annotator;
pub mod expr;
pub mod template;

pub use annotator::GlossAnnotator;
pub use expr::{ElementView, Expr, ExprError};
pub use template::{RubyTemplate, Tier, TierKind};
