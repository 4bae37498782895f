/*!
 * # cuneify - cuneiform sign-code transliteration
 *
 * A Rust library that rewrites romanized cuneiform sign-codes
 * (`ed3-de3-a-ba`, `NU:3`) in HTML pages into Unicode cuneiform glyphs and
 * annotates them with ruby glosses.
 *
 * ## Features
 *
 * - Per-script JSON dictionaries, loaded once and shared read-only
 * - Three source dialects rewritten into one canonical markup shape:
 *   - ETCSL table pages with hover-title spans
 *   - CDLI table pages with line labels and `&amp;` ligatures
 *   - Enuma Elish running text
 * - First-match sign resolution where later dictionary rules win
 * - Idempotent decomposition: already-resolved glyphs are never re-read
 * - Multi-tier `<ruby>` glosses driven by selector/expression templates
 * - Concurrent batch processing with per-document failure isolation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `dictionary`: dictionary schema, compilation and caching
 * - `markup`: documents, element scanning, dialects and normalization
 * - `transliteration`: the pipeline and its sign-level stages:
 *   - `transliteration::decomposer`: sign-group decomposition
 *   - `transliteration::numbers`: `NU:` numerals
 *   - `transliteration::superscript`: determinative unwrapping
 * - `gloss`: ruby templates and their expression language
 * - `batch`: concurrent per-document processing
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `lang_tags`: ISO language tag checks for ruby tiers
 * - `errors`: Custom error types for the application
 *
 * ## Example
 *
 * ```
 * use cuneify::{Dictionary, Document, transliterate};
 *
 * let dictionary = Dictionary::from_json_str(
 *     "cuneiform",
 *     r#"{ "unicode": [["ed", "𒂦"], ["de", "𒉈"], ["a", "𒀀"], ["ba", "𒁀"]] }"#,
 * ).unwrap();
 *
 * let document = transliterate(Document::new("<span>ed-de-a-ba</span>"), &dictionary);
 * assert_eq!(document.markup(), "<span>𒂦𒉈𒀀𒁀</span>");
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod dictionary;
pub mod errors;
pub mod file_utils;
pub mod gloss;
pub mod lang_tags;
pub mod markup;
pub mod transliteration;

// Re-export main types for easier usage
pub use app_config::Config;
pub use batch::{BatchProcessor, BatchReport, DocumentJob};
pub use dictionary::{Dictionary, DictionaryCache, load_dictionary};
pub use errors::{AppError, ConfigError, DocumentError};
pub use markup::{Dialect, Document, MarkupNormalizer};
pub use transliteration::{DocumentStats, Transliterator, transliterate};
