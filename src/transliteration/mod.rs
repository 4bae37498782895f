/*!
 * The transliteration pipeline.
 *
 * A document runs through five stages in a fixed order:
 *
 * 1. markup normalization (`crate::markup::normalizer`)
 * 2. compound decomposition (`decomposer`)
 * 3. numeral transliteration (`numbers`)
 * 4. superscript unwrapping (`superscript`)
 * 5. gloss annotation (`crate::gloss`)
 */

pub mod decomposer;
pub mod glyph;
pub mod numbers;
pub mod segment;
pub mod stats;
pub mod superscript;

use log::debug;

use crate::dictionary::Dictionary;
use crate::gloss::GlossAnnotator;
use crate::markup::{Document, MarkupNormalizer};

pub use decomposer::CompoundDecomposer;
pub use numbers::NumberTransliterator;
pub use stats::DocumentStats;
pub use superscript::unwrap_superscripts;

/// Runs the pipeline stages over documents with one shared dictionary
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'d> {
    dictionary: &'d Dictionary,
}

impl<'d> Transliterator<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    /// Stage 1: rewrite the document's dialect into canonical markup
    pub fn normalize(&self, document: Document) -> Document {
        MarkupNormalizer::normalize(document)
    }

    /// Stage 2: text rules and sign decomposition
    pub fn decompose(&self, markup: &str, stats: &mut DocumentStats) -> String {
        CompoundDecomposer::new(self.dictionary).decompose(markup, stats)
    }

    /// Stage 3: `NU:` numerals
    pub fn transliterate_numbers(&self, markup: &str, stats: &mut DocumentStats) -> String {
        NumberTransliterator::new(self.dictionary).transliterate(markup, stats)
    }

    /// Stage 4: glyph-only `<sup>` wrappers
    pub fn unwrap_superscripts(&self, markup: &str, stats: &mut DocumentStats) -> String {
        unwrap_superscripts(markup, stats)
    }

    /// Stage 5: ruby gloss blocks
    pub fn annotate(&self, markup: &str, stats: &mut DocumentStats) -> String {
        let (annotated, blocks) = GlossAnnotator::new(self.dictionary.ruby()).annotate(markup);
        stats.ruby_blocks += blocks;
        annotated
    }

    /// Run every stage in order
    pub fn run(&self, document: Document) -> (Document, DocumentStats) {
        let mut stats = DocumentStats::new();
        let document = self.normalize(document);

        let markup = self.decompose(document.markup(), &mut stats);
        let markup = self.transliterate_numbers(&markup, &mut stats);
        let markup = self.unwrap_superscripts(&markup, &mut stats);
        let markup = self.annotate(&markup, &mut stats);

        debug!("{}: {}", document.display_name(), stats.summary());
        (document.with_markup(markup), stats)
    }
}

/// Transliterate one document with `dictionary`
pub fn transliterate(document: Document, dictionary: &Dictionary) -> Document {
    Transliterator::new(dictionary).run(document).0
}
