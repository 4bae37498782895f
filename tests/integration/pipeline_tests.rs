/*!
 * Integration tests for the whole transliteration pipeline, one per dialect
 */

use anyhow::Result;
use crate::common;
use cuneify::markup::{Dialect, Document};
use cuneify::{Dictionary, Transliterator, load_dictionary, transliterate};

/// Test an ETCSL page end to end
#[test]
fn test_run_etcslPage_shouldProduceGlossedGlyphs() {
    let dictionary = common::sample_dictionary();
    let document = Document::new(common::etcsl_page()).with_dialect(Dialect::Etcsl);

    let (document, stats) = Transliterator::new(&dictionary).run(document);

    assert_eq!(
        document.markup(),
        concat!(
            "<ol>\n\t<li>",
            r#" <ruby class="" lang="sux" translate="no">𒈗<rtc lang="en" translate="yes">king</rtc></ruby> "#,
            " ",
            r#" <ruby class="" lang="sux" translate="no">𒂗<rtc lang="en" translate="yes">lord</rtc></ruby> "#,
            "</li>\n</ol>",
        )
    );
    assert_eq!(stats.signs_resolved, 2);
    assert_eq!(stats.ruby_blocks, 2);
    assert!(stats.unresolved.is_empty());
}

/// Test a CDLI page end to end, including determinative unwrapping
#[test]
fn test_run_cdliPage_shouldUnwrapDeterminatives() {
    let dictionary = common::sample_dictionary();
    let document = Document::new(common::cdli_page()).with_dialect(Dialect::Cdli);

    let (document, stats) = Transliterator::new(&dictionary).run(document);

    assert_eq!(
        document.markup(),
        "<ol>\n\t<li><span>𒀭𒂗𒆤</span> <span>𒈗</span></li>\n</ol>"
    );
    assert_eq!(stats.signs_resolved, 4);
    assert_eq!(stats.superscripts_unwrapped, 1);
    assert_eq!(stats.ruby_blocks, 0);
}

/// Test Enuma Elish running text with a numeral
#[test]
fn test_run_enumaElish_shouldResolveSignsAndNumerals() {
    let dictionary = common::sample_dictionary();
    let document = Document::new(common::enuma_elish_page()).with_dialect(Dialect::EnumaElish);

    let (document, stats) = Transliterator::new(&dictionary).run(document);

    assert_eq!(
        document.markup(),
        concat!(
            "<p>",
            r#" <ruby class="" lang="sux" translate="no">𒂦<wbr>𒀀<rtc lang="en" translate="yes">ed-a</rtc></ruby> "#,
            "𒐈</p>",
        )
    );
    assert_eq!(stats.signs_resolved, 2);
    assert_eq!(stats.numerals_resolved, 1);
    assert_eq!(stats.ruby_blocks, 1);
}

/// Test that a document without a dialect skips normalization only
#[test]
fn test_transliterate_withoutDialect_shouldStillResolveSigns() {
    let dictionary = common::sample_dictionary();

    let out = transliterate(Document::new("<div><span>lugal-zu</span></div>"), &dictionary);

    assert_eq!(out.markup(), "<div><span>𒈗-zu</span></div>");
    assert_eq!(out.dialect(), None);
}

/// Test the pipeline with a dictionary loaded from disk
#[test]
fn test_transliterate_withLoadedDictionary_shouldMatchInMemoryOne() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_dictionary(temp_dir.path())?;

    let loaded = load_dictionary(temp_dir.path(), "cuneiform")?;
    let in_memory = common::sample_dictionary();
    let document = Document::new(common::cdli_page()).with_dialect(Dialect::Cdli);

    assert_eq!(
        transliterate(document.clone(), &loaded),
        transliterate(document, &in_memory)
    );
    assert_eq!(loaded.script(), "cuneiform");
    Ok(())
}

/// Test that an empty dictionary still normalizes but resolves nothing
#[test]
fn test_run_withEmptyDictionary_shouldOnlyNormalize() -> Result<()> {
    let dictionary = Dictionary::from_json_str("empty", "{}")?;
    let document = Document::new(common::cdli_page()).with_dialect(Dialect::Cdli);

    let (document, stats) = Transliterator::new(&dictionary).run(document);

    assert_eq!(
        document.markup(),
        "<ol>\n\t<li><span><sup>d</sup>en-lil2</span> <span>lugal</span></li>\n</ol>"
    );
    assert_eq!(stats.signs_resolved, 0);
    assert_eq!(stats.unresolved, vec!["d", "en", "lil2", "lugal"]);
    Ok(())
}
