/*!
 * Tests for ruby templates, selectors and gloss expressions
 */

use anyhow::Result;
use crate::common;
use cuneify::Dictionary;
use cuneify::gloss::{ElementView, Expr, GlossAnnotator};
use cuneify::markup::{ElementTree, Selector};

/// Test that a placeholder tier is dropped and a real gloss kept
#[test]
fn test_annotate_withPlaceholderTier_shouldKeepOnlyGloss() {
    let dictionary = common::sample_dictionary();

    let (out, count) = GlossAnnotator::new(dictionary.ruby()).annotate(r#"<li><span title="shield">𒃰</span></li>"#);

    assert_eq!(count, 1);
    assert_eq!(
        out,
        r#"<li> <ruby class="" lang="sux" translate="no">𒃰<rtc lang="en" translate="yes">shield</rtc></ruby> </li>"#
    );
}

/// Test that tiers come out phonetic first, gloss second, in declared order
#[test]
fn test_annotate_shouldOrderTiersAndCopyClass() -> Result<()> {
    let dictionary = Dictionary::from_json_str(
        "cuneiform",
        r#"{ "ruby": {
            "query": "span.word",
            "rb": "html()",
            "rtc": ["@title", "@data-note"],
            "rt": ["'lu-gal'", "'…'"]
        } }"#,
    )?;

    let (out, _) = GlossAnnotator::new(dictionary.ruby())
        .annotate(r#"<span class="word big" title="king" data-note="great man">𒈗</span>"#);

    assert_eq!(
        out,
        concat!(
            r#" <ruby class="word big" lang="en" translate="no">𒈗"#,
            r#"<rt lang="en" translate="no">lu-gal</rt>"#,
            r#"<rtc lang="en" translate="yes">king</rtc>"#,
            r#"<rtc lang="en" translate="yes">great man</rtc></ruby> "#,
        )
    );
    Ok(())
}

/// Test that nested matches are annotated through their outermost element only
#[test]
fn test_annotate_withNestedMatches_shouldUseOutermost() -> Result<()> {
    let dictionary = Dictionary::from_json_str(
        "cuneiform",
        r#"{ "ruby": { "query": "span[title]", "rb": "el.innerHTML", "rtc": "el.title" } }"#,
    )?;

    let (out, count) = GlossAnnotator::new(dictionary.ruby())
        .annotate(r#"<span title="a"><span title="b">x</span></span>"#);

    assert_eq!(count, 1);
    assert_eq!(
        out,
        r#" <ruby class="" lang="en" translate="no"><span title="b">x</span><rtc lang="en" translate="yes">a</rtc></ruby> "#
    );
    Ok(())
}

/// Test that missing attributes evaluate to nothing and the tier is omitted
#[test]
fn test_annotate_withMissingAttribute_shouldOmitTier() -> Result<()> {
    let dictionary = Dictionary::from_json_str(
        "cuneiform",
        r#"{ "ruby": { "query": "span", "rb": "text()", "rtc": "el.getAttribute('title')" } }"#,
    )?;

    let (out, _) = GlossAnnotator::new(dictionary.ruby()).annotate("<span>a &amp; b</span>");

    assert_eq!(out, r#" <ruby class="" lang="en" translate="no">a &amp; b</ruby> "#);
    Ok(())
}

/// Test selector combinators
#[test]
fn test_selector_shouldSupportDescendantAndChildCombinators() -> Result<()> {
    let tree = ElementTree::parse(r#"<ol><li><span id="a"><b>x</b></span></li><li><b>y</b></li></ol>"#);

    let descendant: Selector = "li b".parse()?;
    let child: Selector = "li > b".parse()?;
    let by_id: Selector = "#a > b, ol > li".parse()?;

    assert_eq!(descendant.select_all(&tree).len(), 2);
    assert_eq!(child.select_all(&tree).len(), 1);
    assert_eq!(by_id.select_all(&tree).len(), 3);
    Ok(())
}

/// Test that unsupported selector syntax is rejected
#[test]
fn test_selector_withPseudoClass_shouldFail() {
    assert!(Selector::parse("span:first-child").is_err());
    assert!(Selector::parse("").is_err());
}

/// Test fallback, concatenation and trimming
#[test]
fn test_expr_shouldEvaluateFallbackConcatAndTrim() -> Result<()> {
    let tree = ElementTree::parse(r#"<span title=" king " lang="sux">lugal</span>"#);
    let view = ElementView::new(&tree, &tree.elements()[0]);

    let fallback = Expr::parse("@data-gloss || el.title.trim()")?;
    let concat = Expr::parse("el.lang + ': ' + text()")?;

    assert_eq!(fallback.evaluate(&view), "king");
    assert_eq!(concat.evaluate(&view), "sux: lugal");
    Ok(())
}

/// Test that expressions cannot reach outside the closed grammar
#[test]
fn test_expr_withArbitraryCode_shouldFail() {
    assert!(Expr::parse("el.parentNode.title").is_err());
    assert!(Expr::parse("alert(1)").is_err());
    assert!(Expr::parse("'unterminated").is_err());
}
