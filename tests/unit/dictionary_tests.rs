/*!
 * Tests for dictionary loading and sign table derivation
 */

use anyhow::Result;
use crate::common;
use cuneify::ConfigError;
use cuneify::dictionary::schema::RawDictionary;
use cuneify::dictionary::{Dictionary, derive_sign_rules, is_numeral_pattern, load_dictionary};

/// Test that a dictionary file is loaded and numerals are kept out of the sign table
#[test]
fn test_loadDictionary_withSampleFile_shouldFilterNumerals() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_dictionary(temp_dir.path())?;

    let dictionary = load_dictionary(temp_dir.path(), "cuneiform")?;

    assert_eq!(dictionary.script(), "cuneiform");
    assert_eq!(dictionary.signs().len(), 9);
    assert_eq!(dictionary.numbers().len(), 3);
    assert_eq!(dictionary.ruby().len(), 1);
    assert!(dictionary.signs().rules().iter().all(|rule| !is_numeral_pattern(&rule.pattern)));

    Ok(())
}

/// Test that the sign table is searched in reverse declaration order
#[test]
fn test_signs_withOverlappingRules_shouldPreferLaterDeclaration() -> Result<()> {
    let dictionary = Dictionary::from_json_str(
        "cuneiform",
        r#"{ "unicode": [["lu[0-9]*", "𒇽"], ["lu2", "𒇽-late"], ["x", "𒓀"]] }"#,
    )?;

    let patterns: Vec<&str> = dictionary.signs().rules().iter().map(|rule| rule.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["x", "lu2", "lu[0-9]*"]);
    assert_eq!(dictionary.signs().resolve("lu2").map(|r| r.replacement.as_str()), Some("𒇽-late"));
    assert_eq!(dictionary.signs().resolve("lu").map(|r| r.replacement.as_str()), Some("𒇽"));

    Ok(())
}

/// Test that derivation leaves its input untouched
#[test]
fn test_deriveSignRules_shouldBePure() -> Result<()> {
    let raw: RawDictionary = serde_json::from_str(r#"{ "unicode": [["a", "1"], ["9", "x"], ["b", "2"]] }"#)?;

    let derived = derive_sign_rules(&raw.unicode);

    assert_eq!(raw.unicode.len(), 3);
    assert_eq!(raw.unicode[0].pattern(), "a");
    assert_eq!(derived.iter().map(|r| r.pattern()).collect::<Vec<_>>(), vec!["b", "a"]);

    Ok(())
}

/// Test the numeral filter on bare numbers and number words
#[test]
fn test_isNumeralPattern_shouldMatchNumbersAndWholeNumberWords() {
    assert!(is_numeral_pattern("12"));
    assert!(is_numeral_pattern("3,600"));
    assert!(is_numeral_pattern("one"));
    assert!(is_numeral_pattern("aš or diš"));
    assert!(!is_numeral_pattern("a2"));
    assert!(!is_numeral_pattern("tone"));
    assert!(!is_numeral_pattern("ninda"));
}

/// Test that object-form rules and single ruby objects are accepted
#[test]
fn test_fromJsonStr_withObjectRules_shouldReadLogsFlag() -> Result<()> {
    let dictionary = Dictionary::from_json_str(
        "cuneiform",
        r#"{
            "unicode": [{ "pattern": "ka", "replacement": "𒅗", "logs": true }, ["ku", "𒆪"]],
            "ruby": { "query": "span", "rb": "html()", "rt": ["'a'", { "eval": "'b'", "@lang": "sux" }] }
        }"#,
    )?;

    let rules = dictionary.signs().rules();
    assert!(!rules[0].logs);
    assert!(rules[1].logs);
    assert_eq!(dictionary.ruby()[0].tiers.len(), 2);
    assert_eq!(dictionary.ruby()[0].tiers[1].lang, "sux");

    Ok(())
}

/// Test that a missing dictionary file is reported as not found
#[test]
fn test_loadDictionary_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = load_dictionary(temp_dir.path(), "cuneiform");

    assert!(matches!(result, Err(ConfigError::NotFound(path)) if path.ends_with("cuneiform.json")));
    Ok(())
}

/// Test that schema violations and bad templates are rejected
#[test]
fn test_fromJsonStr_withInvalidContent_shouldFail() {
    assert!(matches!(
        Dictionary::from_json_str("c", r#"{ "numbers": [["1"]] }"#),
        Err(ConfigError::Schema(_))
    ));
    assert!(matches!(
        Dictionary::from_json_str("c", r#"{ "special-chars": [["[", "x"]] }"#),
        Err(ConfigError::InvalidPattern { collection: "special-chars", index: 0, .. })
    ));
    assert!(matches!(
        Dictionary::from_json_str("c", r#"{ "ruby": { "query": "span", "rb": "el.outerHTML" } }"#),
        Err(ConfigError::InvalidTemplate { index: 0, .. })
    ));
}
