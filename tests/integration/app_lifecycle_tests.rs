/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use crate::common;
use cuneify::app_config::{Config, SourceConfig};
use cuneify::app_controller::Controller;
use cuneify::markup::Dialect;
use std::fs;
use std::path::Path;

fn test_config(root: &Path) -> Config {
    Config {
        dictionary_dir: root.join("dict"),
        source_dir: root.join("src"),
        output_dir: root.join("docs"),
        jobs: 2,
        ..Config::default()
    }
}

fn seed_sources(root: &Path) -> Result<()> {
    common::create_test_dictionary(&root.join("dict"))?;
    common::create_test_file(root, "src/etcsl/c.1.1.html", common::etcsl_page())?;
    common::create_test_file(root, "src/cdli/P1/Q000001.html", common::cdli_page())?;
    common::create_test_file(root, "src/enuma-elish.html", common::enuma_elish_page())?;
    Ok(())
}

/// Test that the controller validates its configuration
#[test]
fn test_controller_withInvalidConfig_shouldRefuseToStart() {
    let mut config = Config::default();
    config.jobs = 0;
    assert!(Controller::with_config(config).is_err());
}

/// Test a full run over the default sources
#[test]
fn test_run_withConfiguredSources_shouldMirrorOutputTree() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    seed_sources(root)?;

    let controller = Controller::with_config(test_config(root))?;
    let report = tokio_test::block_on(controller.run(&[], None))?;

    assert!(report.is_success());
    assert_eq!(report.total(), 3);

    let cdli = fs::read_to_string(root.join("docs/cdli/P1/Q000001.html"))?;
    assert_eq!(cdli, "<ol>\n\t<li><span>𒀭𒂗𒆤</span> <span>𒈗</span></li>\n</ol>");

    let etcsl = fs::read_to_string(root.join("docs/etcsl/c.1.1.html"))?;
    assert!(etcsl.contains(r#"<rtc lang="en" translate="yes">king</rtc>"#));
    assert!(!etcsl.contains("onMouseover"));

    let poem = fs::read_to_string(root.join("docs/enuma-elish.html"))?;
    assert!(poem.ends_with("𒐈</p>"));

    let stats = report.total_stats();
    assert_eq!(stats.ruby_blocks, 3);
    assert_eq!(stats.numerals_resolved, 1);
    Ok(())
}

/// Test that explicit inputs override configured sources
#[test]
fn test_run_withExplicitFolder_shouldOnlyProcessIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    seed_sources(root)?;

    let controller = Controller::with_config(test_config(root))?;
    let report = tokio_test::block_on(controller.run(&[root.join("src/cdli")], Some(Dialect::Cdli)))?;

    assert_eq!(report.total(), 1);
    assert!(root.join("docs/cdli/P1/Q000001.html").exists());
    assert!(!root.join("docs/etcsl").exists());
    Ok(())
}

/// Test that a document lands in the same place however it is selected
#[test]
fn test_run_withExplicitFile_shouldMatchConfiguredSourceOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    seed_sources(root)?;
    let document = root.join("src/cdli/P1/Q000001.html");
    let output = root.join("docs/cdli/P1/Q000001.html");

    let controller = Controller::with_config(test_config(root))?;

    tokio_test::block_on(controller.run(&[document.clone()], None))?;
    let from_file = fs::read_to_string(&output)?;
    fs::remove_dir_all(root.join("docs"))?;

    tokio_test::block_on(controller.run(&[], None))?;
    let from_sources = fs::read_to_string(&output)?;

    assert_eq!(from_file, from_sources);
    assert!(!root.join("docs/Q000001.html").exists());
    Ok(())
}

/// Test that normalize writes canonical markup without a dictionary
#[test]
fn test_normalize_withoutDictionary_shouldWriteCanonicalMarkup() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "src/enuma-elish.html", common::enuma_elish_page())?;

    let controller = Controller::with_config(test_config(root))?;
    let report = tokio_test::block_on(controller.normalize(&[], None))?;

    assert_eq!(report.total(), 1);
    assert_eq!(
        fs::read_to_string(root.join("docs/enuma-elish.html"))?,
        r#"<p><span title="ed-a">ed<wbr>a</span> NU:3</p>"#
    );
    Ok(())
}

/// Test that a missing dictionary aborts the run before any output
#[test]
fn test_run_withMissingDictionary_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "src/enuma-elish.html", common::enuma_elish_page())?;

    let mut config = test_config(root);
    config.script = "linear-b".to_string();
    config.sources = vec![SourceConfig::new("enuma-elish.html", None)];
    let controller = Controller::with_config(config)?;

    let error = tokio_test::block_on(controller.run(&[], None)).unwrap_err();

    assert!(format!("{:#}", error).contains("linear-b"));
    assert!(!root.join("docs").exists());
    Ok(())
}

/// Test that a missing explicit input is an error
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_dictionary(&root.join("dict"))?;

    let controller = Controller::with_config(test_config(root))?;
    assert!(tokio_test::block_on(controller.run(&[root.join("nope.html")], None)).is_err());
    Ok(())
}
