/*!
 * Tests for file utility functionality
 */

use anyhow::Result;
use crate::common;
use cuneify::file_utils::{DOCUMENT_EXTENSIONS, FileManager};
use std::path::{Path, PathBuf};

/// Test file and directory existence checks
#[test]
fn test_exists_withFilesAndDirs_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.html", "<p></p>")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.html")));
    Ok(())
}

/// Test that a folder expands to its documents only, in path order
#[test]
fn test_findDocuments_withFolder_shouldListMarkupFilesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b/2.html", "")?;
    common::create_test_file(temp_dir.path(), "a/1.htm", "")?;
    common::create_test_file(temp_dir.path(), "a/notes.txt", "")?;
    common::create_test_file(temp_dir.path(), "cuneiform.json", "{}")?;

    let documents = FileManager::find_documents(temp_dir.path())?;

    assert_eq!(
        documents,
        vec![temp_dir.path().join("a/1.htm"), temp_dir.path().join("b/2.html")]
    );
    Ok(())
}

/// Test that a single file expands to itself whatever its extension
#[test]
fn test_findDocuments_withFile_shouldReturnIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "page.xhtml", "")?;

    assert_eq!(FileManager::find_documents(&file)?, vec![file]);
    Ok(())
}

/// Test extension matching
#[test]
fn test_hasExtension_shouldIgnoreCaseAndLeadingDot() {
    assert!(FileManager::has_extension(Path::new("a.HTML"), &DOCUMENT_EXTENSIONS));
    assert!(FileManager::has_extension(Path::new("a.htm"), &[".htm"]));
    assert!(!FileManager::has_extension(Path::new("a.json"), &DOCUMENT_EXTENSIONS));
    assert!(!FileManager::has_extension(Path::new("html"), &DOCUMENT_EXTENSIONS));
}

/// Test that writing creates missing parent folders
#[test]
fn test_writeToFile_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("docs/cdli/deep/out.html");

    FileManager::write_to_file(&path, "𒀀")?;

    assert_eq!(FileManager::read_to_string(&path)?, "𒀀");
    Ok(())
}

/// Test output path mirroring
#[test]
fn test_mirroredOutputPath_shouldMirrorUnderOutputDir() -> Result<()> {
    let out = FileManager::mirrored_output_path("src/cdli/p1/q.html", "src", "docs")?;
    assert_eq!(out, PathBuf::from("docs/cdli/p1/q.html"));
    Ok(())
}
