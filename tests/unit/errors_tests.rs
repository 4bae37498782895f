/*!
 * Tests for error types
 */

use cuneify::errors::{AppError, ConfigError, DocumentError};
use std::error::Error;
use std::path::PathBuf;

/// Test config error messages name the failing rule
#[test]
fn test_configError_display_shouldNameCollectionAndIndex() {
    let error = ConfigError::InvalidPattern {
        collection: "unicode",
        index: 3,
        message: "unclosed group".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid pattern in 'unicode' rule 3: unclosed group");

    let error = ConfigError::NotFound(PathBuf::from("src/linear-b.json"));
    assert!(error.to_string().contains("linear-b.json"));
}

/// Test that JSON errors convert and keep their source
#[test]
fn test_configError_fromSerdeJson_shouldBeSchemaError() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: ConfigError = json_error.into();

    assert!(matches!(error, ConfigError::Schema(_)));
    assert!(error.to_string().starts_with("Dictionary schema error"));
}

/// Test that I/O errors expose their cause
#[test]
fn test_configError_io_shouldExposeSource() {
    let error = ConfigError::Io {
        path: PathBuf::from("src/cuneiform.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(error.source().is_some());
    assert!(error.to_string().contains("denied"));
}

/// Test document error messages carry the path
#[test]
fn test_documentError_display_shouldIncludePath() {
    let error = DocumentError::Write {
        path: PathBuf::from("docs/a.html"),
        message: "disk full".to_string(),
    };
    assert_eq!(error.to_string(), "Failed to write document \"docs/a.html\": disk full");
}

/// Test wrapping into the application error
#[test]
fn test_appError_from_shouldWrapEachKind() {
    let config: AppError = ConfigError::NotFound(PathBuf::from("x.json")).into();
    assert!(matches!(config, AppError::Config(_)));

    let document: AppError = DocumentError::Read {
        path: PathBuf::from("a.html"),
        message: "gone".to_string(),
    }
    .into();
    assert!(document.to_string().starts_with("Document error: Failed to read document"));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "nope").into();
    assert!(matches!(io, AppError::File(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(other.to_string(), "Unknown error: boom");
}
