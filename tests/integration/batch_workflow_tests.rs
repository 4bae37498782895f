/*!
 * Integration tests for concurrent batch processing
 */

use anyhow::Result;
use crate::common;
use cuneify::batch::{BatchProcessor, DocumentJob, Pipeline};
use cuneify::errors::DocumentError;
use cuneify::markup::Dialect;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Test that every document of a batch is written and counted
#[test]
fn test_process_withManyDocuments_shouldWriteAllOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = Arc::new(common::sample_dictionary());

    let mut jobs = Vec::new();
    for i in 0..12 {
        let input = common::create_test_file(temp_dir.path(), &format!("in/{i:02}.html"), common::cdli_page())?;
        let output = temp_dir.path().join(format!("out/{i:02}.html"));
        jobs.push(DocumentJob::new(input, output, Some(Dialect::Cdli)));
    }

    let calls = AtomicUsize::new(0);
    let processor = BatchProcessor::new(Pipeline::Transliterate(dictionary), 3);
    let report = tokio_test::block_on(processor.process(jobs, |done, total| {
        calls.fetch_add(1, Ordering::SeqCst);
        assert!(done <= total);
    }));

    assert!(report.is_success());
    assert_eq!(report.succeeded.len(), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 12);

    // Results come back in input order whatever order they finished in
    let inputs: Vec<_> = report.succeeded.iter().map(|s| s.input.clone()).collect();
    let mut sorted = inputs.clone();
    sorted.sort();
    assert_eq!(inputs, sorted);

    assert_eq!(report.total_stats().signs_resolved, 48);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("out/07.html"))?,
        "<ol>\n\t<li><span>𒀭𒂗𒆤</span> <span>𒈗</span></li>\n</ol>"
    );
    Ok(())
}

/// Test that an unreadable document fails alone
#[test]
fn test_process_withUnreadableDocument_shouldReportItAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let good = common::create_test_file(temp_dir.path(), "good.html", "<span>a-ba</span>")?;
    let bad = temp_dir.path().join("bad.html");
    fs::write(&bad, [0xff, 0xfe, 0x00])?;

    let jobs = vec![
        DocumentJob::new(&bad, temp_dir.path().join("out/bad.html"), None),
        DocumentJob::new(&good, temp_dir.path().join("out/good.html"), None),
    ];
    let processor = BatchProcessor::new(Pipeline::Transliterate(Arc::new(common::sample_dictionary())), 2);
    let report = tokio_test::block_on(processor.process(jobs, |_, _| {}));

    assert_eq!(report.total(), 2);
    assert_eq!(report.succeeded.len(), 1);
    assert!(matches!(
        report.failure_for(&bad).map(|failure| &failure.error),
        Some(DocumentError::Read { .. })
    ));
    assert!(!temp_dir.path().join("out/bad.html").exists());
    assert_eq!(fs::read_to_string(temp_dir.path().join("out/good.html"))?, "<span>𒀀𒁀</span>");
    Ok(())
}

/// Test that an output path blocked by a file is a write failure
#[test]
fn test_processDocument_withBlockedOutput_shouldFailToWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "in.html", "<span>a</span>")?;
    common::create_test_file(temp_dir.path(), "blocker", "not a folder")?;

    let job = DocumentJob::new(&input, temp_dir.path().join("blocker/out.html"), None);
    let result = Pipeline::NormalizeOnly.process_document(&job);

    assert!(matches!(result, Err(DocumentError::Write { .. })));
    Ok(())
}

/// Test that an empty batch is a success
#[test]
fn test_process_withNoJobs_shouldReturnEmptyReport() {
    let processor = BatchProcessor::new(Pipeline::NormalizeOnly, 0);
    assert_eq!(processor.jobs(), 1);

    let report = tokio_test::block_on(processor.process(Vec::new(), |_, _| {}));

    assert!(report.is_success());
    assert_eq!(report.total(), 0);
}
