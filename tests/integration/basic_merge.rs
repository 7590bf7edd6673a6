use crate::common;

use docfuse::config::MergeRequest;
use docfuse::merge::merge_sources;
use docfuse::source::SourceDocument;

#[tokio::test]
async fn test_single_pdf_round_trips() {
    let request = MergeRequest::new(vec![common::pdf_source("only.pdf", 3)]);
    let output = merge_sources(&request).await.unwrap();

    assert_eq!(output.pages_merged, 3);
    assert!(output.bytes.starts_with(b"%PDF-"));
    assert_eq!(common::page_count(&output.bytes), 3);
}

#[tokio::test]
async fn test_two_pdfs_concatenate_in_upload_order() {
    let request = MergeRequest::new(vec![
        common::pdf_source("first.pdf", 2),
        common::pdf_source("second.pdf", 3),
    ]);
    let output = merge_sources(&request).await.unwrap();

    assert_eq!(output.pages_merged, 5);
    // Fixture page i has width 612 + i; both sources restart at 612.
    assert_eq!(
        common::page_widths(&output.bytes),
        vec![612, 613, 612, 613, 614]
    );
}

#[tokio::test]
async fn test_pages_merged_matches_output_page_count() {
    let request = MergeRequest::new(vec![
        common::pdf_source("a.pdf", 4),
        common::pdf_source("b.pdf", 1),
    ]);
    let output = merge_sources(&request).await.unwrap();
    assert_eq!(output.pages_merged, common::page_count(&output.bytes));
}

#[tokio::test]
async fn test_unsupported_source_is_skipped_in_place() {
    let request = MergeRequest::new(vec![
        common::pdf_source("a.pdf", 1),
        SourceDocument::new("notes.txt", "text/plain", b"not mergeable".to_vec()),
        common::pdf_source("b.pdf", 2),
    ]);
    let output = merge_sources(&request).await.unwrap();

    // The text file contributes nothing; its neighbors keep their order.
    assert_eq!(output.pages_merged, 3);
    assert_eq!(common::page_widths(&output.bytes), vec![612, 612, 613]);
}

#[tokio::test]
async fn test_source_kind_from_extension_when_mime_is_generic() {
    // Browsers often upload with application/octet-stream; the extension
    // still identifies the source as a PDF.
    let request = MergeRequest::new(vec![SourceDocument::new(
        "report.PDF",
        "application/octet-stream",
        common::pdf_with_pages(2),
    )]);
    let output = merge_sources(&request).await.unwrap();
    assert_eq!(output.pages_merged, 2);
}
