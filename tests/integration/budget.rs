use crate::common;

use docfuse::config::MergeRequest;
use docfuse::merge::merge_sources;

#[tokio::test]
async fn test_limit_truncates_the_last_contributing_source() {
    let request = MergeRequest::new(vec![
        common::pdf_source("a.pdf", 3),
        common::pdf_source("b.pdf", 3),
    ])
    .with_limit("4");
    let output = merge_sources(&request).await.unwrap();

    // The first source fits whole; the second only gets the remainder.
    assert_eq!(output.pages_merged, 4);
    assert_eq!(common::page_widths(&output.bytes), vec![612, 613, 614, 612]);
}

#[tokio::test]
async fn test_exhausted_budget_skips_remaining_sources() {
    let request = MergeRequest::new(vec![
        common::pdf_source("a.pdf", 2),
        common::pdf_source("b.pdf", 2),
        common::pdf_source("c.pdf", 2),
    ])
    .with_limit("2");
    let output = merge_sources(&request).await.unwrap();

    assert_eq!(output.pages_merged, 2);
    assert_eq!(common::page_widths(&output.bytes), vec![612, 613]);
}

#[tokio::test]
async fn test_image_pages_count_against_the_budget() {
    let request = MergeRequest::new(vec![
        common::png_source("one.png", 10, 10),
        common::png_source("two.png", 10, 10),
        common::pdf_source("tail.pdf", 3),
    ])
    .with_limit("3");
    let output = merge_sources(&request).await.unwrap();

    // Two image pages leave room for one PDF page.
    assert_eq!(output.pages_merged, 3);
}

#[tokio::test]
async fn test_zero_limit_means_unbounded() {
    let request = MergeRequest::new(vec![common::pdf_source("a.pdf", 4)]).with_limit("0");
    assert_eq!(merge_sources(&request).await.unwrap().pages_merged, 4);
}

#[tokio::test]
async fn test_negative_limit_means_unbounded() {
    let request = MergeRequest::new(vec![common::pdf_source("a.pdf", 4)]).with_limit("-7");
    assert_eq!(merge_sources(&request).await.unwrap().pages_merged, 4);
}

#[tokio::test]
async fn test_non_numeric_limit_means_unbounded() {
    let request = MergeRequest::new(vec![common::pdf_source("a.pdf", 4)]).with_limit("lots");
    assert_eq!(merge_sources(&request).await.unwrap().pages_merged, 4);
}

#[tokio::test]
async fn test_limit_larger_than_total_changes_nothing() {
    let request = MergeRequest::new(vec![
        common::pdf_source("a.pdf", 2),
        common::pdf_source("b.pdf", 2),
    ])
    .with_limit("100");
    assert_eq!(merge_sources(&request).await.unwrap().pages_merged, 4);
}

#[tokio::test]
async fn test_limit_applies_after_range_selection() {
    // The range narrows the source to 3 pages, then the budget keeps 2.
    let request = MergeRequest::new(vec![common::pdf_source("a.pdf", 6)])
        .with_options(r#"[{"range": "2-4"}]"#)
        .with_limit("2");
    let output = merge_sources(&request).await.unwrap();

    assert_eq!(output.pages_merged, 2);
    assert_eq!(common::page_widths(&output.bytes), vec![613, 614]);
}
