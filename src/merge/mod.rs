//! Merge orchestration and page-level operations.
//!
//! This module contains the core of the crate:
//! - page selection under a shrinking budget ([`pages`])
//! - raster image adaptation ([`image`])
//! - the orchestrator that walks the sources in upload order ([`merger`])

pub mod image;
pub mod merger;
pub mod pages;

pub use image::{AdaptedImagePage, ImageAdapter, MAX_PAGE_HEIGHT, MAX_PAGE_WIDTH};
pub use merger::{MergeOutput, Merger};
pub use pages::select_pages;

use crate::config::MergeRequest;
use crate::error::Result;

/// Merge a request with the default merger.
///
/// Convenience wrapper over [`Merger::new`] for callers that do not need
/// to configure the transcoder capability.
pub async fn merge_sources(request: &MergeRequest) -> Result<MergeOutput> {
    Merger::new().merge(request).await
}
