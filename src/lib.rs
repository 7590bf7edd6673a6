//! docfuse - merge PDF files and raster images into a single document.
//!
//! This library is the core of an upload-merge service: it receives an
//! ordered set of in-memory source documents, per-source transformation
//! options (page range, rotation, reverse) and an optional global page
//! budget, and produces one merged PDF plus its page count. It supports:
//!
//! - Page selection via lenient, human-written range expressions
//! - Per-source rotation and reverse ordering
//! - A global page budget that shrinks as sources are processed
//! - Raster images (PNG, JPEG, WebP) adapted into single pages with
//!   aspect-preserving, shrink-only scaling
//! - An optional WebP transcoder capability, decided once at startup
//!
//! The transport shell (HTTP routing, multipart parsing, headers) is an
//! external collaborator: it hands over `(name, mime type, bytes)` tuples
//! plus the raw options and limit fields, and receives bytes, a page count,
//! and a typed error with a coarse classification.
//!
//! # Examples
//!
//! ```no_run
//! use docfuse::config::MergeRequest;
//! use docfuse::merge::Merger;
//! use docfuse::source::SourceDocument;
//!
//! # async fn example(first: Vec<u8>, second: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let request = MergeRequest::new(vec![
//!     SourceDocument::new("report.pdf", "application/pdf", first),
//!     SourceDocument::new("scan.png", "image/png", second),
//! ])
//! .with_options(r#"[{"range": "1-3", "rotate": 90}]"#)
//! .with_limit("20");
//!
//! let output = Merger::new().merge(&request).await?;
//! println!("merged {} pages", output.pages_merged);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod source;
pub mod transcode;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{MergeRequest, PageBudget, PageRange, Rotation, SourceOptions};
pub use error::{ErrorClass, MergeError, Result};
pub use merge::{MergeOutput, Merger, merge_sources};
pub use source::{ImageFormat, SourceDocument, SourceKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
