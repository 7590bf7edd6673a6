//! In-memory PDF input and output.
//!
//! Sources arrive from the transport shell as byte buffers and the merged
//! document leaves as one; nothing in this crate touches the filesystem.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions};
