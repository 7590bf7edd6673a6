//! Loading source PDFs from memory.

use lopdf::Document;

use crate::error::{MergeError, Result};

/// A loaded source PDF with the metadata the merge needs.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The parsed document.
    pub document: Document,

    /// Upload name of the source.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: usize,
}

/// PDF reader for in-memory byte buffers.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to verify the document after loading.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with verification enabled.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips verification (faster but less safe).
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a source PDF from its uploaded bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a parseable PDF, or if
    /// verification finds the document encrypted or missing its catalog.
    /// Either condition aborts the whole merge job; a corrupt upload never
    /// degrades into a silent skip.
    pub fn load(&self, name: &str, bytes: &[u8]) -> Result<LoadedPdf> {
        let document = Document::load_mem(bytes)
            .map_err(|err| MergeError::failed_to_load_pdf(name, err.to_string()))?;

        if self.verify {
            if document.is_encrypted() {
                return Err(MergeError::EncryptedPdf {
                    name: name.to_string(),
                });
            }
            if document.trailer.get(b"Root").is_err() {
                return Err(MergeError::failed_to_load_pdf(
                    name,
                    "document has no catalog",
                ));
            }
        }

        let page_count = document.get_pages().len();

        Ok(LoadedPdf {
            document,
            name: name.to_string(),
            page_count,
        })
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
