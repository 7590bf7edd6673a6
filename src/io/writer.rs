//! Serializing the merged document to bytes.

use lopdf::Document;
use tokio::task;

use crate::error::{MergeError, Result};

/// Options for serializing the output document.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compress content streams before serializing.
    pub compress: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// Writer that turns the assembled document into a byte buffer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer without compression (faster but larger output).
    pub fn without_compression() -> Self {
        Self {
            options: WriteOptions { compress: false },
        }
    }

    /// Serialize the document to bytes.
    ///
    /// Compression and serialization are CPU-bound, so they run on a
    /// blocking thread; the document is moved in and the bytes move out.
    ///
    /// # Errors
    ///
    /// Returns an error if the document model fails to serialize.
    pub async fn save_to_bytes(&self, mut document: Document) -> Result<Vec<u8>> {
        let compress = self.options.compress;

        task::spawn_blocking(move || {
            if compress {
                document.compress();
            }
            let mut bytes = Vec::new();
            document
                .save_to(&mut bytes)
                .map_err(|err| MergeError::write_failed(err.to_string()))?;
            Ok(bytes)
        })
        .await
        .map_err(|err| MergeError::write_failed(err.to_string()))?
    }
}
