//! Error types for docfuse.
//!
//! Recoverable conditions (malformed option payloads, malformed range
//! segments, sources of an unrecognized kind) never become errors; they are
//! handled locally where they occur. Everything in this module aborts the
//! whole merge job, so no partial output document ever leaves the crate.

use thiserror::Error;

/// Result type alias for docfuse operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Main error type for merge operations.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The request carried no source documents at all.
    #[error("no source documents provided")]
    NoSources,

    /// A source needs an optional capability (the image transcoder) that is
    /// not available in this build.
    #[error("source '{name}' is a {format} image, but no image transcoder is available")]
    UnsupportedFormat {
        /// Name of the offending source.
        name: String,
        /// Format that required the missing capability.
        format: String,
    },

    /// A source claiming to be a PDF could not be loaded.
    #[error("failed to load PDF '{name}': {reason}")]
    FailedToLoadPdf {
        /// Name of the source.
        name: String,
        /// Reason reported by the document model.
        reason: String,
    },

    /// A source PDF is encrypted and cannot be merged.
    #[error("PDF '{name}' is encrypted and cannot be merged")]
    EncryptedPdf {
        /// Name of the encrypted source.
        name: String,
    },

    /// A raster source could not be decoded.
    #[error("failed to decode image '{name}': {reason}")]
    ImageDecode {
        /// Name of the source.
        name: String,
        /// Decoder failure detail.
        reason: String,
    },

    /// The merge itself failed inside the document model.
    #[error("merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Serializing the assembled output document failed.
    #[error("failed to serialize output document: {reason}")]
    WriteFailed {
        /// Serializer failure detail.
        reason: String,
    },
}

/// Coarse classification of a failure, for the transport shell.
///
/// The shell maps these onto its own status vocabulary (HTTP status codes,
/// exit codes, and so on); the core never deals in transport concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was unusable (for example, no sources).
    InvalidRequest,
    /// An optional capability the request needs is not present.
    MissingCapability,
    /// An unexpected internal failure; detail belongs in logs, not in the
    /// response body.
    Internal,
}

impl MergeError {
    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            name: name.into(),
            format: format.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an ImageDecode error.
    pub fn image_decode(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageDecode {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a WriteFailed error.
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            reason: reason.into(),
        }
    }

    /// Classify this error for the transport shell.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NoSources => ErrorClass::InvalidRequest,
            Self::UnsupportedFormat { .. } => ErrorClass::MissingCapability,
            Self::FailedToLoadPdf { .. }
            | Self::EncryptedPdf { .. }
            | Self::ImageDecode { .. }
            | Self::MergeFailed { .. }
            | Self::WriteFailed { .. } => ErrorClass::Internal,
        }
    }
}

impl From<lopdf::Error> for MergeError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}
