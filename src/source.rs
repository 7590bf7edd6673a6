//! Source document classification.
//!
//! Every uploaded file is classified exactly once, at construction, into a
//! closed set of kinds. Classification is a deterministic two-signal check:
//! the declared mime type wins, the filename extension is the fallback.
//! Anything else is `Unsupported` and is skipped by the orchestrator with no
//! effect on the page budget.

/// Raster formats the merge engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG/JFIF.
    Jpeg,
    /// WebP; requires the optional image transcoder capability.
    WebP,
}

impl ImageFormat {
    /// Lowercase format name, as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
        }
    }
}

/// The kind of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A PDF document; pages are copied through, subject to selection.
    Pdf,
    /// A raster image; adapted into exactly one page.
    Image(ImageFormat),
    /// Neither a recognized PDF nor a recognized image; skipped.
    Unsupported,
}

/// One uploaded file to be merged.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Original upload name.
    pub name: String,

    /// Declared mime type, as received from the shell.
    pub mime_type: String,

    /// Raw file content.
    pub bytes: Vec<u8>,

    kind: SourceKind,
}

impl SourceDocument {
    /// Create and classify a source document.
    ///
    /// # Examples
    ///
    /// ```
    /// use docfuse::source::{SourceDocument, SourceKind};
    ///
    /// let source = SourceDocument::new("report.pdf", "application/pdf", vec![]);
    /// assert_eq!(source.kind(), SourceKind::Pdf);
    /// ```
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_type.into();
        let kind = classify(&mime_type, &name);

        Self {
            name,
            mime_type,
            bytes,
            kind,
        }
    }

    /// The kind this source was classified as. Immutable after construction.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

/// Classify a source from its mime type, falling back to the filename
/// extension.
fn classify(mime_type: &str, name: &str) -> SourceKind {
    classify_mime(mime_type)
        .or_else(|| classify_extension(name))
        .unwrap_or(SourceKind::Unsupported)
}

fn classify_mime(mime_type: &str) -> Option<SourceKind> {
    // Parameters like "; charset=binary" are not part of the media type.
    let media_type = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        "application/pdf" => Some(SourceKind::Pdf),
        "image/png" => Some(SourceKind::Image(ImageFormat::Png)),
        "image/jpeg" | "image/jpg" => Some(SourceKind::Image(ImageFormat::Jpeg)),
        "image/webp" => Some(SourceKind::Image(ImageFormat::WebP)),
        _ => None,
    }
}

fn classify_extension(name: &str) -> Option<SourceKind> {
    let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();

    match extension.as_str() {
        "pdf" => Some(SourceKind::Pdf),
        "png" => Some(SourceKind::Image(ImageFormat::Png)),
        "jpg" | "jpeg" => Some(SourceKind::Image(ImageFormat::Jpeg)),
        "webp" => Some(SourceKind::Image(ImageFormat::WebP)),
        _ => None,
    }
}
