//! Merge orchestration.
//!
//! The orchestrator walks the sources strictly in upload order, threading
//! the one mutable page budget through the job. PDF sources contribute
//! their selected page slice, image sources contribute exactly one page,
//! unsupported sources contribute nothing. Processing stops as soon as the
//! budget is exhausted; the remaining sources could only contribute empty
//! slices anyway.

use std::sync::Arc;

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::config::{MergeRequest, PageBudget, SourceOptions, resolve_options};
use crate::error::{MergeError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::merge::image::{self, ImageAdapter};
use crate::merge::pages::{copy_pages, rotate_page, select_pages};
use crate::source::{SourceDocument, SourceKind};
use crate::transcode::{ImageTranscoder, MissingTranscoder, WebpTranscoder};

/// Result of a completed merge job.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The merged document, serialized.
    pub bytes: Vec<u8>,

    /// Total number of pages in the merged document.
    pub pages_merged: usize,
}

/// Merger that combines PDF and image sources into one document.
pub struct Merger {
    /// Reader for loading PDF sources.
    reader: PdfReader,

    /// Adapter for raster image sources.
    adapter: ImageAdapter,

    /// Writer for serializing the output.
    writer: PdfWriter,
}

impl Merger {
    /// Create a merger with the full capability set, including the WebP
    /// transcoder.
    pub fn new() -> Self {
        Self::with_transcoder(Arc::new(WebpTranscoder))
    }

    /// Create a merger without the WebP transcoder capability. WebP sources
    /// will fail the job with `UnsupportedFormat`.
    pub fn without_transcoder() -> Self {
        Self::with_transcoder(Arc::new(MissingTranscoder))
    }

    /// Create a merger with an explicit transcoder capability. The choice
    /// is made once here, never re-probed per call.
    pub fn with_transcoder(transcoder: Arc<dyn ImageTranscoder>) -> Self {
        Self {
            reader: PdfReader::new(),
            adapter: ImageAdapter::new(transcoder),
            writer: PdfWriter::new(),
        }
    }

    /// Merge all sources of a request into a single document.
    ///
    /// Sources are handled strictly one at a time, in upload order; the
    /// budget remaining for each source depends on what its predecessors
    /// consumed. A job either fully succeeds or fully fails; there is no
    /// partial output.
    ///
    /// # Errors
    ///
    /// Returns an error if the request has no sources, if a PDF source
    /// cannot be loaded, if an image source cannot be decoded, or if a WebP
    /// source is present without the transcoder capability.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use docfuse::config::MergeRequest;
    /// # use docfuse::merge::Merger;
    /// # use docfuse::source::SourceDocument;
    /// # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
    /// let request = MergeRequest::new(vec![
    ///     SourceDocument::new("a.pdf", "application/pdf", a),
    ///     SourceDocument::new("photo.png", "image/png", b),
    /// ])
    /// .with_limit("10");
    ///
    /// let output = Merger::new().merge(&request).await?;
    /// println!("merged {} pages", output.pages_merged);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, request: &MergeRequest) -> Result<MergeOutput> {
        request.validate()?;

        let resolved = resolve_options(&request.sources, request.options.as_deref());
        let mut budget = PageBudget::parse(request.limit.as_deref());

        let mut output = Document::with_version("1.5");
        let mut page_ids: Vec<ObjectId> = Vec::new();

        for (source, options) in request.sources.iter().zip(&resolved) {
            if budget.is_exhausted() {
                log::debug!("page budget exhausted before '{}'", source.name);
                break;
            }

            match source.kind() {
                SourceKind::Pdf => {
                    let appended = self.append_pdf(&mut output, source, options, budget)?;
                    budget.consume(appended.len());
                    page_ids.extend(appended);
                }
                SourceKind::Image(format) => {
                    let adapted = self.adapter.adapt(source, format, options)?;
                    let page_id = image::build_page(&mut output, &adapted)?;
                    budget.consume(1);
                    page_ids.push(page_id);
                    log::debug!("source '{}' contributed 1 image page", source.name);
                }
                SourceKind::Unsupported => {
                    log::warn!(
                        "skipping unsupported source '{}' ({})",
                        source.name,
                        source.mime_type
                    );
                }
            }
        }

        let pages_merged = page_ids.len();
        assemble_output(&mut output, &page_ids)?;
        let bytes = self.writer.save_to_bytes(output).await?;

        log::debug!(
            "merged {pages_merged} page(s) from {} source(s)",
            request.sources.len()
        );

        Ok(MergeOutput {
            bytes,
            pages_merged,
        })
    }

    /// Append one PDF source's selected pages to the output. Returns the
    /// appended page ids in output order.
    fn append_pdf(
        &self,
        output: &mut Document,
        source: &SourceDocument,
        options: &SourceOptions,
        budget: PageBudget,
    ) -> Result<Vec<ObjectId>> {
        let loaded = self.reader.load(&source.name, &source.bytes)?;
        let selected = select_pages(loaded.page_count, options, budget);
        if selected.is_empty() {
            log::debug!("source '{}' contributed no pages", source.name);
            return Ok(Vec::new());
        }

        let page_ids = copy_pages(output, loaded.document, &selected)?;
        if let Some(rotation) = options.rotate {
            for &page_id in &page_ids {
                rotate_page(output, page_id, rotation)?;
            }
        }

        log::debug!(
            "source '{}' contributed {} of {} page(s)",
            source.name,
            page_ids.len(),
            loaded.page_count
        );
        Ok(page_ids)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the output page tree: a fresh Pages node over the appended pages,
/// a fresh Catalog, and a consistent numbering.
fn assemble_output(output: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = output.new_object_id();

    for &page_id in page_ids {
        let page = output
            .get_object_mut(page_id)
            .map_err(|err| MergeError::merge_failed(format!("missing output page: {err}")))?;
        if let Object::Dictionary(dict) = page {
            dict.set("Parent", pages_id);
        } else {
            return Err(MergeError::merge_failed("page object is not a dictionary"));
        }
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    output.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = output.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    output.trailer.set("Root", catalog_id);
    output.renumber_objects();

    Ok(())
}
