//! Request configuration for a merge job.
//!
//! This module turns the raw inputs handed over by the transport shell into
//! normalized, validated values that drive the merge:
//! - lenient page-range expressions (`PageRange`)
//! - per-source transformation options (`SourceOptions`, [`resolve_options`])
//! - the global page budget (`PageBudget`)
//!
//! Leniency is deliberate: a malformed options payload, a malformed options
//! entry, or a malformed range segment degrades to defaults instead of
//! failing the job.

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::{MergeError, Result};
use crate::source::SourceDocument;

/// Page rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees.
    ///
    /// Only 90, 180 and 270 are rotations; every other value (including 0,
    /// the default) means "leave pages as they are". Options resolution is
    /// lenient, so there is no error case here.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees {
            90 => Some(Self::Clockwise90),
            180 => Some(Self::Rotate180),
            270 => Some(Self::Clockwise270),
            _ => None,
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> i64 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

/// Page range specification for selection.
///
/// Supports 1-based individual pages and ranges with optional endpoints:
/// - `"3"` - single page
/// - `"1-5"` - inclusive range
/// - `"-3"` - from the first page through page 3
/// - `"9-"` - from page 9 through the last page
/// - `"1-3,6,9-"` - any comma-separated combination
///
/// Parsing never fails; segments that match neither pattern are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Single(u32),
    Span {
        start: Option<u32>,
        end: Option<u32>,
    },
}

impl PageRange {
    /// Parse a page range expression, skipping malformed segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use docfuse::config::PageRange;
    ///
    /// let range = PageRange::parse("1-3,6,9-");
    /// assert_eq!(range.to_pages(10), vec![0, 1, 2, 5, 8, 9]);
    ///
    /// // Malformed segments are not errors; they contribute nothing.
    /// assert_eq!(PageRange::parse("x,,3").to_pages(10), vec![2]);
    /// ```
    pub fn parse(expr: &str) -> Self {
        let mut segments = Vec::new();

        for part in expr.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Ok(page) = part.parse::<u32>() {
                segments.push(Segment::Single(page));
                continue;
            }

            if let Some((start, end)) = part.split_once('-')
                && let Ok(start) = parse_endpoint(start)
                && let Ok(end) = parse_endpoint(end)
            {
                segments.push(Segment::Span { start, end });
            }
            // Anything else matches neither pattern and is silently skipped.
        }

        Self { segments }
    }

    /// Whether no segment survived parsing.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve the range against a concrete page count.
    ///
    /// Returns zero-based indices, deduplicated and ascending, each clamped
    /// into `[0, page_count - 1]`. Spans whose start exceeds their end after
    /// clamping contribute nothing.
    pub fn to_pages(&self, page_count: usize) -> Vec<usize> {
        if page_count == 0 {
            return Vec::new();
        }
        let last = page_count - 1;
        let clamp = |page: u32| (page as usize).saturating_sub(1).min(last);

        let mut pages = BTreeSet::new();
        for segment in &self.segments {
            match *segment {
                Segment::Single(page) => {
                    pages.insert(clamp(page));
                }
                Segment::Span { start, end } => {
                    let start = start.map_or(0, clamp);
                    let end = end.map_or(last, clamp);
                    if start <= end {
                        pages.extend(start..=end);
                    }
                }
            }
        }

        pages.into_iter().collect()
    }
}

fn parse_endpoint(raw: &str) -> std::result::Result<Option<u32>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>().map(Some).map_err(|_| ())
}

/// Resolved transformation options for one source.
///
/// Absent fields take defaults; options are never inferred from neighboring
/// sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOptions {
    /// Page range expression, or `None` for all pages in natural order.
    pub range: Option<String>,

    /// Rotation to apply to this source's pages, or `None` for no rotation.
    pub rotate: Option<Rotation>,

    /// Reverse the selected page order.
    pub reverse: bool,
}

/// One entry of the raw options payload, exactly as uploaded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawOptionsEntry {
    name: Option<String>,
    range: Option<String>,
    rotate: Option<i64>,
    reverse: Option<bool>,
}

impl RawOptionsEntry {
    fn resolve(&self) -> SourceOptions {
        SourceOptions {
            // A blank range expression means "all pages", same as absent.
            range: self
                .range
                .as_deref()
                .map(str::trim)
                .filter(|range| !range.is_empty())
                .map(String::from),
            rotate: self.rotate.and_then(Rotation::from_degrees),
            reverse: self.reverse.unwrap_or(false),
        }
    }
}

/// Resolve per-source options from the raw JSON payload.
///
/// Resolution order per source: the entry at the same position, then the
/// first entry whose `name` matches the source's name, then defaults. A
/// payload that fails to parse as a JSON array is treated as absent, and a
/// malformed entry degrades to defaults for that source.
pub fn resolve_options(sources: &[SourceDocument], raw: Option<&str>) -> Vec<SourceOptions> {
    let entries = parse_raw_options(raw);

    sources
        .iter()
        .enumerate()
        .map(|(position, source)| {
            entries
                .get(position)
                .or_else(|| {
                    entries
                        .iter()
                        .find(|entry| entry.name.as_deref() == Some(source.name.as_str()))
                })
                .map(RawOptionsEntry::resolve)
                .unwrap_or_default()
        })
        .collect()
}

fn parse_raw_options(raw: Option<&str>) -> Vec<RawOptionsEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(raw) else {
        return Vec::new();
    };

    values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect()
}

/// The global page budget for one merge job.
///
/// Represented as a tagged value rather than a sentinel integer, so that
/// decrementing an unbounded budget is not arithmetic at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBudget {
    /// No limit on the output page count.
    Unbounded,
    /// At most this many more pages may be appended.
    Remaining(usize),
}

impl PageBudget {
    /// Parse the optional limit field. Absent, non-numeric, or non-positive
    /// values all mean unbounded.
    pub fn parse(limit: Option<&str>) -> Self {
        match limit.and_then(|raw| raw.trim().parse::<i64>().ok()) {
            Some(limit) if limit > 0 => Self::Remaining(limit as usize),
            _ => Self::Unbounded,
        }
    }

    /// Whether no further pages may be appended.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Remaining(0))
    }

    /// How many of `want` pages fit in the remaining budget.
    pub fn cap(&self, want: usize) -> usize {
        match self {
            Self::Unbounded => want,
            Self::Remaining(remaining) => want.min(*remaining),
        }
    }

    /// Record that `pages` pages were appended.
    pub fn consume(&mut self, pages: usize) {
        if let Self::Remaining(remaining) = self {
            *remaining = remaining.saturating_sub(pages);
        }
    }
}

/// Complete input for one merge job, as decoded by the transport shell.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Source documents, in upload order.
    pub sources: Vec<SourceDocument>,

    /// Raw per-source options payload (a JSON array), if any.
    pub options: Option<String>,

    /// Raw page limit field, if any.
    pub limit: Option<String>,
}

impl MergeRequest {
    /// Create a request with no options and no limit.
    pub fn new(sources: Vec<SourceDocument>) -> Self {
        Self {
            sources,
            options: None,
            limit: None,
        }
    }

    /// Attach a raw options payload.
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Attach a raw page limit.
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Validate the request before any processing.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(MergeError::NoSources);
        }
        Ok(())
    }
}
