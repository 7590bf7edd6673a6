//! Optional image transcoder capability.
//!
//! WebP sources cannot be embedded directly; they must first be transcoded
//! to JPEG. Whether that capability exists is decided once, when the merger
//! is constructed, not re-probed per call: [`WebpTranscoder`] is the real
//! implementation, [`MissingTranscoder`] is the stand-in that fails every
//! request with the distinct `UnsupportedFormat` error.

use image::codecs::jpeg::JpegEncoder;

use crate::error::{MergeError, Result};
use crate::merge::image::JPEG_QUALITY;

/// Capability interface for transcoding WebP sources into JPEG.
pub trait ImageTranscoder: Send + Sync {
    /// Convert a WebP byte stream into JPEG bytes.
    ///
    /// `source_name` is only used for error reporting.
    fn webp_to_jpeg(&self, source_name: &str, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Whether the capability is actually present.
    fn is_available(&self) -> bool;
}

/// Real WebP transcoder backed by libwebp.
#[derive(Debug, Default)]
pub struct WebpTranscoder;

impl ImageTranscoder for WebpTranscoder {
    fn webp_to_jpeg(&self, source_name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        let decoded = webp::Decoder::new(bytes)
            .decode()
            .ok_or_else(|| MergeError::image_decode(source_name, "not a valid WebP stream"))?;
        let rgb = decoded.to_image().to_rgb8();

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
        encoder
            .encode_image(&rgb)
            .map_err(|err| MergeError::image_decode(source_name, err.to_string()))?;

        Ok(jpeg)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in for a build without WebP support.
#[derive(Debug, Default)]
pub struct MissingTranscoder;

impl ImageTranscoder for MissingTranscoder {
    fn webp_to_jpeg(&self, source_name: &str, _bytes: &[u8]) -> Result<Vec<u8>> {
        Err(MergeError::unsupported_format(source_name, "webp"))
    }

    fn is_available(&self) -> bool {
        false
    }
}
