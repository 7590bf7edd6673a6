//! Raster image adaptation and page synthesis.
//!
//! Each image source becomes exactly one output page: the image is embedded
//! as a JPEG XObject, the page is sized to the (possibly downscaled) image
//! dimensions, and the content stream draws the image across the full page
//! extent at the origin. Scaling only ever shrinks; an image already inside
//! the bounds keeps its natural size.

use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::config::{Rotation, SourceOptions};
use crate::error::{MergeError, Result};
use crate::source::{ImageFormat, SourceDocument};
use crate::transcode::ImageTranscoder;

/// Maximum width of a synthesized image page, in points.
pub const MAX_PAGE_WIDTH: u32 = 2000;

/// Maximum height of a synthesized image page, in points.
pub const MAX_PAGE_HEIGHT: u32 = 2600;

/// Quality used whenever a raster has to be re-encoded to JPEG.
pub(crate) const JPEG_QUALITY: u8 = 90;

/// One page synthesized from a raster image source.
#[derive(Debug, Clone)]
pub struct AdaptedImagePage {
    /// Page width after bounded downscaling.
    pub width: u32,

    /// Page height after bounded downscaling.
    pub height: u32,

    /// Rotation to apply to the page, if any.
    pub rotation: Option<Rotation>,

    /// Natural pixel width of the embedded image.
    pixel_width: u32,

    /// Natural pixel height of the embedded image.
    pixel_height: u32,

    /// Whether the JPEG data is single-channel grayscale.
    gray: bool,

    /// Embeddable JPEG bytes.
    jpeg: Vec<u8>,
}

/// Adapter that turns a classified image source into an embeddable page.
pub struct ImageAdapter {
    transcoder: Arc<dyn ImageTranscoder>,
}

impl ImageAdapter {
    /// Create an adapter using the given transcoder capability.
    pub fn new(transcoder: Arc<dyn ImageTranscoder>) -> Self {
        Self { transcoder }
    }

    /// Adapt one image source.
    ///
    /// WebP goes through the transcoder first and is then handled exactly
    /// like native JPEG.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for WebP without a transcoder, or an
    /// `ImageDecode` error if the bytes cannot be decoded. Both abort the
    /// whole merge job.
    pub fn adapt(
        &self,
        source: &SourceDocument,
        format: ImageFormat,
        options: &SourceOptions,
    ) -> Result<AdaptedImagePage> {
        match format {
            ImageFormat::WebP => {
                let jpeg = self.transcoder.webp_to_jpeg(&source.name, &source.bytes)?;
                self.adapt_jpeg(&source.name, &jpeg, options)
            }
            ImageFormat::Jpeg => self.adapt_jpeg(&source.name, &source.bytes, options),
            ImageFormat::Png => self.adapt_png(&source.name, &source.bytes, options),
        }
    }

    /// JPEG bytes are embeddable as-is; only the dimensions and color model
    /// need to be read.
    fn adapt_jpeg(
        &self,
        name: &str,
        bytes: &[u8],
        options: &SourceOptions,
    ) -> Result<AdaptedImagePage> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| MergeError::image_decode(name, err.to_string()))?;

        let gray = matches!(
            decoded.color(),
            image::ColorType::L8 | image::ColorType::L16
        );

        Ok(build_adapted(
            decoded.width(),
            decoded.height(),
            gray,
            bytes.to_vec(),
            options,
        ))
    }

    /// PNG has no directly embeddable stream encoding here, so it is
    /// decoded and re-encoded as JPEG.
    fn adapt_png(
        &self,
        name: &str,
        bytes: &[u8],
        options: &SourceOptions,
    ) -> Result<AdaptedImagePage> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| MergeError::image_decode(name, err.to_string()))?;
        let rgb = decoded.to_rgb8();

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
        encoder
            .encode_image(&rgb)
            .map_err(|err| MergeError::image_decode(name, err.to_string()))?;

        Ok(build_adapted(
            rgb.width(),
            rgb.height(),
            false,
            jpeg,
            options,
        ))
    }
}

fn build_adapted(
    pixel_width: u32,
    pixel_height: u32,
    gray: bool,
    jpeg: Vec<u8>,
    options: &SourceOptions,
) -> AdaptedImagePage {
    let (width, height) = fit_within(pixel_width, pixel_height, MAX_PAGE_WIDTH, MAX_PAGE_HEIGHT);

    AdaptedImagePage {
        width,
        height,
        rotation: options.rotate,
        pixel_width,
        pixel_height,
        gray,
        jpeg,
    }
}

/// Aspect-preserving downscale into the given bounds. Never enlarges.
fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let scale = 1.0_f64
        .min(f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));

    (
        (f64::from(width) * scale).floor() as u32,
        (f64::from(height) * scale).floor() as u32,
    )
}

/// Build the output page for an adapted image: image XObject, content
/// stream drawing it over the full page extent, and the page dictionary.
/// Returns the page's object id; the caller wires up the parent.
pub fn build_page(output: &mut Document, adapted: &AdaptedImagePage) -> Result<ObjectId> {
    let color_space = if adapted.gray { "DeviceGray" } else { "DeviceRGB" };

    let xobject = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => adapted.pixel_width as i64,
            "Height" => adapted.pixel_height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        adapted.jpeg.clone(),
    );
    let xobject_id = output.add_object(xobject);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (adapted.width as i64).into(),
                    0.into(),
                    0.into(),
                    (adapted.height as i64).into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|err| MergeError::merge_failed(format!("failed to encode page content: {err}")))?;
    let content_id = output.add_object(Stream::new(dictionary! {}, encoded));

    let mut page = dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![
            0.into(),
            0.into(),
            (adapted.width as i64).into(),
            (adapted.height as i64).into(),
        ],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => xobject_id },
        },
        "Contents" => content_id,
    };
    if let Some(rotation) = adapted.rotation {
        page.set("Rotate", rotation.as_degrees());
    }

    Ok(output.add_object(page))
}
