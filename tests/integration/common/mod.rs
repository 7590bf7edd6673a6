//! Integration tests for docfuse.
//!
//! These tests exercise the full merge flow with sources built entirely in
//! memory: PDFs assembled with lopdf and rasters encoded with the image
//! crate. No filesystem fixtures are involved.

use lopdf::{Document, Object, dictionary};

use docfuse::source::SourceDocument;

/// Build a PDF with `pages` empty pages and serialize it. Page `i`
/// (zero-based) gets a MediaBox width of `612 + i`, so page identity and
/// order survive a merge round trip.
pub fn pdf_with_pages(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..pages {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (612 + i as i64).into(),
                792.into(),
            ],
        };
        page_ids.push(doc.add_object(page));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<Object>>(),
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// A PDF source with the given number of pages.
pub fn pdf_source(name: &str, pages: usize) -> SourceDocument {
    SourceDocument::new(name, "application/pdf", pdf_with_pages(pages))
}

/// A solid-color PNG source of the given pixel size.
pub fn png_source(name: &str, width: u32, height: u32) -> SourceDocument {
    let mut rgb = image::RgbImage::new(width, height);
    for pixel in rgb.pixels_mut() {
        *pixel = image::Rgb([40, 120, 220]);
    }

    let mut bytes = std::io::Cursor::new(Vec::new());
    rgb.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    SourceDocument::new(name, "image/png", bytes.into_inner())
}

/// A solid-color JPEG source of the given pixel size.
pub fn jpeg_source(name: &str, width: u32, height: u32) -> SourceDocument {
    let mut rgb = image::RgbImage::new(width, height);
    for pixel in rgb.pixels_mut() {
        *pixel = image::Rgb([220, 120, 40]);
    }

    let mut bytes = std::io::Cursor::new(Vec::new());
    rgb.write_to(&mut bytes, image::ImageFormat::Jpeg).unwrap();
    SourceDocument::new(name, "image/jpeg", bytes.into_inner())
}

/// A real WebP source of the given pixel size.
pub fn webp_source(name: &str, width: u32, height: u32) -> SourceDocument {
    let mut rgb = image::RgbImage::new(width, height);
    for pixel in rgb.pixels_mut() {
        *pixel = image::Rgb([120, 220, 40]);
    }

    let bytes = webp::Encoder::from_rgb(rgb.as_raw(), width, height)
        .encode_lossless()
        .to_vec();
    SourceDocument::new(name, "image/webp", bytes)
}

/// Reload merged output bytes and return each page's MediaBox width, in
/// page order. For PDF fixture pages this recovers the original zero-based
/// page index as `width - 612`.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// Number of pages in merged output bytes.
pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes).unwrap().get_pages().len()
}
