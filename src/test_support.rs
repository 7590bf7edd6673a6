//! Shared in-memory fixtures for unit tests.

use lopdf::{Document, Object, dictionary};

use crate::source::SourceDocument;

/// Build a document with `pages` empty pages. Page `i` (zero-based) gets a
/// MediaBox width of `612 + i`, so page order stays observable after a
/// serialize/reload round trip.
pub fn test_pdf(pages: usize) -> Document {
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

    doc
}

/// Serialize a document to bytes.
pub fn pdf_bytes(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// A PDF source with `pages` pages.
pub fn pdf_source(name: &str, pages: usize) -> SourceDocument {
    SourceDocument::new(name, "application/pdf", pdf_bytes(test_pdf(pages)))
}

/// A solid-color PNG source of the given pixel size.
pub fn png_source(name: &str, width: u32, height: u32) -> SourceDocument {
    let mut rgb = image::RgbImage::new(width, height);
    for pixel in rgb.pixels_mut() {
        *pixel = image::Rgb([30, 90, 200]);
    }

    let mut bytes = std::io::Cursor::new(Vec::new());
    rgb.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    SourceDocument::new(name, "image/png", bytes.into_inner())
}

/// A solid-color JPEG source of the given pixel size.
pub fn jpeg_source(name: &str, width: u32, height: u32) -> SourceDocument {
    let mut rgb = image::RgbImage::new(width, height);
    for pixel in rgb.pixels_mut() {
        *pixel = image::Rgb([200, 90, 30]);
    }

    let mut bytes = std::io::Cursor::new(Vec::new());
    rgb.write_to(&mut bytes, image::ImageFormat::Jpeg).unwrap();
    SourceDocument::new(name, "image/jpeg", bytes.into_inner())
}
