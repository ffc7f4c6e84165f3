#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_nup::{PageSource, Raster};

/// Page source producing solid-color rasters from fixed page sizes.
///
/// Pages listed in `broken` fail to render, like a page the rasterizer
/// cannot decode.
pub struct SolidSource {
    pub sizes: Vec<(f32, f32)>,
    pub broken: Vec<usize>,
}

impl SolidSource {
    pub fn uniform(pages: usize, width_pt: f32, height_pt: f32) -> Self {
        Self {
            sizes: vec![(width_pt, height_pt); pages],
            broken: Vec::new(),
        }
    }

    pub fn letter(pages: usize) -> Self {
        Self::uniform(pages, 612.0, 792.0)
    }
}

impl PageSource for SolidSource {
    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn page_size(&self, index: usize) -> Option<(f32, f32)> {
        self.sizes.get(index).copied()
    }

    fn render(&self, index: usize, dpi: f32) -> Option<Raster> {
        if self.broken.contains(&index) {
            return None;
        }
        let (width, height) = self.raster_size(index, dpi)?;
        Some(Raster::from_pixel(width, height, image::Rgba([0, 0, 0, 255])))
    }
}

/// In-memory document whose pages have the given MediaBox sizes
pub fn create_test_document(sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &(width, height) in sizes {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}
