//! Geometry-only page source backed by lopdf

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Document, Object, ObjectId};

use super::{PageSource, Raster};

/// Page sizes read from each page's MediaBox.
///
/// lopdf does not rasterize, so `render` always returns `None`. This source is
/// enough for layout plans and statistics; drawing needs a rasterizing source.
#[derive(Debug, Clone, Default)]
pub struct LopdfSource {
    page_sizes: Vec<(f32, f32)>,
}

impl LopdfSource {
    pub fn new(doc: &Document) -> Result<Self> {
        let page_sizes = doc
            .get_pages()
            .values()
            .map(|&id| page_dimensions(doc, id))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { page_sizes })
    }

    /// Source with explicit page sizes, in points
    pub fn from_sizes(page_sizes: Vec<(f32, f32)>) -> Self {
        Self { page_sizes }
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.page_sizes.len()
    }

    fn page_size(&self, index: usize) -> Option<(f32, f32)> {
        self.page_sizes.get(index).copied()
    }

    fn render(&self, _index: usize, _dpi: f32) -> Option<Raster> {
        None
    }
}

/// Width and height of a page from its MediaBox, falling back to US Letter
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_dict = doc.get_dictionary(page_id)?;

    let Some(media_box) = page_dict
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .ok()
    else {
        return Ok(DEFAULT_PAGE_DIMENSIONS);
    };

    let coords: Vec<f32> = media_box.iter().filter_map(extract_number).collect();
    match coords.as_slice() {
        [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
        _ => Ok(DEFAULT_PAGE_DIMENSIONS),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
