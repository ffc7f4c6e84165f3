//! Page sources
//!
//! A page source answers three questions about a loaded document: how many
//! pages it has, how large each page is in points, and what a page looks like
//! rasterized at a given resolution.

mod mediabox;
#[cfg(feature = "pdfium")]
mod pdfium;

pub use mediabox::{LopdfSource, page_dimensions};
#[cfg(feature = "pdfium")]
pub use pdfium::{PdfiumSource, init_pdfium};

use crate::constants::points_to_pixel_size;

/// An RGBA raster of a rendered page
pub type Raster = image::RgbaImage;

/// Read-only access to the pages of a document
pub trait PageSource {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Intrinsic page size in points, or `None` for an out-of-range index
    fn page_size(&self, index: usize) -> Option<(f32, f32)>;

    /// Rasterize a page at `dpi`. Returns `None` when the page cannot be
    /// rendered; callers treat that as "nothing to draw".
    fn render(&self, index: usize, dpi: f32) -> Option<Raster>;

    /// Size the raster of page `index` would have at `dpi`
    fn raster_size(&self, index: usize, dpi: f32) -> Option<(u32, u32)> {
        self.page_size(index)
            .map(|(width, height)| points_to_pixel_size(width, height, dpi))
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_size(&self, index: usize) -> Option<(f32, f32)> {
        (**self).page_size(index)
    }

    fn render(&self, index: usize, dpi: f32) -> Option<Raster> {
        (**self).render(index, dpi)
    }

    fn raster_size(&self, index: usize, dpi: f32) -> Option<(u32, u32)> {
        (**self).raster_size(index, dpi)
    }
}
