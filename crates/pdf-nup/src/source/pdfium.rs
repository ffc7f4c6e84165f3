//! Rasterizing page source backed by Pdfium

use crate::constants::POINTS_PER_INCH;
use crate::types::{NupError, Result};
use pdfium_render::prelude::*;
use std::path::Path;

use super::{PageSource, Raster};

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub fn init_pdfium() -> Result<Pdfium> {
    // Vendored copy lives under the workspace root when running from cargo
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| NupError::Pdfium(e.to_string()))
}

/// A document opened through Pdfium
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumSource<'a> {
    pub fn open(pdfium: &'a Pdfium, path: impl AsRef<Path>) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_file(path.as_ref(), None)
            .map_err(|e| NupError::Pdfium(e.to_string()))?;
        Ok(Self { document })
    }

    fn page(&self, index: usize) -> Option<PdfPage<'a>> {
        let index = u16::try_from(index).ok()?;
        self.document.pages().get(index).ok()
    }
}

impl PageSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size(&self, index: usize) -> Option<(f32, f32)> {
        let page = self.page(index)?;
        Some((page.width().value, page.height().value))
    }

    fn render(&self, index: usize, dpi: f32) -> Option<Raster> {
        let page = self.page(index)?;
        let config = PdfRenderConfig::new().scale_page_by_factor(dpi / POINTS_PER_INCH);

        let bitmap = match page.render_with_config(&config) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::warn!("Failed to render page {}: {}", index, e);
                return None;
            }
        };

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        Raster::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
    }
}
