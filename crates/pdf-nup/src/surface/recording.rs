//! A surface that records drawing calls instead of producing pixels

use super::{SheetSurface, Surface, TransformStack};
use crate::layout::Affine;
use crate::source::Raster;
use crate::types::{NupError, Result};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Scale(f32, f32),
    DrawImage {
        width: u32,
        height: u32,
        x: i32,
        y: i32,
        /// Transform in effect when the image was drawn
        transform: Affine,
    },
    AdvancePage,
}

/// Sheet surface that keeps a log of every call it receives.
///
/// Used by the `plan` command and by tests to inspect what layout code
/// would draw without rasterizing anything.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    ops: Vec<SurfaceOp>,
    transforms: TransformStack,
    pages: usize,
    fail_after_pages: Option<usize>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            transforms: TransformStack::new(),
            pages: 1,
            fail_after_pages: None,
        }
    }

    /// Make `advance_page` fail once `pages` sheets have been started
    pub fn failing_after(mut self, pages: usize) -> Self {
        self.fail_after_pages = Some(pages);
        self
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of sheets started so far
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Every recorded image draw, in order
    pub fn images(&self) -> impl Iterator<Item = &SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::DrawImage { .. }))
    }

    /// Current save depth; zero when every save has been restored
    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.ops.push(SurfaceOp::Restore);
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(SurfaceOp::Translate(dx, dy));
        self.transforms.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.ops.push(SurfaceOp::Rotate(degrees));
        self.transforms.rotate(degrees);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(SurfaceOp::Scale(sx, sy));
        self.transforms.scale(sx, sy);
    }

    fn draw_image(&mut self, raster: &Raster, x: i32, y: i32) -> Result<()> {
        self.ops.push(SurfaceOp::DrawImage {
            width: raster.width(),
            height: raster.height(),
            x,
            y,
            transform: self.transforms.current(),
        });
        Ok(())
    }
}

impl SheetSurface for RecordingSurface {
    fn advance_page(&mut self) -> Result<()> {
        if let Some(limit) = self.fail_after_pages {
            if self.pages >= limit {
                return Err(NupError::Surface(format!(
                    "Device refused sheet {}",
                    self.pages + 1
                )));
            }
        }
        self.ops.push(SurfaceOp::AdvancePage);
        self.transforms.reset();
        self.pages += 1;
        Ok(())
    }

    fn sheet_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
