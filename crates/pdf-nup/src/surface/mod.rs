//! Destination surfaces
//!
//! A surface is a drawable canvas with a painter-style transform stack. Layout
//! code only ever talks to these traits, so the same geometry lands on the
//! screen buffer, a print preview, or the printer.

mod pdf;
mod pixmap;
mod recording;

pub use pdf::PdfSheetSurface;
pub use pixmap::PixmapSurface;
pub use recording::{RecordingSurface, SurfaceOp};

use crate::layout::Affine;
use crate::source::Raster;
use crate::types::Result;

/// A drawable canvas with an affine transform stack
pub trait Surface {
    /// Push the current transform
    fn save(&mut self);
    /// Pop the most recently saved transform
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Rotate clockwise by `degrees`
    fn rotate(&mut self, degrees: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    /// Draw `raster` with its top-left corner at `(x, y)` in the current transform
    fn draw_image(&mut self, raster: &Raster, x: i32, y: i32) -> Result<()>;
}

/// A surface made of discrete output sheets (print preview, printer)
pub trait SheetSurface: Surface {
    /// Finish the current sheet and start drawing on a new one
    fn advance_page(&mut self) -> Result<()>;
    /// Drawable area of one sheet, in device units
    fn sheet_size(&self) -> (f32, f32);
}

/// Painter-style transform state shared by the surface implementations
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(transform) => self.current = transform,
            None => log::warn!("restore without matching save"),
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current = self.current.pre_concat(&Affine::translate(dx, dy));
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.current = self.current.pre_concat(&Affine::rotate(degrees));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current = self.current.pre_concat(&Affine::scale(sx, sy));
    }

    /// Drop all saved state and return to identity
    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }
}
