//! Raster surface backed by a tiny-skia pixmap

use super::{Surface, TransformStack};
use crate::constants::MAX_CANVAS_PIXELS;
use crate::layout::Affine;
use crate::source::Raster;
use crate::types::{NupError, Result};
use tiny_skia::{Color, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

/// An in-memory canvas with a white background.
///
/// Used for on-screen composition and for the device-resolution sheet buffer
/// of a print job.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transforms: TransformStack,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
            return Err(NupError::Surface(format!(
                "A {}x{} canvas exceeds the {} pixel limit",
                width, height, MAX_CANVAS_PIXELS
            )));
        }
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            NupError::Surface(format!("Cannot allocate a {}x{} canvas", width, height))
        })?;
        pixmap.fill(Color::WHITE);
        Ok(Self {
            pixmap,
            transforms: TransformStack::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Consume the canvas and return its contents as straight-alpha RGBA
    pub fn into_raster(self) -> Result<Raster> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let color = pixel.demultiply();
            data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        Raster::from_raw(width, height, data)
            .ok_or_else(|| NupError::Surface("Canvas buffer size mismatch".to_string()))
    }
}

impl Surface for PixmapSurface {
    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transforms.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.transforms.rotate(degrees);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.scale(sx, sy);
    }

    fn draw_image(&mut self, raster: &Raster, x: i32, y: i32) -> Result<()> {
        // Empty rasters have nothing to draw
        let Some(source) = raster_to_pixmap(raster) else {
            return Ok(());
        };

        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            x,
            y,
            source.as_ref(),
            &paint,
            to_skia_transform(self.transforms.current()),
            None,
        );
        Ok(())
    }
}

fn to_skia_transform(affine: Affine) -> Transform {
    Transform::from_row(affine.a, affine.b, affine.c, affine.d, affine.e, affine.f)
}

/// Copy a straight-alpha raster into a premultiplied pixmap
fn raster_to_pixmap(raster: &Raster) -> Option<Pixmap> {
    let size = IntSize::from_wh(raster.width(), raster.height())?;
    let mut data = raster.as_raw().clone();
    for px in data.chunks_exact_mut(4) {
        let alpha = px[3] as u16;
        if alpha < 255 {
            px[0] = (px[0] as u16 * alpha / 255) as u8;
            px[1] = (px[1] as u16 * alpha / 255) as u8;
            px[2] = (px[2] as u16 * alpha / 255) as u8;
        }
    }
    Pixmap::from_vec(data, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn close_to(pixel: &Rgba<u8>, expected: [u8; 4]) -> bool {
        pixel
            .0
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (*a as i16 - *b as i16).abs() <= 3)
    }

    #[test]
    fn test_new_surface_is_white() {
        let surface = PixmapSurface::new(4, 3).unwrap();
        assert_eq!((surface.width(), surface.height()), (4, 3));
        let raster = surface.into_raster().unwrap();
        assert_eq!(raster.dimensions(), (4, 3));
        assert!(raster.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_zero_size_is_an_error() {
        assert!(matches!(PixmapSurface::new(0, 10), Err(NupError::Surface(_))));
    }

    #[test]
    fn test_oversized_canvas_is_an_error() {
        assert!(matches!(
            PixmapSurface::new(u32::MAX, u32::MAX),
            Err(NupError::Surface(_))
        ));
    }

    #[test]
    fn test_draw_image_untransformed() {
        let mut surface = PixmapSurface::new(10, 10).unwrap();
        let red = Raster::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        surface.draw_image(&red, 2, 3).unwrap();

        let out = surface.into_raster().unwrap();
        assert!(close_to(out.get_pixel(3, 4), [255, 0, 0, 255]));
        assert!(close_to(out.get_pixel(0, 0), [255, 255, 255, 255]));
        assert!(close_to(out.get_pixel(8, 8), [255, 255, 255, 255]));
    }

    #[test]
    fn test_draw_image_translated() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        surface.translate(10.0, 10.0);
        let blue = Raster::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        surface.draw_image(&blue, -2, -2).unwrap();

        let out = surface.into_raster().unwrap();
        assert!(close_to(out.get_pixel(10, 10), [0, 0, 255, 255]));
        assert!(close_to(out.get_pixel(2, 2), [255, 255, 255, 255]));
    }
}
