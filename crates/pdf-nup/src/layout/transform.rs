//! Cell transform engine
//!
//! Places one source raster into one destination rectangle: translate to the
//! rectangle center, rotate, scale isotropically, then draw the raster
//! centered on the transformed origin. The order is fixed; every call site
//! (screen, preview, printer) goes through here so geometry matches.

use super::{CellKind, CellTransform, Rect};
use crate::constants::SINGLE_PAGE_MARGIN_FACTOR;
use crate::options::ViewState;
use crate::source::Raster;
use crate::surface::Surface;
use crate::types::Result;

/// Isotropic scale that fits an `image_size` raster into `dest`, times the
/// content zoom. Whole-page destinations keep a margin; grid cells do not.
pub fn scale_to_fit(
    dest: &Rect,
    image_size: (u32, u32),
    scale_factor: f32,
    kind: CellKind,
) -> f32 {
    let (image_width, image_height) = (image_size.0 as f32, image_size.1 as f32);
    let fit = f32::min(
        (dest.width / image_width) * scale_factor,
        (dest.height / image_height) * scale_factor,
    );
    match kind {
        CellKind::WholePage => fit * SINGLE_PAGE_MARGIN_FACTOR,
        CellKind::GridCell => fit,
    }
}

/// Compute the transform drawing an `image_size` raster into `dest`.
///
/// Returns `None` for an empty raster or a degenerate destination, which
/// callers treat as a blank cell.
pub fn cell_transform(
    dest: &Rect,
    image_size: (u32, u32),
    view: &ViewState,
    kind: CellKind,
) -> Option<CellTransform> {
    let (image_width, image_height) = image_size;
    if image_width == 0 || image_height == 0 || !(dest.width > 0.0 && dest.height > 0.0) {
        return None;
    }

    Some(CellTransform {
        center: (dest.center_x(), dest.center_y()),
        rotation_degrees: view.rotation.degrees() as f32,
        scale: scale_to_fit(dest, image_size, view.scale_factor, kind),
        // Integer halves: odd sizes sit half a source pixel off center
        image_offset: (-((image_width / 2) as i32), -((image_height / 2) as i32)),
        image_size,
    })
}

/// Draw `raster` onto `surface` with `transform`.
///
/// The surface's transform state is restored afterwards even when the draw
/// fails, so the caller's coordinate system is unchanged.
pub fn draw_cell<S: Surface + ?Sized>(
    surface: &mut S,
    raster: &Raster,
    transform: &CellTransform,
) -> Result<()> {
    surface.save();
    surface.translate(transform.center.0, transform.center.1);
    surface.rotate(transform.rotation_degrees);
    surface.scale(transform.scale, transform.scale);
    let drawn = surface.draw_image(raster, transform.image_offset.0, transform.image_offset.1);
    surface.restore();
    drawn
}
