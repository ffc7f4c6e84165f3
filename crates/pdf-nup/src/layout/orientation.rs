//! Output page orientation
//!
//! Forces the requested output size into the configured orientation before
//! any layout happens.

use crate::constants::{SCREEN_DPI, points_to_pixel_size};
use crate::types::{Orientation, PageSize};

/// Swap `width`/`height` so the pair matches `orientation`.
///
/// `_source_size` is the intrinsic size of the page being shown. It is accepted
/// so callers can pass it along, but the configured orientation always wins:
/// a landscape page on a portrait sheet is letterboxed by the fit step, not
/// turned.
pub fn normalize_orientation(
    width: f32,
    height: f32,
    _source_size: Option<(f32, f32)>,
    orientation: Orientation,
) -> (f32, f32) {
    match orientation {
        Orientation::Portrait if width > height => (height, width),
        Orientation::Landscape if width < height => (height, width),
        _ => (width, height),
    }
}

/// Output page size in points for `page_size`, normalized to `orientation`
pub fn output_page_points(
    page_size: PageSize,
    orientation: Orientation,
    source_size: Option<(f32, f32)>,
) -> (f32, f32) {
    let (width_pt, height_pt) = page_size.dimensions_pt();
    let (width_pt, height_pt) =
        normalize_orientation(width_pt, height_pt, source_size, orientation);
    log::debug!(
        "output page {} {:?}: {}x{} pt",
        page_size.name(),
        orientation,
        width_pt,
        height_pt
    );
    (width_pt, height_pt)
}

/// Output page size in whole screen pixels (96 dpi), normalized to `orientation`
pub fn output_page_pixels(
    page_size: PageSize,
    orientation: Orientation,
    source_size: Option<(f32, f32)>,
) -> (u32, u32) {
    let (width_pt, height_pt) = output_page_points(page_size, orientation, source_size);
    points_to_pixel_size(width_pt, height_pt, SCREEN_DPI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_swaps_portrait_input() {
        assert_eq!(
            normalize_orientation(600.0, 800.0, None, Orientation::Landscape),
            (800.0, 600.0)
        );
    }

    #[test]
    fn test_portrait_keeps_portrait_input() {
        assert_eq!(
            normalize_orientation(600.0, 800.0, None, Orientation::Portrait),
            (600.0, 800.0)
        );
        assert_eq!(
            normalize_orientation(800.0, 600.0, None, Orientation::Portrait),
            (600.0, 800.0)
        );
    }

    #[test]
    fn test_source_shape_is_ignored() {
        // A landscape source does not turn a portrait sheet
        let landscape_source = Some((842.0, 595.0));
        assert_eq!(
            normalize_orientation(595.0, 842.0, landscape_source, Orientation::Portrait),
            (595.0, 842.0)
        );
    }

    #[test]
    fn test_square_is_untouched() {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            assert_eq!(
                normalize_orientation(500.0, 500.0, None, orientation),
                (500.0, 500.0)
            );
        }
    }

    #[test]
    fn test_a4_screen_pixels() {
        assert_eq!(
            output_page_pixels(PageSize::A4, Orientation::Portrait, None),
            (793, 1123)
        );
        assert_eq!(
            output_page_pixels(PageSize::A4, Orientation::Landscape, None),
            (1123, 793)
        );
    }
}
