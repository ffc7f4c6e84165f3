//! On-screen composition
//!
//! The screen shows one sheet at a time, chosen by a page cursor owned by the
//! host. The sheet is composed at 96 dpi, then resized by the display scale.

use crate::compose::{SheetRange, compose_sheet, compose_single_page};
use crate::constants::{FIT_TO_WINDOW_PADDING_PX, MAX_CANVAS_PIXELS};
use crate::layout::{Rect, output_page_pixels};
use crate::options::ViewState;
use crate::source::{PageSource, Raster};
use crate::surface::PixmapSurface;
use crate::types::{NupError, Result};
use image::imageops::{self, FilterType};

/// Size of the composed screen sheet before the display scale, in pixels
pub fn natural_display_size<P: PageSource + ?Sized>(
    source: &P,
    view: &ViewState,
    current_page: usize,
) -> (u32, u32) {
    output_page_pixels(view.page_size, view.orientation, source.page_size(current_page))
}

/// Display scale that fits a `natural` sized sheet into `viewport`, leaving padding.
///
/// Falls back to 1.0 when either size is degenerate.
pub fn fit_to_window_scale(natural: (u32, u32), viewport: (f32, f32)) -> f32 {
    let (natural_width, natural_height) = natural;
    if natural_width == 0 || natural_height == 0 {
        return 1.0;
    }
    let available_width = viewport.0 - FIT_TO_WINDOW_PADDING_PX;
    let available_height = viewport.1 - FIT_TO_WINDOW_PADDING_PX;
    let scale = f32::min(
        available_width / natural_width as f32,
        available_height / natural_height as f32,
    );
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Compose the sheet shown at `current_page`.
///
/// Returns `None` for an empty document, which clears the display. In
/// adaptive mode the sheet starts at `current_page` and holds up to
/// pages-per-sheet pages; otherwise the single page is drawn with a margin.
pub fn render_screen<P: PageSource + ?Sized>(
    source: &P,
    view: &ViewState,
    current_page: usize,
) -> Result<Option<Raster>> {
    let total_pages = source.page_count();
    if total_pages == 0 {
        return Ok(None);
    }
    view.validate()?;

    let (width, height) = natural_display_size(source, view, current_page);
    let mut surface = PixmapSurface::new(width, height)?;
    let target = Rect::from_size(width as f32, height as f32);

    if view.adaptive_mode {
        let range = SheetRange::starting_at(current_page, total_pages, view.pages_per_sheet);
        compose_sheet(&mut surface, source, view, &target, &range)?;
    } else {
        compose_single_page(&mut surface, source, view, &target, current_page)?;
    }

    let sheet = surface.into_raster()?;
    apply_display_scale(sheet, view.display_scale_factor).map(Some)
}

/// Resize the composed sheet by `factor`, keeping its aspect ratio.
///
/// Fails with `NupError::Config` when the result would exceed `MAX_CANVAS_PIXELS`.
fn apply_display_scale(sheet: Raster, factor: f32) -> Result<Raster> {
    if factor == 1.0 {
        return Ok(sheet);
    }
    let scaled_width = (sheet.width() as f64 * factor as f64).floor().max(1.0);
    let scaled_height = (sheet.height() as f64 * factor as f64).floor().max(1.0);
    if scaled_width * scaled_height > MAX_CANVAS_PIXELS as f64 {
        return Err(NupError::Config(format!(
            "Display scale {} would produce a {}x{} image",
            factor, scaled_width, scaled_height
        )));
    }
    let (width, height) = (scaled_width as u32, scaled_height as u32);
    log::debug!(
        "display scale {}: {}x{} -> {}x{}",
        factor,
        sheet.width(),
        sheet.height(),
        width,
        height
    );
    Ok(imageops::resize(&sheet, width, height, FilterType::Lanczos3))
}
