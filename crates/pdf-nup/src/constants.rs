//! Shared constants and unit conversion
//!
//! Page geometry arrives in points (1/72 inch). On-screen composition works in
//! pixels at a fixed reference resolution; print surfaces use their own device
//! resolution.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch (PDF native unit)
pub const POINTS_PER_INCH: f32 = 72.0;

/// Reference resolution for screen composition and source rasters
pub const SCREEN_DPI: f32 = 96.0;

/// Convert points to pixels at the given resolution
#[inline]
pub fn points_to_pixels(value_pt: f32, dpi: f32) -> f32 {
    value_pt * dpi / POINTS_PER_INCH
}

/// Convert pixels at the given resolution back to points
#[inline]
pub fn pixels_to_points(value_px: f32, dpi: f32) -> f32 {
    value_px * POINTS_PER_INCH / dpi
}

/// Whole-pixel size of a point-sized area, rounded to the nearest pixel
#[inline]
pub fn points_to_pixel_size(width_pt: f32, height_pt: f32, dpi: f32) -> (u32, u32) {
    (
        points_to_pixels(width_pt, dpi).round().max(0.0) as u32,
        points_to_pixels(height_pt, dpi).round().max(0.0) as u32,
    )
}

// =============================================================================
// Layout
// =============================================================================

/// Fraction of the page used by content in single-page mode
pub const SINGLE_PAGE_MARGIN_FACTOR: f32 = 0.9;

/// Padding subtracted from each viewport dimension before fitting to window
pub const FIT_TO_WINDOW_PADDING_PX: f32 = 40.0;

/// Default source page dimensions (US Letter) when a page has no MediaBox
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

/// Largest canvas, in pixels, that composition or display scaling will allocate
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

// =============================================================================
// Zoom
// =============================================================================

/// Zoom presets offered to the user, in percent
pub const ZOOM_PRESETS_PERCENT: [f32; 7] = [25.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0];

/// Smallest custom zoom accepted by the zoom entry, in percent
pub const MIN_CUSTOM_ZOOM_PERCENT: f32 = 0.1;

/// Largest custom zoom accepted by the zoom entry, in percent
pub const MAX_CUSTOM_ZOOM_PERCENT: f32 = 10000.0;
