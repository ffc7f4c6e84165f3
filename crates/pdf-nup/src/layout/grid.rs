//! Grid layout resolution
//!
//! Maps a pages-per-sheet count to a fixed grid shape and computes the cell
//! rectangles that divide a destination area.

use super::{GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Table
// =============================================================================

/// Supported pages-per-sheet counts and their grids.
///
/// The shapes are fixed rather than derived from the count: 6-up is always
/// two rows of three.
const GRID_TABLE: [(usize, GridLayout); 7] = [
    (1, grid(1, 1, "single")),
    (2, grid(1, 2, "two_horizontal")),
    (3, grid(2, 2, "three_grid")),
    (4, grid(2, 2, "four_grid")),
    (6, grid(2, 3, "six_grid")),
    (9, grid(3, 3, "nine_grid")),
    (16, grid(4, 4, "sixteen_grid")),
];

const fn grid(rows: usize, cols: usize, name: &'static str) -> GridLayout {
    GridLayout { rows, cols, name }
}

/// Pages-per-sheet values that have their own grid
pub const SUPPORTED_PAGES_PER_SHEET: [usize; 7] = [1, 2, 3, 4, 6, 9, 16];

/// Resolve the grid for a pages-per-sheet count.
///
/// Counts without a table entry fall back to the single 1x1 grid.
pub fn resolve_grid(pages_per_sheet: usize) -> GridLayout {
    GRID_TABLE
        .iter()
        .find(|(count, _)| *count == pages_per_sheet)
        .map(|(_, layout)| *layout)
        .unwrap_or(GRID_TABLE[0].1)
}

/// Whether `pages_per_sheet` has its own grid entry
pub fn is_supported_pages_per_sheet(pages_per_sheet: usize) -> bool {
    SUPPORTED_PAGES_PER_SHEET.contains(&pages_per_sheet)
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Size of every cell when `grid` divides a `target_width` x `target_height` area.
///
/// Cells may have fractional sizes; rounding happens when pixels are drawn.
pub fn cell_dimensions(grid: &GridLayout, target_width: f32, target_height: f32) -> (f32, f32) {
    (
        target_width / grid.cols as f32,
        target_height / grid.rows as f32,
    )
}

/// Bounds of the cell at `pos`, relative to the destination's top-left corner
pub fn cell_bounds(
    grid: &GridLayout,
    pos: GridPosition,
    target_width: f32,
    target_height: f32,
) -> Rect {
    let (cell_width, cell_height) = cell_dimensions(grid, target_width, target_height);
    Rect::new(
        pos.col as f32 * cell_width,
        pos.row as f32 * cell_height,
        cell_width,
        cell_height,
    )
}

/// All cell positions of a grid, row-major, left to right
pub fn cell_positions(grid: &GridLayout) -> impl Iterator<Item = GridPosition> + '_ {
    (0..grid.cell_count()).map(|i| GridPosition::from_index(i, grid.cols))
}

// =============================================================================
// Tests
// =============================================================================
