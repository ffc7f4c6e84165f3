//! Layout data types
//!
//! All coordinates use a top-left origin with y growing downward, in the
//! units of whichever surface is being composed (screen pixels at 96 dpi, or
//! printer device pixels).

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of the `index`-th cell when cells are enumerated row-major
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }
}

/// Grid shape used for one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridLayout {
    /// Number of rows in the page grid
    pub rows: usize,
    /// Number of columns in the page grid
    pub cols: usize,
    /// Name of the table entry this grid came from
    pub name: &'static str,
}

impl GridLayout {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// A rectangular area
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether `other` lies inside this rectangle, allowing `tolerance` slack on each edge
    pub fn contains_rect(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }
}

/// 2-D affine matrix mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
///
/// Same layout as a PDF `cm` operand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees`, clockwise on a y-down surface.
    ///
    /// Quarter turns use exact sines so that composing them never drifts.
    pub fn rotate(degrees: f32) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let (sin, cos) = if normalized == 0.0 {
            (0.0, 1.0)
        } else if normalized == 90.0 {
            (1.0, 0.0)
        } else if normalized == 180.0 {
            (0.0, -1.0)
        } else if normalized == 270.0 {
            (-1.0, 0.0)
        } else {
            normalized.to_radians().sin_cos()
        };
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self * other`: `other` is applied to points first, then `self`.
    ///
    /// This is how painter-style `translate`/`rotate`/`scale` calls accumulate.
    pub fn pre_concat(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Axis-aligned bounds of `rect` after mapping its four corners
    pub fn map_rect_bounds(&self, rect: &Rect) -> Rect {
        let corners = [
            self.map_point(rect.x, rect.y),
            self.map_point(rect.right(), rect.y),
            self.map_point(rect.x, rect.bottom()),
            self.map_point(rect.right(), rect.bottom()),
        ];
        let (mut min_x, mut min_y) = corners[0];
        let (mut max_x, mut max_y) = corners[0];
        for &(x, y) in &corners[1..] {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn approx_eq(&self, other: &Affine, tolerance: f32) -> bool {
        (self.a - other.a).abs() <= tolerance
            && (self.b - other.b).abs() <= tolerance
            && (self.c - other.c).abs() <= tolerance
            && (self.d - other.d).abs() <= tolerance
            && (self.e - other.e).abs() <= tolerance
            && (self.f - other.f).abs() <= tolerance
    }
}

/// Whether a cell transform keeps a visible border around the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CellKind {
    /// Whole sheet holding one page; content shrinks by the single-page margin factor
    WholePage,
    /// One slot of an N-up grid; content is fitted edge to edge
    GridCell,
}

/// Everything needed to draw one source raster into one destination rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellTransform {
    /// Destination rectangle center; the drawing origin moves here first
    pub center: (f32, f32),
    /// Clockwise rotation in degrees about the center
    pub rotation_degrees: f32,
    /// Isotropic content scale (fit x zoom, times margin factor for whole pages)
    pub scale: f32,
    /// Top-left of the raster relative to the transformed origin
    pub image_offset: (i32, i32),
    /// Raster size in pixels
    pub image_size: (u32, u32),
}

impl CellTransform {
    /// The composed matrix: translate to center, rotate, scale
    pub fn matrix(&self) -> Affine {
        Affine::translate(self.center.0, self.center.1)
            .pre_concat(&Affine::rotate(self.rotation_degrees))
            .pre_concat(&Affine::scale(self.scale, self.scale))
    }

    /// Where the raster ends up on the destination, as axis-aligned bounds
    pub fn content_bounds(&self) -> Rect {
        let image = Rect::new(
            self.image_offset.0 as f32,
            self.image_offset.1 as f32,
            self.image_size.0 as f32,
            self.image_size.1 as f32,
        );
        self.matrix().map_rect_bounds(&image)
    }
}

/// Planned content of one grid slot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellPlan {
    /// Position in the grid
    pub grid_pos: GridPosition,
    /// Cell rectangle on the destination
    pub bounds: Rect,
    /// Source page drawn into this cell (None = blank cell)
    pub source_page: Option<usize>,
    /// Transform for the source page, when the cell is filled
    pub transform: Option<CellTransform>,
}

/// Planned layout for one output sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetPlan {
    /// Zero-based sheet index within the document
    pub sheet_index: usize,
    /// Grid used for this sheet
    pub grid: GridLayout,
    /// Destination area the grid divides
    pub target: Rect,
    /// One entry per visited cell, row-major
    pub cells: Vec<CellPlan>,
}

impl SheetPlan {
    /// Number of cells that receive a source page
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.source_page.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center_x(), 60.0);
        assert_eq!(rect.center_y(), 45.0);
    }

    #[test]
    fn test_quarter_turns_are_exact() {
        let r90 = Affine::rotate(90.0);
        assert_eq!(r90.map_point(1.0, 0.0), (0.0, 1.0));

        let twice = Affine::rotate(180.0).pre_concat(&Affine::rotate(180.0));
        assert_eq!(twice, Affine::IDENTITY);

        let full = Affine::rotate(90.0).pre_concat(&Affine::rotate(270.0));
        assert_eq!(full, Affine::IDENTITY);
    }

    #[test]
    fn test_pre_concat_order() {
        // Translate then scale: scaling is applied to points first
        let m = Affine::translate(10.0, 0.0).pre_concat(&Affine::scale(2.0, 2.0));
        assert_eq!(m.map_point(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn test_map_rect_bounds_rotated() {
        let m = Affine::rotate(90.0);
        let bounds = m.map_rect_bounds(&Rect::new(-20.0, -10.0, 40.0, 20.0));
        assert!((bounds.width - 20.0).abs() < 1e-4);
        assert!((bounds.height - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_arbitrary_angle_round_trip() {
        let m = Affine::rotate(30.0).pre_concat(&Affine::rotate(-30.0));
        assert!(m.approx_eq(&Affine::IDENTITY, 1e-6));
        assert!(!Affine::rotate(30.0).approx_eq(&Affine::IDENTITY, 1e-6));
    }
}
