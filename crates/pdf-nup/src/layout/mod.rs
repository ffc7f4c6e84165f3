//! Layout calculation
//!
//! Pure geometry shared by every destination:
//! - Output page orientation
//! - Grid resolution and cell rectangles
//! - Per-cell content transform (center, rotate, scale)

mod grid;
mod orientation;
mod transform;
mod types;

pub use grid::*;
pub use orientation::*;
pub use transform::*;
pub use types::*;
