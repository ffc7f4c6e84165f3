//! Sheet composition
//!
//! Turns a document into output sheets:
//! 1. Split the page sequence into sheet-sized ranges
//! 2. Lay each range out on the configured grid
//! 3. Draw every filled cell through the cell transform engine

mod sequence;
mod sheet;

pub use sequence::*;
pub use sheet::*;
