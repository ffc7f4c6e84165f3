pub mod compose;
pub mod constants;
mod io;
pub mod layout;
mod options;
mod print;
mod screen;
pub mod source;
mod stats;
pub mod surface;
mod types;

pub use compose::{compose_document, plan_document, sheet_count};
pub use io::{load_pdf, save_pdf};
pub use options::*;
pub use print::{EventPump, PrintProgress, PrintReport, PrintRoute, print_document, print_target};
pub use screen::{fit_to_window_scale, natural_display_size, render_screen};
pub use source::{LopdfSource, PageSource, Raster};
pub use stats::{Navigator, calculate_statistics};
pub use surface::{PdfSheetSurface, PixmapSurface, RecordingSurface, SheetSurface, Surface};
pub use types::*;
