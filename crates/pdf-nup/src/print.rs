//! Print preview and physical printing
//!
//! Both routes lay the whole document out on a sheet surface with the
//! configured pages-per-sheet. Preview draws straight onto the surface; the
//! device route composes each sheet into a device-resolution buffer first
//! and blits that buffer onto the sheet.

use crate::compose::{SheetRange, compose_sheet, run_sheets, sheet_count};
use crate::layout::{Rect, normalize_orientation};
use crate::options::ViewState;
use crate::source::PageSource;
use crate::surface::{PixmapSurface, SheetSurface};
use crate::types::{NupError, Result};

/// Progress after a sheet has been composited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintProgress {
    /// One-based number of the sheet just finished
    pub sheet: usize,
    pub total_sheets: usize,
}

/// Host hook called after every sheet so the host can process pending events
pub trait EventPump {
    fn pump(&mut self, progress: PrintProgress);
}

impl<F: FnMut(PrintProgress)> EventPump for F {
    fn pump(&mut self, progress: PrintProgress) {
        self(progress)
    }
}

/// How sheets reach the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintRoute {
    /// Draw cells directly on the sheet surface
    Preview,
    /// Compose into a device-resolution buffer, then blit it at the sheet origin
    #[default]
    Device,
}

/// Outcome of a completed print job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintReport {
    pub sheets_printed: usize,
}

/// Area of one sheet that the grid divides, in device units.
///
/// The device sheet size is forced into the configured orientation.
pub fn print_target<S, P>(surface: &S, source: &P, view: &ViewState) -> Rect
where
    S: SheetSurface + ?Sized,
    P: PageSource + ?Sized,
{
    let (width, height) = surface.sheet_size();
    let (width, height) =
        normalize_orientation(width, height, source.page_size(0), view.orientation);
    Rect::from_size(width, height)
}

/// Print every sheet of the document onto `surface`.
///
/// `pump` is called after each sheet. The first surface failure aborts the
/// remaining sheets and is returned as `NupError::PrintAborted`; sheets
/// already emitted are not undone.
pub fn print_document<S, P, E>(
    surface: &mut S,
    source: &P,
    view: &ViewState,
    route: PrintRoute,
    pump: &mut E,
) -> Result<PrintReport>
where
    S: SheetSurface + ?Sized,
    P: PageSource + ?Sized,
    E: EventPump + ?Sized,
{
    let total_pages = source.page_count();
    if total_pages == 0 {
        return Err(NupError::NoPages);
    }
    view.validate()?;

    let target = print_target(surface, source, view);
    let total_sheets = sheet_count(total_pages, view.pages_per_sheet);
    log::info!(
        "Printing {} pages on {} sheets ({:?}, {}x{} device units)",
        total_pages,
        total_sheets,
        route,
        target.width,
        target.height
    );

    let mut printed = 0;
    let result = run_sheets(surface, total_pages, view.pages_per_sheet, |surface, range| {
        match route {
            PrintRoute::Preview => {
                compose_sheet(surface, source, view, &target, range)?;
            }
            PrintRoute::Device => print_sheet_buffered(surface, source, view, &target, range)?,
        }
        printed += 1;
        pump.pump(PrintProgress {
            sheet: range.sheet_index + 1,
            total_sheets,
        });
        Ok(())
    });

    match result {
        Ok(sheets_printed) => {
            log::info!("Print job finished: {} sheets", sheets_printed);
            Ok(PrintReport { sheets_printed })
        }
        Err(e) => {
            let aborted = NupError::PrintAborted {
                sheets_printed: printed,
                total_sheets,
                source: Box::new(e),
            };
            log::error!("{}", aborted);
            Err(aborted)
        }
    }
}

/// Compose one sheet into a white device-resolution buffer and blit it at (0, 0)
fn print_sheet_buffered<S, P>(
    surface: &mut S,
    source: &P,
    view: &ViewState,
    target: &Rect,
    range: &SheetRange,
) -> Result<()>
where
    S: SheetSurface + ?Sized,
    P: PageSource + ?Sized,
{
    let width = target.width.round() as u32;
    let height = target.height.round() as u32;
    let mut buffer = PixmapSurface::new(width, height)?;
    let buffer_target = Rect::from_size(width as f32, height as f32);
    compose_sheet(&mut buffer, source, view, &buffer_target, range)?;
    let sheet = buffer.into_raster()?;
    surface.draw_image(&sheet, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use crate::types::Orientation;

    struct Blank;

    impl PageSource for Blank {
        fn page_count(&self) -> usize {
            0
        }

        fn page_size(&self, _index: usize) -> Option<(f32, f32)> {
            None
        }

        fn render(&self, _index: usize, _dpi: f32) -> Option<crate::source::Raster> {
            None
        }
    }

    #[test]
    fn test_target_follows_orientation() {
        let surface = RecordingSurface::new(2480.0, 3508.0);
        let view = ViewState {
            orientation: Orientation::Landscape,
            ..ViewState::default()
        };
        assert_eq!(
            print_target(&surface, &Blank, &view),
            Rect::from_size(3508.0, 2480.0)
        );
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut pump = |_: PrintProgress| {};
        let result = print_document(
            &mut surface,
            &Blank,
            &ViewState::default(),
            PrintRoute::Preview,
            &mut pump,
        );
        assert!(matches!(result, Err(NupError::NoPages)));
    }
}
