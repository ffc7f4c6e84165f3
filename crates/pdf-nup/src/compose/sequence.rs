//! Sheet sequencing across a whole document

use super::{SheetRange, compose_sheet, plan_sheet};
use crate::layout::{Rect, SheetPlan};
use crate::options::ViewState;
use crate::source::PageSource;
use crate::surface::SheetSurface;
use crate::types::Result;

/// Number of output sheets for `total_pages` at `pages_per_sheet` (rounded up)
pub fn sheet_count(total_pages: usize, pages_per_sheet: usize) -> usize {
    total_pages.div_ceil(pages_per_sheet.max(1))
}

/// The page range of every output sheet, in order
pub fn sheet_ranges(
    total_pages: usize,
    pages_per_sheet: usize,
) -> impl Iterator<Item = SheetRange> {
    let pages_per_sheet = pages_per_sheet.max(1);
    (0..sheet_count(total_pages, pages_per_sheet)).map(move |sheet_index| {
        SheetRange::starting_at(sheet_index * pages_per_sheet, total_pages, pages_per_sheet)
    })
}

/// Drive `per_sheet` once per output sheet.
///
/// The surface is advanced to a fresh page before every sheet but the first.
/// The first error stops the sequence; sheets already emitted stay on the
/// surface. Returns the number of sheets completed.
pub fn run_sheets<S, F>(
    surface: &mut S,
    total_pages: usize,
    pages_per_sheet: usize,
    mut per_sheet: F,
) -> Result<usize>
where
    S: SheetSurface + ?Sized,
    F: FnMut(&mut S, &SheetRange) -> Result<()>,
{
    let mut completed = 0;
    for range in sheet_ranges(total_pages, pages_per_sheet) {
        if range.sheet_index > 0 {
            surface.advance_page()?;
        }
        per_sheet(surface, &range)?;
        completed += 1;
    }
    Ok(completed)
}

/// Compose every sheet of the document onto `surface` using the configured
/// pages-per-sheet. Returns the number of sheets drawn.
pub fn compose_document<S, P>(
    surface: &mut S,
    source: &P,
    view: &ViewState,
    target: &Rect,
) -> Result<usize>
where
    S: SheetSurface + ?Sized,
    P: PageSource + ?Sized,
{
    run_sheets(
        surface,
        source.page_count(),
        view.pages_per_sheet,
        |surface, range| compose_sheet(surface, source, view, target, range).map(|_| ()),
    )
}

/// Layout of every sheet of the document, without drawing
pub fn plan_document<P: PageSource + ?Sized>(
    source: &P,
    view: &ViewState,
    target: &Rect,
) -> Vec<SheetPlan> {
    sheet_ranges(source.page_count(), view.pages_per_sheet)
        .map(|range| plan_sheet(source, view, target, &range))
        .collect()
}
