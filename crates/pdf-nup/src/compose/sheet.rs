//! Multi-page sheet compositor

use crate::constants::SCREEN_DPI;
use crate::layout::{
    CellKind, CellPlan, Rect, SheetPlan, cell_bounds, cell_positions, cell_transform, draw_cell,
    resolve_grid,
};
use crate::options::ViewState;
use crate::source::PageSource;
use crate::surface::Surface;
use crate::types::Result;

/// The source pages that belong to one output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRange {
    /// Zero-based sheet index
    pub sheet_index: usize,
    /// Document index of the page in the first cell
    pub first_page: usize,
    /// Pages on this sheet; smaller than pages-per-sheet only on the last sheet
    pub page_count: usize,
}

impl SheetRange {
    /// Range starting at `first_page` holding at most `pages_per_sheet` of `total_pages`
    pub fn starting_at(first_page: usize, total_pages: usize, pages_per_sheet: usize) -> Self {
        let pages_per_sheet = pages_per_sheet.max(1);
        Self {
            sheet_index: first_page / pages_per_sheet,
            first_page,
            page_count: pages_per_sheet.min(total_pages.saturating_sub(first_page)),
        }
    }
}

/// Compute the layout of one sheet without drawing anything.
///
/// The grid always comes from the configured pages-per-sheet, so a short
/// last sheet keeps the full grid with blank trailing cells. Cells are
/// fitted to each page's nominal raster size at screen resolution.
pub fn plan_sheet<P: PageSource + ?Sized>(
    source: &P,
    view: &ViewState,
    target: &Rect,
    range: &SheetRange,
) -> SheetPlan {
    let grid = resolve_grid(view.pages_per_sheet);
    // Counts without their own grid fall back to 1x1; never visit cells outside it
    let visited = view.pages_per_sheet.max(1).min(grid.cell_count());

    let cells = cell_positions(&grid)
        .take(visited)
        .enumerate()
        .map(|(i, pos)| {
            let local = cell_bounds(&grid, pos, target.width, target.height);
            let bounds = Rect::new(
                target.x + local.x,
                target.y + local.y,
                local.width,
                local.height,
            );

            let page = range.first_page + i;
            let in_range = i < range.page_count;
            if in_range && page >= source.page_count() {
                log::warn!(
                    "Page {} is out of range ({} pages), leaving cell blank",
                    page,
                    source.page_count()
                );
            }
            let source_page = (in_range && page < source.page_count()).then_some(page);
            let transform = source_page
                .and_then(|page| source.raster_size(page, SCREEN_DPI))
                .and_then(|size| cell_transform(&bounds, size, view, CellKind::GridCell));

            CellPlan {
                grid_pos: pos,
                bounds,
                source_page,
                transform,
            }
        })
        .collect();

    SheetPlan {
        sheet_index: range.sheet_index,
        grid,
        target: *target,
        cells,
    }
}

/// Draw one sheet onto `surface`.
///
/// Pages that cannot be rendered leave their cell blank. Only a surface
/// failure is returned as an error. Returns the plan that was drawn.
pub fn compose_sheet<S, P>(
    surface: &mut S,
    source: &P,
    view: &ViewState,
    target: &Rect,
    range: &SheetRange,
) -> Result<SheetPlan>
where
    S: Surface + ?Sized,
    P: PageSource + ?Sized,
{
    let plan = plan_sheet(source, view, target, range);

    for cell in &plan.cells {
        let Some(page) = cell.source_page else {
            continue;
        };
        let Some(raster) = source.render(page, SCREEN_DPI) else {
            log::warn!("Page {} could not be rendered, leaving cell blank", page);
            continue;
        };
        // Fit the raster actually produced, which may differ from the nominal size
        let fitted = cell_transform(&cell.bounds, raster.dimensions(), view, CellKind::GridCell);
        let Some(transform) = fitted else {
            log::warn!("Page {} rendered empty, leaving cell blank", page);
            continue;
        };
        draw_cell(surface, &raster, &transform)?;
    }

    Ok(plan)
}

/// Draw page `page` alone on the whole `target`, keeping a margin around it.
///
/// Returns `false` when the page is out of range or cannot be rendered; the
/// target is left untouched in that case.
pub fn compose_single_page<S, P>(
    surface: &mut S,
    source: &P,
    view: &ViewState,
    target: &Rect,
    page: usize,
) -> Result<bool>
where
    S: Surface + ?Sized,
    P: PageSource + ?Sized,
{
    if page >= source.page_count() {
        log::warn!("Page {} is out of range ({} pages)", page, source.page_count());
        return Ok(false);
    }
    let Some(raster) = source.render(page, SCREEN_DPI) else {
        log::warn!("Page {} could not be rendered", page);
        return Ok(false);
    };
    let Some(transform) = cell_transform(target, raster.dimensions(), view, CellKind::WholePage)
    else {
        return Ok(false);
    };
    draw_cell(surface, &raster, &transform)?;
    Ok(true)
}
