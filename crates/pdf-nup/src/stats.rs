use crate::compose::sheet_count;
use crate::layout::resolve_grid;
use crate::options::ViewState;
use crate::types::*;

/// Calculate how a document of `source_pages` pages splits into sheets
pub fn calculate_statistics(source_pages: usize, view: &ViewState) -> Result<LayoutStatistics> {
    if source_pages == 0 {
        return Err(NupError::NoPages);
    }

    let pages_per_sheet = view.pages_per_sheet.max(1);
    let grid = resolve_grid(pages_per_sheet);
    let output_sheets = sheet_count(source_pages, pages_per_sheet);

    // Only visited cells count; an unsupported count still draws one page per sheet
    let cells_per_sheet = pages_per_sheet.min(grid.cell_count());
    let total_cells = output_sheets * grid.cell_count();
    let filled_cells = source_pages.min(output_sheets * cells_per_sheet);

    Ok(LayoutStatistics {
        source_pages,
        pages_per_sheet,
        rows: grid.rows,
        cols: grid.cols,
        output_sheets,
        filled_cells,
        blank_cells: total_cells - filled_cells,
    })
}

/// Page cursor for stepping through a document on screen.
///
/// In adaptive mode the cursor moves by whole sheets and always sits on the
/// first page of a sheet; in single mode it moves one page at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current_page: usize,
    total_pages: usize,
    pages_per_step: usize,
}

impl Navigator {
    pub fn new(total_pages: usize, view: &ViewState) -> Self {
        Self {
            current_page: 0,
            total_pages,
            pages_per_step: view.effective_pages_per_sheet(),
        }
    }

    /// Page shown at the top-left of the current view
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Re-read the step size after the view changes, keeping the cursor on a
    /// sheet boundary
    pub fn update_view(&mut self, view: &ViewState) {
        self.pages_per_step = view.effective_pages_per_sheet();
        self.current_page = self.current_position() * self.pages_per_step;
    }

    /// Zero-based sheet (adaptive) or page (single) index of the cursor
    pub fn current_position(&self) -> usize {
        self.current_page / self.pages_per_step
    }

    /// Number of sheets (adaptive) or pages (single)
    pub fn total_positions(&self) -> usize {
        sheet_count(self.total_pages, self.pages_per_step)
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_position() > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_position() + 1 < self.total_positions()
    }

    /// Step back one position. Returns whether the cursor moved.
    pub fn go_prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.current_page = (self.current_position() - 1) * self.pages_per_step;
        true
    }

    /// Step forward one position. Returns whether the cursor moved.
    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_page = (self.current_position() + 1) * self.pages_per_step;
        true
    }

    /// Jump to `position`, clamped to the document
    pub fn seek(&mut self, position: usize) {
        let last = self.total_positions().saturating_sub(1);
        self.current_page = position.min(last) * self.pages_per_step;
    }

    /// One-based "x of y" label values
    pub fn label(&self) -> (usize, usize) {
        (self.current_position() + 1, self.total_positions())
    }
}
