mod common;

use common::SolidSource;
use pdf_nup::compose::*;
use pdf_nup::layout::Rect;
use pdf_nup::surface::SurfaceOp;
use pdf_nup::*;

fn nup(pages_per_sheet: usize) -> ViewState {
    ViewState {
        pages_per_sheet,
        ..ViewState::default()
    }
}

#[test]
fn test_five_pages_four_up() {
    let source = SolidSource::letter(5);
    let target = Rect::from_size(793.0, 1123.0);

    let plans = plan_document(&source, &nup(4), &target);
    assert_eq!(plans.len(), 2);

    assert_eq!(plans[0].filled_cells(), 4);
    assert_eq!(plans[1].filled_cells(), 1);
    assert_eq!(plans[1].cells.len(), 4);
    for plan in &plans {
        assert_eq!((plan.grid.rows, plan.grid.cols), (2, 2));
    }
    let pages: Vec<_> = plans[1].cells.iter().map(|c| c.source_page).collect();
    assert_eq!(pages, vec![Some(4), None, None, None]);
}

#[test]
fn test_compose_document_advances_between_sheets() {
    let source = SolidSource::letter(5);
    let mut surface = RecordingSurface::new(793.0, 1123.0);
    let target = Rect::from_size(793.0, 1123.0);

    let sheets = compose_document(&mut surface, &source, &nup(4), &target).unwrap();

    assert_eq!(sheets, 2);
    assert_eq!(surface.page_count(), 2);
    assert_eq!(surface.images().count(), 5);
    let advances = surface
        .ops()
        .iter()
        .filter(|op| **op == SurfaceOp::AdvancePage)
        .count();
    assert_eq!(advances, 1);
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_grid_cells_have_no_margin() {
    let source = SolidSource::letter(2);
    let target = Rect::from_size(1632.0, 1056.0);

    let plan = &plan_document(&source, &nup(2), &target)[0];
    // Letter at 96 dpi is 816x1056: each 816x1056 cell is filled exactly
    for cell in &plan.cells {
        let transform = cell.transform.unwrap();
        assert!((transform.scale - 1.0).abs() < 1e-6);
        let content = transform.content_bounds();
        assert!((content.width - cell.bounds.width).abs() < 1e-3);
        assert!((content.height - cell.bounds.height).abs() < 1e-3);
    }
}

#[test]
fn test_content_never_exceeds_cells() {
    let source = SolidSource {
        sizes: vec![(612.0, 792.0), (842.0, 595.0), (300.0, 1200.0), (1000.0, 100.0)],
        broken: Vec::new(),
    };
    let target = Rect::from_size(1123.0, 793.0);

    for pages_per_sheet in [1, 2, 3, 4, 6, 9, 16] {
        for plan in plan_document(&source, &nup(pages_per_sheet), &target) {
            for cell in plan.cells.iter().filter(|c| c.transform.is_some()) {
                let transform = cell.transform.unwrap();
                let tolerance = transform.scale * 0.5 + 1e-3;
                assert!(
                    cell.bounds
                        .contains_rect(&transform.content_bounds(), tolerance),
                    "{}-up cell {:?} overflows",
                    pages_per_sheet,
                    cell.grid_pos
                );
            }
        }
    }
}

#[test]
fn test_composition_is_idempotent() {
    let source = SolidSource::letter(7);
    let view = ViewState {
        pages_per_sheet: 6,
        rotation: Rotation::Clockwise90,
        scale_factor: 0.8,
        ..ViewState::default()
    };
    let target = Rect::from_size(1123.0, 793.0);

    assert_eq!(
        plan_document(&source, &view, &target),
        plan_document(&source, &view, &target)
    );

    let mut first = RecordingSurface::new(1123.0, 793.0);
    let mut second = RecordingSurface::new(1123.0, 793.0);
    compose_document(&mut first, &source, &view, &target).unwrap();
    compose_document(&mut second, &source, &view, &target).unwrap();
    assert_eq!(first.ops(), second.ops());
}

#[test]
fn test_broken_pages_leave_blank_cells() {
    let mut source = SolidSource::letter(4);
    source.broken = vec![0, 3];
    let mut surface = RecordingSurface::new(800.0, 800.0);

    let sheets =
        compose_document(&mut surface, &source, &nup(4), &Rect::from_size(800.0, 800.0)).unwrap();

    assert_eq!(sheets, 1);
    assert_eq!(surface.images().count(), 2);
}

#[test]
fn test_single_page_keeps_margin() {
    // 600x800 pt page on A4 portrait at 96 dpi
    let source = SolidSource::uniform(1, 600.0, 800.0);
    let target = Rect::from_size(793.0, 1123.0);
    let mut surface = RecordingSurface::new(793.0, 1123.0);

    let drawn =
        compose_single_page(&mut surface, &source, &ViewState::default(), &target, 0).unwrap();
    assert!(drawn);

    let (image_width, image_height) = source.raster_size(0, 96.0).unwrap();
    let expected =
        f32::min(793.0 / image_width as f32, 1123.0 / image_height as f32) * 1.0 * 0.9;
    let scale = surface
        .ops()
        .iter()
        .find_map(|op| match op {
            SurfaceOp::Scale(sx, _) => Some(*sx),
            _ => None,
        })
        .unwrap();
    assert!((scale - expected).abs() < 1e-6);
}

#[test]
fn test_sheet_ranges_trailing_sheet() {
    let ranges: Vec<_> = sheet_ranges(5, 4).collect();
    assert_eq!(
        ranges,
        vec![
            SheetRange {
                sheet_index: 0,
                first_page: 0,
                page_count: 4
            },
            SheetRange {
                sheet_index: 1,
                first_page: 4,
                page_count: 1
            },
        ]
    );
}
