mod common;

use common::SolidSource;
use pdf_nup::*;

fn is_white(pixel: &image::Rgba<u8>) -> bool {
    pixel.0.iter().all(|&c| c >= 250)
}

fn is_dark(pixel: &image::Rgba<u8>) -> bool {
    pixel.0[..3].iter().all(|&c| c <= 5)
}

#[test]
fn test_empty_document_clears_display() {
    let source = SolidSource::letter(0);
    assert!(render_screen(&source, &ViewState::default(), 0).unwrap().is_none());
}

#[test]
fn test_natural_size_is_output_page() {
    let source = SolidSource::uniform(1, 600.0, 800.0);
    let mut view = ViewState::default();
    assert_eq!(natural_display_size(&source, &view, 0), (793, 1123));

    view.orientation = Orientation::Landscape;
    assert_eq!(natural_display_size(&source, &view, 0), (1123, 793));

    view.page_size = PageSize::Letter;
    view.orientation = Orientation::Portrait;
    assert_eq!(natural_display_size(&source, &view, 0), (816, 1056));
}

#[test]
fn test_single_mode_leaves_margin() {
    let source = SolidSource::letter(1);
    let view = ViewState {
        adaptive_mode: false,
        page_size: PageSize::Letter,
        ..ViewState::default()
    };

    let sheet = render_screen(&source, &view, 0).unwrap().unwrap();
    assert_eq!(sheet.dimensions(), (816, 1056));

    // Content is 90% of the sheet, centered
    assert!(is_dark(sheet.get_pixel(408, 528)));
    assert!(is_white(sheet.get_pixel(20, 20)));
    assert!(is_white(sheet.get_pixel(408, 30)));
    assert!(is_dark(sheet.get_pixel(408, 80)));
}

#[test]
fn test_adaptive_mode_fills_cells_edge_to_edge() {
    let source = SolidSource::letter(2);
    let view = ViewState {
        pages_per_sheet: 2,
        page_size: PageSize::Letter,
        orientation: Orientation::Landscape,
        ..ViewState::default()
    };

    let sheet = render_screen(&source, &view, 0).unwrap().unwrap();
    assert_eq!(sheet.dimensions(), (1056, 816));

    // Two 528x816 cells; each Letter page is fitted to the cell width
    assert!(is_dark(sheet.get_pixel(10, 408)));
    assert!(is_dark(sheet.get_pixel(264, 408)));
    assert!(is_dark(sheet.get_pixel(1045, 408)));
    assert!(is_white(sheet.get_pixel(264, 20)));
    assert!(is_white(sheet.get_pixel(792, 800)));
}

#[test]
fn test_trailing_sheet_has_blank_cells() {
    let source = SolidSource::letter(5);
    let view = ViewState {
        pages_per_sheet: 4,
        page_size: PageSize::Letter,
        ..ViewState::default()
    };

    let sheet = render_screen(&source, &view, 4).unwrap().unwrap();
    // Top-left cell holds page 5; the other three stay white
    assert!(is_dark(sheet.get_pixel(204, 264)));
    assert!(is_white(sheet.get_pixel(612, 264)));
    assert!(is_white(sheet.get_pixel(204, 792)));
    assert!(is_white(sheet.get_pixel(612, 792)));
}

#[test]
fn test_display_scale_resizes_after_layout() {
    let source = SolidSource::letter(1);
    let view = ViewState {
        page_size: PageSize::Letter,
        display_scale_factor: 0.5,
        ..ViewState::default()
    };

    let sheet = render_screen(&source, &view, 0).unwrap().unwrap();
    assert_eq!(sheet.dimensions(), (408, 528));
}

#[test]
fn test_fit_to_window_then_render() {
    let source = SolidSource::letter(1);
    let mut view = ViewState {
        page_size: PageSize::Letter,
        ..ViewState::default()
    };

    let natural = natural_display_size(&source, &view, 0);
    view.display_scale_factor = fit_to_window_scale(natural, (448.0, 1000.0));
    assert!((view.display_scale_factor - 0.5).abs() < 1e-6);

    let sheet = render_screen(&source, &view, 0).unwrap().unwrap();
    assert_eq!(sheet.dimensions(), (408, 528));
}

#[test]
fn test_invalid_view_is_rejected() {
    let source = SolidSource::letter(1);
    let view = ViewState {
        scale_factor: -1.0,
        ..ViewState::default()
    };
    assert!(matches!(
        render_screen(&source, &view, 0),
        Err(NupError::Config(_))
    ));
}

#[test]
fn test_unrenderable_page_shows_blank_sheet() {
    let mut source = SolidSource::letter(1);
    source.broken = vec![0];
    let view = ViewState {
        adaptive_mode: false,
        ..ViewState::default()
    };

    let sheet = render_screen(&source, &view, 0).unwrap().unwrap();
    assert!(sheet.pixels().all(is_white));
}

#[test]
fn test_huge_display_scale_is_a_config_error() {
    let source = SolidSource::letter(1);
    let view = ViewState {
        page_size: PageSize::Letter,
        display_scale_factor: 1.0e6,
        ..ViewState::default()
    };
    assert!(view.validate().is_ok());
    assert!(matches!(
        render_screen(&source, &view, 0),
        Err(NupError::Config(_))
    ));
}
