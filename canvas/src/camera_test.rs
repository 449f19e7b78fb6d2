#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// FitView::fit
// =============================================================

#[test]
fn default_is_identity() {
    let v = FitView::default();
    assert_eq!(v.scale, 1.0);
    assert_eq!(v.offset_x, 0.0);
    assert_eq!(v.offset_y, 0.0);
}

#[test]
fn fit_tall_image_letterboxes_horizontally() {
    // 1000x2000 into 800x800 → scale 0.4, image 400 wide, 200px bars each side.
    let v = FitView::fit(1000.0, 2000.0, 800.0, 800.0);
    assert_eq!(v.scale, 0.4);
    assert_eq!(v.offset_x, 200.0);
    assert_eq!(v.offset_y, 0.0);
}

#[test]
fn fit_wide_image_letterboxes_vertically() {
    let v = FitView::fit(2000.0, 1000.0, 1000.0, 1000.0);
    assert_eq!(v.scale, 0.5);
    assert_eq!(v.offset_x, 0.0);
    assert_eq!(v.offset_y, 250.0);
}

#[test]
fn fit_degenerate_sizes_fall_back_to_identity() {
    assert_eq!(FitView::fit(0.0, 100.0, 800.0, 600.0), FitView::default());
    assert_eq!(FitView::fit(100.0, 100.0, 0.0, 600.0), FitView::default());
}

// =============================================================
// Coordinate conversion
// =============================================================

#[test]
fn screen_image_round_trip() {
    let v = FitView::fit(1000.0, 2000.0, 1000.0, 1000.0);
    let img = Point::new(500.0, 1000.0);
    let screen = v.image_to_screen(img);
    assert_eq!(screen, Point::new(500.0, 500.0));
    assert_eq!(v.screen_to_image(screen), img);
}

#[test]
fn screen_dist_scales_inversely() {
    let v = FitView::fit(1000.0, 1000.0, 500.0, 500.0);
    assert_eq!(v.screen_dist_to_image(8.0), 16.0);
}
