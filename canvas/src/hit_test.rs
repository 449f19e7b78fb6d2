use super::*;
use crate::doc::{Block, BlockKind};
use crate::geom::Quad;

fn square(x: f64, y: f64, size: f64) -> Quad {
    [
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ]
}

fn layout_with(quads: &[Quad]) -> Layout {
    let mut layout = Layout::new(1000.0, 1000.0);
    layout.blocks = quads.iter().map(|q| Block::new(BlockKind::Grid, *q, 3, 3)).collect();
    layout
}

// =============================================================
// HitPart
// =============================================================

#[test]
fn hit_part_variants_distinct() {
    assert_ne!(HitPart::Body, HitPart::Vertex(0));
    assert_ne!(HitPart::Vertex(0), HitPart::Vertex(1));
    assert_eq!(HitPart::Vertex(2), HitPart::Vertex(2));
}

#[test]
fn hit_debug_format() {
    let s = format!("{:?}", Hit { block: 3, part: HitPart::Vertex(1) });
    assert!(s.contains("Vertex"));
    assert!(s.contains('3'));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_corner_returns_vertex() {
    let layout = layout_with(&[square(100.0, 100.0, 200.0)]);
    let hit = hit_test(Point::new(297.0, 302.0), &layout, 8.0);
    assert_eq!(hit, Some(Hit { block: 0, part: HitPart::Vertex(2) }));
}

#[test]
fn hit_test_interior_returns_body() {
    let layout = layout_with(&[square(100.0, 100.0, 200.0)]);
    let hit = hit_test(Point::new(200.0, 200.0), &layout, 8.0);
    assert_eq!(hit, Some(Hit { block: 0, part: HitPart::Body }));
}

#[test]
fn hit_test_miss_returns_none() {
    let layout = layout_with(&[square(100.0, 100.0, 200.0)]);
    assert_eq!(hit_test(Point::new(10.0, 10.0), &layout, 8.0), None);
}

#[test]
fn hit_test_handle_beats_body_of_upper_block() {
    // Block 1 covers block 0's BR corner; the handle still wins.
    let layout = layout_with(&[square(0.0, 0.0, 100.0), square(50.0, 50.0, 200.0)]);
    let hit = hit_test(Point::new(100.0, 100.0), &layout, 5.0);
    assert_eq!(hit, Some(Hit { block: 0, part: HitPart::Vertex(2) }));
}

#[test]
fn hit_test_handle_just_outside_quad() {
    let layout = layout_with(&[square(100.0, 100.0, 200.0)]);
    let hit = hit_test(Point::new(95.0, 95.0), &layout, 8.0);
    assert_eq!(hit, Some(Hit { block: 0, part: HitPart::Vertex(0) }));
}
