#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::Layout;
use crate::geom::{self, Point};

/// Which part of a block was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// A corner handle, by quad index (0 = TL, 1 = TR, 2 = BR, 3 = BL).
    Vertex(usize),
    /// The block interior.
    Body,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub block: usize,
    pub part: HitPart,
}

/// Test which block (if any) is under `image_pt`.
///
/// Corner handles of any block take priority over block interiors. `radius`
/// is the handle slop in image pixels.
#[must_use]
pub fn hit_test(image_pt: Point, layout: &Layout, radius: f64) -> Option<Hit> {
    if let Some((block, corner)) = geom::hit_handle(&layout.blocks, image_pt.x, image_pt.y, radius) {
        return Some(Hit { block, part: HitPart::Vertex(corner) });
    }
    geom::hit_poly(&layout.blocks, image_pt.x, image_pt.y).map(|block| Hit { block, part: HitPart::Body })
}
