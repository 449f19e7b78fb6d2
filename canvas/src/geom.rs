//! Geometry engine: pure functions over image-space points and quads.
//!
//! Every quad is four corners ordered top-left, top-right, bottom-right,
//! bottom-left. The bubble grid inside a quad is placed by bilinear
//! interpolation so that skewed or slightly rotated scans still line up.
//!
//! Hit scans walk blocks back to front (highest index first) so the most
//! recently added block wins where regions overlap.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::doc::Block;

/// A point in image pixel space. Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    #[must_use]
    pub fn round(self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Four corners: TL, TR, BR, BL.
pub type Quad = [Point; 4];

/// Corner index of a quad.
pub const TL: usize = 0;
pub const TR: usize = 1;
pub const BR: usize = 2;
pub const BL: usize = 3;

/// Interpolated bubble centers for one block.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCells {
    /// `rows` vectors of `cols` centers each, rounded to whole pixels.
    pub centers: Vec<Vec<Point>>,
    /// Bubble radius derived from the average cell spacing.
    pub radius: f64,
}

impl GridCells {
    /// Whether `(row, col)` is one of the four corner cells of the grid.
    #[must_use]
    pub fn is_corner(&self, row: usize, col: usize) -> bool {
        let rows = self.centers.len();
        let cols = self.centers.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return false;
        }
        (row == 0 || row == rows - 1) && (col == 0 || col == cols - 1)
    }
}

/// Interpolation fraction for index `i` of `count`; single rows/columns sit at the midpoint.
#[allow(clippy::cast_precision_loss)]
fn fraction(i: usize, count: usize) -> f64 {
    if count <= 1 { 0.5 } else { i as f64 / (count - 1) as f64 }
}

/// Place a `rows × cols` grid of cell centers inside the quad `tl, tr, br, bl`.
///
/// Row `i` sits at vertical fraction `i / (rows - 1)` along the left (`tl → bl`)
/// and right (`tr → br`) edges; column `j` interpolates between those two edge
/// points at `j / (cols - 1)`. A single row or column uses the midpoint. The
/// radius is `ratio × min(avg cell width, avg cell height)`, rounded.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_on_quad(tl: Point, tr: Point, br: Point, bl: Point, rows: usize, cols: usize, ratio: f64) -> GridCells {
    if rows == 0 || cols == 0 {
        return GridCells { centers: Vec::new(), radius: 0.0 };
    }

    let centers = (0..rows)
        .map(|i| {
            let v = fraction(i, rows);
            let left = tl.lerp(bl, v);
            let right = tr.lerp(br, v);
            (0..cols).map(|j| left.lerp(right, fraction(j, cols)).round()).collect()
        })
        .collect();

    let col_steps = cols.saturating_sub(1).max(1) as f64;
    let row_steps = rows.saturating_sub(1).max(1) as f64;
    let avg_w = (tl.distance(tr) / col_steps + bl.distance(br) / col_steps) / 2.0;
    let avg_h = (tl.distance(bl) / row_steps + tr.distance(br) / row_steps) / 2.0;
    let radius = (ratio * avg_w.min(avg_h)).round();

    GridCells { centers, radius }
}

/// Convenience wrapper over [`grid_on_quad`] for a quad array.
#[must_use]
pub fn grid_on(quad: &Quad, rows: usize, cols: usize, ratio: f64) -> GridCells {
    grid_on_quad(quad[TL], quad[TR], quad[BR], quad[BL], rows, cols, ratio)
}

/// Convex point-in-polygon test.
///
/// Accepts unless the point lies on the positive side of one edge and the
/// negative side of another. Only valid for the simple convex quads this
/// editor produces.
#[must_use]
pub fn point_in_poly(x: f64, y: f64, poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut has_pos = false;
    let mut has_neg = false;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let cross = (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);
        if cross > 0.0 {
            has_pos = true;
        } else if cross < 0.0 {
            has_neg = true;
        }
        if has_pos && has_neg {
            return false;
        }
    }
    true
}

/// First `(block, corner)` whose corner is within `radius` of `(x, y)`, scanning back to front.
#[must_use]
pub fn hit_handle(blocks: &[Block], x: f64, y: f64, radius: f64) -> Option<(usize, usize)> {
    let p = Point::new(x, y);
    let r2 = radius * radius;
    blocks.iter().enumerate().rev().find_map(|(bi, block)| {
        block
            .quad
            .iter()
            .position(|corner| corner.distance_sq(p) <= r2)
            .map(|ci| (bi, ci))
    })
}

/// First block index whose quad contains `(x, y)`, scanning back to front.
#[must_use]
pub fn hit_poly(blocks: &[Block], x: f64, y: f64) -> Option<usize> {
    blocks
        .iter()
        .enumerate()
        .rev()
        .find(|(_, block)| point_in_poly(x, y, &block.quad))
        .map(|(bi, _)| bi)
}

/// Translate every corner of `quad` by `delta`.
#[must_use]
pub fn translate_quad(quad: &Quad, delta: Point) -> Quad {
    quad.map(|p| p.add(delta))
}

/// Arithmetic mean of the four corners.
#[must_use]
pub fn centroid(quad: &Quad) -> Point {
    let sum = quad.iter().fold(Point::default(), |acc, p| acc.add(*p));
    Point::new(sum.x / 4.0, sum.y / 4.0)
}
