//! Document model: the bubble-sheet layout and its detection blocks.
//!
//! This module defines the data that describes where bubbles are on a scanned
//! answer sheet (`Layout`, `Block`, `BlockKind`) and the normalization rule
//! that fills in per-column choice labels. The layout travels as JSON between
//! the editor, its host page, and the grading backend, so field names follow
//! the persisted document exactly (`cell_radius_ratio` next to camel-cased
//! block fields).
//!
//! Blocks are owned by their layout and copied structurally; nothing refers
//! to a block by identity, only by its index in `blocks`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CELL_RADIUS_RATIO, DEFAULT_DPI};
use crate::geom::{GridCells, Point, Quad, grid_on};

/// Semantics of a block's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Choice bubbles, one question per row.
    Grid,
    /// Alias of `Grid` used by older layouts.
    Q,
    /// Free numeric answer, one digit per column.
    Digits,
    /// Student id digits.
    Id,
    /// Phone number digits.
    Phone,
    /// Exam or school code digits.
    Code,
    /// Korean name, one syllable per column marked with jamo bubbles.
    Name,
}

impl BlockKind {
    /// Whether cells are choice bubbles (`grid` / `q`).
    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Grid | Self::Q)
    }

    /// Whether cells are single-digit bubbles (`digits`, `id`, `phone`, `code`).
    #[must_use]
    pub fn is_digit_like(self) -> bool {
        matches!(self, Self::Digits | Self::Id | Self::Phone | Self::Code)
    }
}

/// Natural pixel size of the reference scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Per-block bubble radius override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleOverride {
    pub radius_px: f64,
}

fn default_one() -> u32 {
    1
}

fn default_prefix() -> String {
    "Q".to_owned()
}

/// One detection region on the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Cell semantics.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Corners in image pixels: TL, TR, BR, BL.
    pub quad: Quad,
    /// Bubble rows inside the quad.
    #[serde(default = "default_one")]
    pub rows: u32,
    /// Bubble columns inside the quad.
    #[serde(default = "default_one")]
    pub cols: u32,
    /// Question number of the first row.
    #[serde(rename = "questionStart", default = "default_one")]
    pub question_start: u32,
    /// Number of questions this block answers.
    #[serde(rename = "questionCount", default)]
    pub question_count: u32,
    /// Prefix for generated question ids (`"Q"` → `Q1`, `Q2`, …).
    #[serde(rename = "questionPrefix", default = "default_prefix")]
    pub question_prefix: String,
    /// Per-column labels; filled with defaults by [`Layout::normalize_choices`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Rendering/detection radius override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bubble: Option<BubbleOverride>,
    /// Display label drawn above the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Block {
    /// A block with default numbering and no overrides.
    #[must_use]
    pub fn new(kind: BlockKind, quad: Quad, rows: u32, cols: u32) -> Self {
        Self {
            kind,
            quad,
            rows,
            cols,
            question_start: 1,
            question_count: 0,
            question_prefix: default_prefix(),
            choices: None,
            bubble: None,
            name: None,
        }
    }

    /// Interpolated cell centers, honouring the block's radius override.
    #[must_use]
    pub fn cells(&self, ratio: f64) -> GridCells {
        let mut grid = grid_on(&self.quad, self.rows as usize, self.cols as usize, ratio);
        if let Some(bubble) = self.bubble {
            grid.radius = bubble.radius_px;
        }
        grid
    }

    /// Translate the whole block.
    pub fn translate(&mut self, delta: Point) {
        for corner in &mut self.quad {
            *corner = corner.add(delta);
        }
    }
}

/// Default per-column labels for a block kind.
///
/// Choice blocks get `"1"..="cols"`, digit-like blocks `"0"..="9"`, name
/// blocks nothing (their labels come from the jamo table).
#[must_use]
pub fn default_choices(kind: BlockKind, cols: u32) -> Vec<String> {
    if kind.is_choice() {
        (1..=cols).map(|c| c.to_string()).collect()
    } else if kind.is_digit_like() {
        (0..=9).map(|d: u32| d.to_string()).collect()
    } else {
        Vec::new()
    }
}

fn default_dpi() -> f64 {
    DEFAULT_DPI
}

fn default_ratio() -> f64 {
    DEFAULT_CELL_RADIUS_RATIO
}

/// The bubble-sheet geometry document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Scan resolution assumed for pixel coordinates.
    #[serde(default = "default_dpi")]
    pub dpi: f64,
    /// Natural size of the reference scan; rewritten on image load when it disagrees.
    pub canvas: CanvasSize,
    /// Default bubble radius as a fraction of cell spacing.
    #[serde(default = "default_ratio")]
    pub cell_radius_ratio: f64,
    /// Detection regions in display order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Layout {
    /// An empty layout for a scan of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            dpi: DEFAULT_DPI,
            canvas: CanvasSize { width, height },
            cell_radius_ratio: DEFAULT_CELL_RADIUS_RATIO,
            blocks: Vec::new(),
        }
    }

    /// Parse a layout document and fill missing choice labels.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the JSON does not describe a layout
    /// (including quads without exactly four points).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut layout: Layout = serde_json::from_str(json)?;
        layout.normalize_choices();
        Ok(layout)
    }

    /// Serialize for persistence.
    ///
    /// # Errors
    ///
    /// Returns the serde error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Assign default choices to every block that lacks them. Returns whether anything changed.
    pub fn normalize_choices(&mut self) -> bool {
        let mut changed = false;
        for block in &mut self.blocks {
            if block.choices.is_none() {
                block.choices = Some(default_choices(block.kind, block.cols));
                changed = true;
            }
        }
        changed
    }

    /// Overwrite `canvas` with the image's natural size. Returns whether it differed.
    #[allow(clippy::float_cmp)]
    pub fn fit_canvas_to_image(&mut self, width: f64, height: f64) -> bool {
        if self.canvas.width == width && self.canvas.height == height {
            return false;
        }
        self.canvas = CanvasSize { width, height };
        true
    }
}
