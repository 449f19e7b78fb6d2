//! Shared constants for the canvas crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for corner handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Drawn size of a corner handle, in screen pixels.
pub const HANDLE_DRAW_RADIUS_PX: f64 = 5.0;

// ── Keyboard ────────────────────────────────────────────────────

/// Arrow-key nudge distance in image pixels.
pub const NUDGE_PX: f64 = 5.0;

/// Arrow-key nudge distance while Shift is held.
pub const NUDGE_FINE_PX: f64 = 1.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of snapshots kept on each of the undo and redo stacks.
pub const HISTORY_LIMIT: usize = 10;

// ── Layout defaults ─────────────────────────────────────────────

/// Scan resolution assumed when a layout omits `dpi`.
pub const DEFAULT_DPI: f64 = 200.0;

/// Bubble radius as a fraction of cell spacing when a layout omits it.
pub const DEFAULT_CELL_RADIUS_RATIO: f64 = 0.35;

// ── Colors ──────────────────────────────────────────────────────

pub const QUAD_STROKE: &str = "#1E88E5";
pub const QUAD_STROKE_SELECTED: &str = "#E53935";
pub const HANDLE_FILL: &str = "#FFFFFF";
pub const HANDLE_FILL_ACTIVE: &str = "#E53935";
pub const CELL_STROKE: &str = "rgba(30, 136, 229, 0.8)";
pub const CELL_STROKE_CORNER: &str = "#FB8C00";
pub const LABEL_FILL: &str = "rgba(31, 26, 23, 0.75)";
pub const NAME_FILL: &str = "#1F1A17";
pub const LETTERBOX_FILL: &str = "#2B2B2B";
