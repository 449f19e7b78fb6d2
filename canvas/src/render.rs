//! Rendering: draws the scan and the layout overlay to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine state and produces pixels; it
//! does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) hands the result to the host.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{
    CELL_STROKE, CELL_STROKE_CORNER, HANDLE_DRAW_RADIUS_PX, HANDLE_FILL, HANDLE_FILL_ACTIVE, LABEL_FILL, LETTERBOX_FILL,
    NAME_FILL, QUAD_STROKE, QUAD_STROKE_SELECTED,
};
use crate::doc::{Block, BlockKind};
use crate::engine::EngineCore;
use crate::geom::{BL, BR, TL, TR};

/// Jamo labels for name blocks, one per row: initial consonants then vowels.
pub const NAME_JAMO: [&str; 40] = [
    "ㄱ", "ㄲ", "ㄴ", "ㄷ", "ㄸ", "ㄹ", "ㅁ", "ㅂ", "ㅃ", "ㅅ", "ㅆ", "ㅇ", "ㅈ", "ㅉ", "ㅊ", "ㅋ", "ㅌ", "ㅍ", "ㅎ", "ㅏ",
    "ㅐ", "ㅑ", "ㅒ", "ㅓ", "ㅔ", "ㅕ", "ㅖ", "ㅗ", "ㅘ", "ㅙ", "ㅚ", "ㅛ", "ㅜ", "ㅝ", "ㅞ", "ㅟ", "ㅠ", "ㅡ", "ㅢ", "ㅣ",
];

/// Label drawn inside the bubble at `(row, col)` of `block`.
///
/// Choice blocks label by column (choice number), digit-like blocks by row
/// (the digit the row encodes), name blocks by row from [`NAME_JAMO`].
#[must_use]
pub fn cell_label(block: &Block, row: usize, col: usize) -> String {
    let choices = block.choices.as_deref().unwrap_or(&[]);
    match block.kind {
        BlockKind::Grid | BlockKind::Q => choices.get(col).cloned().unwrap_or_else(|| (col + 1).to_string()),
        BlockKind::Digits | BlockKind::Id | BlockKind::Phone | BlockKind::Code => {
            choices.get(row).cloned().unwrap_or_else(|| (row % 10).to_string())
        }
        BlockKind::Name => NAME_JAMO[row % NAME_JAMO.len()].to_owned(),
    }
}

/// Draw the full scene: letterbox, scan image, and every block.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, image: Option<&HtmlImageElement>, core: &EngineCore) -> Result<(), JsValue> {
    let view = core.view;

    // Layer 1: clear to the letterbox color.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.set_fill_style_str(LETTERBOX_FILL);
    ctx.fill_rect(0.0, 0.0, core.viewport_width, core.viewport_height);

    // Layer 2: the scan, fit-centered.
    let canvas = core.layout.canvas;
    if let Some(img) = image {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            view.offset_x,
            view.offset_y,
            canvas.width * view.scale,
            canvas.height * view.scale,
        )?;
    }

    // Layer 3: blocks in image space.
    ctx.save();
    ctx.translate(view.offset_x, view.offset_y)?;
    ctx.scale(view.scale, view.scale)?;
    let px = 1.0 / view.scale;
    for (index, block) in core.layout.blocks.iter().enumerate() {
        let selected = core.ui.selected_block == Some(index);
        let active_vertex = if selected { core.ui.active_vertex } else { None };
        draw_block(ctx, block, core.layout.cell_radius_ratio, selected, active_vertex, px)?;
    }
    ctx.restore();

    Ok(())
}

fn draw_block(
    ctx: &CanvasRenderingContext2d,
    block: &Block,
    ratio: f64,
    selected: bool,
    active_vertex: Option<usize>,
    px: f64,
) -> Result<(), JsValue> {
    let quad = &block.quad;

    // Outline.
    ctx.begin_path();
    ctx.move_to(quad[TL].x, quad[TL].y);
    ctx.line_to(quad[TR].x, quad[TR].y);
    ctx.line_to(quad[BR].x, quad[BR].y);
    ctx.line_to(quad[BL].x, quad[BL].y);
    ctx.close_path();
    ctx.set_stroke_style_str(if selected { QUAD_STROKE_SELECTED } else { QUAD_STROKE });
    ctx.set_line_width(if selected { 2.0 * px } else { 1.5 * px });
    ctx.stroke();

    draw_cells(ctx, block, ratio, px)?;

    // Corner handles on top of the cells.
    for (corner, p) in quad.iter().enumerate() {
        ctx.begin_path();
        ctx.arc(p.x, p.y, HANDLE_DRAW_RADIUS_PX * px, 0.0, 2.0 * PI)?;
        ctx.set_fill_style_str(if active_vertex == Some(corner) { HANDLE_FILL_ACTIVE } else { HANDLE_FILL });
        ctx.fill();
        ctx.set_stroke_style_str(if selected { QUAD_STROKE_SELECTED } else { QUAD_STROKE });
        ctx.set_line_width(1.5 * px);
        ctx.stroke();
    }

    // Name above the top edge.
    if let Some(name) = block.name.as_deref().filter(|n| !n.is_empty()) {
        let x = (quad[TL].x + quad[TR].x) / 2.0;
        let y = quad[TL].y.min(quad[TR].y) - 6.0 * px;
        ctx.set_fill_style_str(NAME_FILL);
        ctx.set_text_align("center");
        ctx.set_text_baseline("bottom");
        ctx.set_font(&format!("bold {:.0}px sans-serif", (13.0 * px).max(1.0)));
        ctx.fill_text(name, x, y)?;
    }

    Ok(())
}

fn draw_cells(ctx: &CanvasRenderingContext2d, block: &Block, ratio: f64, px: f64) -> Result<(), JsValue> {
    let grid = block.cells(ratio);
    let radius = grid.radius.max(px);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{:.0}px sans-serif", (radius * 1.1).max(1.0)));

    for (row, centers) in grid.centers.iter().enumerate() {
        for (col, c) in centers.iter().enumerate() {
            let corner = grid.is_corner(row, col);
            ctx.begin_path();
            ctx.arc(c.x, c.y, radius, 0.0, 2.0 * PI)?;
            ctx.set_stroke_style_str(if corner { CELL_STROKE_CORNER } else { CELL_STROKE });
            ctx.set_line_width(if corner { 2.5 * px } else { 1.0 * px });
            ctx.stroke();

            ctx.set_fill_style_str(LABEL_FILL);
            ctx.fill_text(&cell_label(block, row, col), c.x, c.y)?;
        }
    }
    Ok(())
}
