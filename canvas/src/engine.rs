use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::FitView;
use crate::consts::{HANDLE_RADIUS_PX, NUDGE_FINE_PX, NUDGE_PX};
use crate::doc::Layout;
use crate::geom::{Point, translate_quad};
use crate::history::History;
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The layout changed; the host persists or forwards the new document.
    LayoutChanged(Layout),
    /// Block/vertex selection changed.
    SelectionChanged { block: Option<usize>, vertex: Option<usize> },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub layout: Layout,
    pub ui: UiState,
    pub input: InputState,
    pub history: History<Layout>,
    pub view: FitView,
    pub read_only: bool,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Layout::new(0.0, 0.0))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(mut layout: Layout) -> Self {
        layout.normalize_choices();
        Self {
            layout,
            ui: UiState::default(),
            input: InputState::Idle,
            history: History::new(),
            view: FitView::default(),
            read_only: false,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Replace the layout from outside (new scan, reload, owner edit).
    ///
    /// Owner-injected layouts are not undoable: both history stacks are reset.
    pub fn set_layout(&mut self, mut layout: Layout) -> Vec<Action> {
        let normalized = layout.normalize_choices();
        self.layout = layout;
        self.history.clear();
        self.input = InputState::Idle;
        self.clamp_selection();
        self.refit();
        log::debug!("layout replaced externally ({} blocks)", self.layout.blocks.len());

        let mut actions = Vec::new();
        if normalized {
            actions.push(Action::LayoutChanged(self.layout.clone()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record the natural size of the loaded scan, correcting `layout.canvas` when it disagrees.
    pub fn set_image_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if width > 0.0 && height > 0.0 && self.layout.fit_canvas_to_image(width, height) {
            log::debug!("layout canvas corrected to {width}x{height}");
            actions.push(Action::LayoutChanged(self.layout.clone()));
        }
        self.refit();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.refit();
        vec![Action::RenderNeeded]
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.input = InputState::Idle;
        }
    }

    fn refit(&mut self) {
        self.view = FitView::fit(
            self.layout.canvas.width,
            self.layout.canvas.height,
            self.viewport_width,
            self.viewport_height,
        );
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.read_only || button != Button::Primary {
            return Vec::new();
        }
        let pt = self.view.screen_to_image(screen_pt);
        let radius = self.view.screen_dist_to_image(HANDLE_RADIUS_PX);

        match hit::hit_test(pt, &self.layout, radius) {
            Some(h) => {
                let Some(block) = self.layout.blocks.get(h.block) else {
                    return Vec::new();
                };
                let orig_quad = block.quad;
                self.history.record(self.layout.clone());
                match h.part {
                    HitPart::Vertex(corner) => {
                        self.ui = UiState { selected_block: Some(h.block), active_vertex: Some(corner) };
                        self.input = InputState::DraggingVertex {
                            block: h.block,
                            corner,
                            offset: orig_quad[corner].sub(pt),
                        };
                    }
                    HitPart::Body => {
                        self.ui = UiState { selected_block: Some(h.block), active_vertex: None };
                        self.input = InputState::DraggingBlock { block: h.block, start: pt, orig_quad };
                    }
                }
                vec![self.selection_action(), Action::SetCursor("grabbing".into()), Action::RenderNeeded]
            }
            None => {
                self.ui = UiState::default();
                self.input = InputState::Idle;
                vec![self.selection_action(), Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let pt = self.view.screen_to_image(screen_pt);
        match self.input {
            InputState::Idle => {
                if self.read_only {
                    return Vec::new();
                }
                let radius = self.view.screen_dist_to_image(HANDLE_RADIUS_PX);
                let cursor = match hit::hit_test(pt, &self.layout, radius).map(|h| h.part) {
                    Some(HitPart::Vertex(_)) => "crosshair",
                    Some(HitPart::Body) => "move",
                    None => "default",
                };
                vec![Action::SetCursor(cursor.into())]
            }
            InputState::DraggingVertex { block, corner, offset } => {
                let Some(b) = self.layout.blocks.get_mut(block) else {
                    return Vec::new();
                };
                b.quad[corner] = pt.add(offset);
                self.layout_changed()
            }
            InputState::DraggingBlock { block, start, orig_quad } => {
                let Some(b) = self.layout.blocks.get_mut(block) else {
                    return Vec::new();
                };
                b.quad = translate_quad(&orig_quad, pt.sub(start));
                self.layout_changed()
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::SetCursor("default".into()), Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.read_only {
            return Vec::new();
        }

        if modifiers.command() {
            if key.is_letter('z') {
                return if modifiers.shift { self.redo() } else { self.undo() };
            }
            if key.is_letter('y') {
                return self.redo();
            }
            return Vec::new();
        }

        let Some(selected) = self.ui.selected_block else {
            return Vec::new();
        };
        if selected >= self.layout.blocks.len() {
            return Vec::new();
        }

        if let Some((dx, dy)) = key.arrow_direction() {
            let step = if modifiers.shift { NUDGE_FINE_PX } else { NUDGE_PX };
            let delta = Point::new(dx * step, dy * step);
            self.history.record(self.layout.clone());
            let block = &mut self.layout.blocks[selected];
            match self.ui.active_vertex {
                Some(corner) if corner < block.quad.len() => block.quad[corner] = block.quad[corner].add(delta),
                _ => block.translate(delta),
            }
            return self.layout_changed();
        }

        if key.is_delete() {
            self.history.record(self.layout.clone());
            self.layout.blocks.remove(selected);
            self.ui = UiState::default();
            self.input = InputState::Idle;
            let mut actions = self.layout_changed();
            actions.insert(0, self.selection_action());
            return actions;
        }

        Vec::new()
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        let Some(previous) = self.history.undo(self.layout.clone()) else {
            return Vec::new();
        };
        log::debug!("undo ({} left)", self.history.undo_len());
        self.restore(previous)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let Some(next) = self.history.redo(self.layout.clone()) else {
            return Vec::new();
        };
        log::debug!("redo ({} left)", self.history.redo_len());
        self.restore(next)
    }

    fn restore(&mut self, layout: Layout) -> Vec<Action> {
        self.layout = layout;
        self.input = InputState::Idle;
        self.clamp_selection();
        self.layout_changed()
    }

    // --- Helpers ---

    fn layout_changed(&mut self) -> Vec<Action> {
        self.layout.normalize_choices();
        vec![Action::LayoutChanged(self.layout.clone()), Action::RenderNeeded]
    }

    fn clamp_selection(&mut self) {
        if self.ui.selected_block.is_some_and(|b| b >= self.layout.blocks.len()) {
            self.ui = UiState::default();
        }
    }

    fn selection_action(&self) -> Action {
        Action::SelectionChanged { block: self.ui.selected_block, vertex: self.ui.active_vertex }
    }

    // --- Queries ---

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.ui.selected_block
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas and scan image.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, layout: Layout) -> Self {
        Self { canvas, image: None, core: EngineCore::new(layout) }
    }

    // --- Delegated data inputs ---

    pub fn set_layout(&mut self, layout: Layout) -> Vec<Action> {
        self.core.set_layout(layout)
    }

    /// Attach a loaded scan image; its natural size becomes the layout canvas size.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let width = f64::from(image.natural_width());
        let height = f64::from(image.natural_height());
        self.image = Some(image);
        self.core.set_image_size(width, height)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.core.set_read_only(read_only);
    }

    /// Update viewport dimensions and resize the backing store for the device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * self.core.dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * self.core.dpr).round().max(0.0) as u32);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.core.redo()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, self.image.as_ref(), &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn layout(&self) -> &Layout {
        self.core.layout()
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.core.selection()
    }
}
