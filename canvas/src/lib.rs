//! Answer-sheet layout editor: geometry, document model, and canvas controller.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! bubble-sheet [`doc::Layout`] while an operator adjusts it against a scanned
//! page: translating raw DOM input events into layout mutations, keeping a
//! bounded undo/redo history, hit-testing block corners and interiors, and
//! drawing the interpolated bubble grid over the scan. The host JavaScript
//! layer only wires DOM events to the engine and persists the resulting
//! [`engine::Action::LayoutChanged`] documents.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Layout document, blocks, and choice normalization |
//! | [`geom`] | Pure quad interpolation, point-in-quad, and handle/poly hit math |
//! | [`camera`] | Letterboxed image fit and screen/image coordinate conversion |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Prioritised pointer hit test (handle before body) |
//! | [`history`] | Bounded undo/redo stacks |
//! | [`render`] | Scene rendering onto a 2D context |
//! | [`consts`] | Shared constants (handle radius, nudge steps, colors) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
