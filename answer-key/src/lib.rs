//! Answer-key editing core for OMR answer sheets.
//!
//! Builds the ordered question slots for an exam subject (from a subject
//! preset or, failing that, from a [`canvas::doc::Layout`]), edits answers and
//! scores slot by slot with per-elective caching, and saves the result to the
//! grading backend behind an overwrite confirmation. UI hosts drive an
//! [`editor::AnswerEditor`] and supply an [`api::AnswerKeyBackend`] plus a
//! [`gate::OverwriteConfirm`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | `AnswerEditor`: init state machine, slot edits, save/delete flows |
//! | [`items`] | Subject presets and layout-derived question items |
//! | [`subject`] | Subject families and elective catalogs |
//! | [`sections`] | Grouping of slots into input controls |
//! | [`entry`] | Normalization of typed answers and scores |
//! | [`cache`] | Per-elective slot snapshots |
//! | [`payload`] | Wire types, answer classification, payload builder |
//! | [`csv`] | `q,answer,score` import and export |
//! | [`gate`] | Overwrite confirmation before destructive writes |
//! | [`api`] | Backend trait and reqwest client |
//! | [`config`] | Backend URL and timeouts from the environment |
//! | [`session`] | Grading session state and events |
//! | [`error`] | Error enums and stable error codes |

pub mod api;
pub mod cache;
pub mod config;
pub mod csv;
pub mod editor;
pub mod entry;
pub mod error;
pub mod gate;
pub mod items;
pub mod payload;
pub mod sections;
pub mod session;
pub mod subject;
