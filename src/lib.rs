//! Editor state engine for a fixed-size 2D card layout editor.
//!
//! The crate owns the mutable document (elements, selection, tool and view
//! state), its snapshot-based undo/redo history, and the pure transform and
//! grouping algorithms that operate on it. Rendering, file dialogs and the
//! actual PNG/JPEG/PDF encoders live in the host; they read state from
//! [`doc::DocStore`] and feed pointer/keyboard events into
//! [`engine::EngineCore`], which answers with [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event routing and the [`engine::EngineCore`] gesture driver |
//! | [`doc`] | Document store: element list, selection, tool, view, history |
//! | [`element`] | Element model, drafts and sparse patches |
//! | [`history`] | Capped linear undo/redo snapshot stack |
//! | [`transform`] | Move/resize/rotate math over a captured drag origin |
//! | [`group`] | Group/ungroup with coordinate-space translation |
//! | [`view`] | Camera conversions and view flags (zoom, grid, dark mode) |
//! | [`input`] | Tools, modifiers, keys and the gesture state machine |
//! | [`hit`] | Hit-testing against element bodies and selection handles |
//! | [`import`] | Image decoding and placement for inserted images |
//! | [`export`] | Export snapshot, encoder seam and export session state |
//! | [`template`] | The default business-card template |
//! | [`config`] | Tunable editor settings |
//! | [`consts`] | Shared numeric constants (canvas size, limits, hit radii) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod element;
pub mod engine;
pub mod export;
pub mod group;
pub mod hit;
pub mod history;
pub mod import;
pub mod input;
pub mod template;
pub mod transform;
pub mod view;
