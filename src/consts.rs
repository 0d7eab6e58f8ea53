//! Shared numeric constants for the editor crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Width of the card canvas in logical units.
pub const CANVAS_WIDTH: f64 = 600.0;

/// Height of the card canvas in logical units.
pub const CANVAS_HEIGHT: f64 = 350.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of retained undo snapshots.
pub const HISTORY_LIMIT: usize = 50;

// ── Transforms ──────────────────────────────────────────────────

/// Minimum width/height enforced while a resize drag is in progress.
pub const MIN_RESIZE_SIZE: f64 = 20.0;

/// Rotation snap increment in degrees when the snap modifier is held.
pub const ROTATION_SNAP_DEG: f64 = 45.0;

/// Offset added to the pointer angle so 0° is the handle's resting position above the element.
pub const ROTATION_HANDLE_OFFSET_DEG: f64 = 90.0;

/// Arrow-key nudge distance.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key nudge distance with shift held.
pub const NUDGE_STEP_FAST: f64 = 10.0;

/// Offset from the click point to the top-left of a tool-created element.
pub const CREATE_OFFSET_X: f64 = 50.0;

/// Offset from the click point to the top-left of a tool-created element.
pub const CREATE_OFFSET_Y: f64 = 25.0;

// ── View ────────────────────────────────────────────────────────

/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 0.25;

/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom change per zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 0.25;

/// Default grid spacing.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the bounding box top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Import / export ─────────────────────────────────────────────

/// Largest width or height of an inserted image before it is scaled down.
pub const IMAGE_MAX_DIMENSION: f64 = 300.0;

/// JPEG encoder quality (0.0 to 1.0).
pub const JPEG_QUALITY: f64 = 0.95;

/// Multiplier applied to the device pixel ratio for export rasterization.
pub const EXPORT_PIXEL_RATIO_FACTOR: f64 = 2.0;
