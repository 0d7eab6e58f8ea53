//! Pointer-driven move/resize/rotate math.
//!
//! Every function here is pure: it takes the geometry captured at pointer-down
//! ([`DragOrigin`]) plus the cumulative pointer delta since then, and returns
//! candidate geometry. Replaying the same delta always yields the same result.
//! The caller applies the result through the store's live update path during
//! the drag and commits one history snapshot at pointer-up.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{ROTATION_HANDLE_OFFSET_DEG, ROTATION_SNAP_DEG};
use crate::element::{Element, Rect};
use crate::view::Point;

/// Geometry of an element captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl DragOrigin {
    #[must_use]
    pub fn of(element: &Element) -> Self {
        Self {
            x: element.base.x,
            y: element.base.y,
            width: element.base.width,
            height: element.base.height,
            rotation: element.base.rotation,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] =
        [Self::Nw, Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W];

    /// Whether the handle sits on a corner (aspect lock only applies to corners).
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Position of the handle on `rect` as fractions of width and height.
    #[must_use]
    pub fn anchor_fraction(self) -> (f64, f64) {
        match self {
            Self::Nw => (0.0, 0.0),
            Self::N => (0.5, 0.0),
            Self::Ne => (1.0, 0.0),
            Self::E => (1.0, 0.5),
            Self::Se => (1.0, 1.0),
            Self::S => (0.5, 1.0),
            Self::Sw => (0.0, 1.0),
            Self::W => (0.0, 0.5),
        }
    }

    /// CSS cursor name shown while hovering or dragging the handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }
}

/// Convert a screen-space pointer delta to canvas units at `zoom`.
#[must_use]
pub fn canvas_delta(screen_delta: Point, zoom: f64) -> Point {
    Point::new(screen_delta.x / zoom, screen_delta.y / zoom)
}

/// New top-left position for a move gesture.
#[must_use]
pub fn translate(origin: &DragOrigin, delta: Point) -> Point {
    Point::new(origin.x + delta.x, origin.y + delta.y)
}

/// New bounds for a resize gesture on `handle`.
///
/// Moving sides are clamped so neither dimension drops below `min_size`; for
/// handles on the near side (north/west) the origin shifts so the far edge
/// stays put. With `keep_aspect` on a corner handle, the axis with the larger
/// absolute delta drives and the other is derived from the start aspect
/// ratio.
#[must_use]
pub fn resize(origin: &DragOrigin, handle: ResizeHandle, delta: Point, keep_aspect: bool, min_size: f64) -> Rect {
    let mut width = origin.width;
    let mut height = origin.height;

    if handle.moves_right() {
        width = (origin.width + delta.x).max(min_size);
    } else if handle.moves_left() {
        width = (origin.width - delta.x).max(min_size);
    }
    if handle.moves_bottom() {
        height = (origin.height + delta.y).max(min_size);
    } else if handle.moves_top() {
        height = (origin.height - delta.y).max(min_size);
    }

    if keep_aspect && handle.is_corner() && origin.width > 0.0 && origin.height > 0.0 {
        let aspect = origin.width / origin.height;
        if delta.x.abs() > delta.y.abs() {
            height = width / aspect;
        } else {
            width = height * aspect;
        }
        let scale = (min_size / width).max(min_size / height).max(1.0);
        width *= scale;
        height *= scale;
    }

    let x = if handle.moves_left() { origin.x + origin.width - width } else { origin.x };
    let y = if handle.moves_top() { origin.y + origin.height - height } else { origin.y };
    Rect::new(x, y, width, height)
}

/// Rotation in degrees for a pointer at `pointer` rotating around `center`.
///
/// 0° corresponds to the pointer straight above the center. With `snap`, the
/// result is rounded to the nearest 45° multiple.
#[must_use]
pub fn rotation_for_pointer(center: Point, pointer: Point, snap: bool) -> f64 {
    let angle = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees() + ROTATION_HANDLE_OFFSET_DEG;
    if snap {
        (angle / ROTATION_SNAP_DEG).round() * ROTATION_SNAP_DEG
    } else {
        angle
    }
}

/// Map an angle into `[0, 360)` for display. Stored rotations are never normalized.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}
