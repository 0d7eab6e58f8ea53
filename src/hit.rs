#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::element::{Element, ElementId, rotate_about};
use crate::transform::ResizeHandle;
use crate::view::{Camera, Point};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
    RotateHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `canvas_pt`.
///
/// Handles of a single selected element are checked first, then element
/// bodies from the top layer down. Hidden elements are never hit.
#[must_use]
pub fn hit_test(canvas_pt: Point, elements: &[Element], camera: &Camera, selected: &[ElementId]) -> Option<Hit> {
    if let [only] = selected
        && let Some(el) = elements.iter().find(|el| el.id() == *only && el.base.visible)
        && let Some(part) = handle_at(canvas_pt, el, camera)
    {
        return Some(Hit { element_id: el.id(), part });
    }

    elements
        .iter()
        .rev()
        .find(|el| el.base.visible && el.contains_point(canvas_pt))
        .map(|el| Hit { element_id: el.id(), part: HitPart::Body })
}

/// The rotate or resize handle of `el` under `canvas_pt`, if any.
#[must_use]
pub fn handle_at(canvas_pt: Point, el: &Element, camera: &Camera) -> Option<HitPart> {
    let radius = camera.screen_dist_to_canvas(HANDLE_RADIUS_PX);
    let within = |p: Point| (p.x - canvas_pt.x).hypot(p.y - canvas_pt.y) <= radius;

    if within(rotate_handle_position(el, camera)) {
        return Some(HitPart::RotateHandle);
    }
    ResizeHandle::ALL
        .into_iter()
        .find(|h| within(handle_position(el, *h)))
        .map(HitPart::ResizeHandle)
}

/// Canvas position of a resize handle, following the element's rotation.
#[must_use]
pub fn handle_position(el: &Element, handle: ResizeHandle) -> Point {
    let b = el.bounds();
    let (fx, fy) = handle.anchor_fraction();
    let unrotated = Point::new(b.x + b.width * fx, b.y + b.height * fy);
    rotate_about(unrotated, b.center(), el.base.rotation)
}

/// Canvas position of the rotate handle, a fixed screen distance above the top edge.
#[must_use]
pub fn rotate_handle_position(el: &Element, camera: &Camera) -> Point {
    let b = el.bounds();
    let offset = camera.screen_dist_to_canvas(ROTATE_HANDLE_OFFSET_PX);
    let unrotated = Point::new(b.x + b.width / 2.0, b.y - offset);
    rotate_about(unrotated, b.center(), el.base.rotation)
}
