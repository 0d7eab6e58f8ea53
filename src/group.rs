//! Group/ungroup algorithms.
//!
//! Grouping moves the selected top-level elements into a new group element
//! whose box is the union of their boxes; each child is rewritten relative to
//! the group's top-left. Ungrouping adds the group origin back and releases
//! the children to the top level under fresh ids. Nested groups keep their
//! own relative children untouched, so the same rule round-trips at every
//! depth.
//!
//! Both functions are pure: they return the new top-level list and the
//! selection to apply, or `None` when the precondition is not met.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use uuid::Uuid;

use crate::element::{Element, ElementBase, ElementId, ElementKind, GroupProps, Rect};

/// Result of a group or ungroup pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    /// New top-level element list.
    pub elements: Vec<Element>,
    /// Selection to apply after the change.
    pub selection: Vec<ElementId>,
}

/// Group every element of `elements` whose id is in `selected`.
///
/// Returns `None` when fewer than two selected ids resolve to top-level elements.
#[must_use]
pub fn group(elements: &[Element], selected: &[ElementId]) -> Option<GroupOutcome> {
    let members: Vec<&Element> = elements.iter().filter(|el| selected.contains(&el.id())).collect();
    if members.len() < 2 {
        return None;
    }

    let bounds = members
        .iter()
        .map(|el| el.bounds())
        .reduce(|acc, b| acc.union(&b))?;

    let children: Vec<Element> = members
        .iter()
        .map(|el| {
            let mut child = (*el).clone();
            child.base.x -= bounds.x;
            child.base.y -= bounds.y;
            child
        })
        .collect();

    let group = new_group(bounds, children);
    let group_id = group.id();

    let mut next: Vec<Element> = elements.iter().filter(|el| !selected.contains(&el.id())).cloned().collect();
    next.push(group);

    Some(GroupOutcome { elements: next, selection: vec![group_id] })
}

/// Ungroup every selected group; non-group selections are ignored.
///
/// Returns `None` when no selected element is a group.
#[must_use]
pub fn ungroup(elements: &[Element], selected: &[ElementId]) -> Option<GroupOutcome> {
    let groups: Vec<&Element> = elements
        .iter()
        .filter(|el| el.is_group() && selected.contains(&el.id()))
        .collect();
    if groups.is_empty() {
        return None;
    }

    let mut next: Vec<Element> = elements
        .iter()
        .filter(|el| !(el.is_group() && selected.contains(&el.id())))
        .cloned()
        .collect();
    let mut selection = Vec::new();

    for group in groups {
        for child in group.children() {
            let mut released = child.with_fresh_id();
            released.base.x += group.base.x;
            released.base.y += group.base.y;
            selection.push(released.id());
            next.push(released);
        }
    }

    Some(GroupOutcome { elements: next, selection })
}

fn new_group(bounds: Rect, children: Vec<Element>) -> Element {
    Element {
        base: ElementBase {
            id: Uuid::new_v4(),
            name: "Group".into(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
        },
        kind: ElementKind::Group(GroupProps { children }),
    }
}
