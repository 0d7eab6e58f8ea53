#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::element::ElementDraft;
use crate::view::Point;

fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Element {
    let kind = ElementDraft::rectangle_at(Point::default()).kind;
    ElementDraft::new("Box", Rect::new(x, y, w, h), kind).into_element(Uuid::new_v4())
}

fn find<'a>(elements: &'a [Element], id: &ElementId) -> Option<&'a Element> {
    elements.iter().find(|el| el.id() == *id)
}

// =============================================================
// group
// =============================================================

#[test]
fn group_builds_union_box_with_relative_children() {
    let a = rect_at(10.0, 10.0, 20.0, 20.0);
    let b = rect_at(50.0, 40.0, 30.0, 10.0);
    let ids = [a.id(), b.id()];

    let outcome = group(&[a.clone(), b.clone()], &ids);
    let Some(outcome) = outcome else {
        panic!("two elements should group");
    };

    assert_eq!(outcome.elements.len(), 1);
    let g = &outcome.elements[0];
    assert!(g.is_group());
    assert_eq!(g.base.name, "Group");
    assert_eq!(g.bounds(), Rect::new(10.0, 10.0, 70.0, 40.0));
    assert_eq!(outcome.selection, vec![g.id()]);

    let children = g.children();
    assert_eq!(children[0].bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
    assert_eq!(children[1].bounds(), Rect::new(40.0, 30.0, 30.0, 10.0));
    assert_eq!(children[0].id(), a.id());
}

#[test]
fn group_appends_on_top_and_keeps_others() {
    let bottom = rect_at(0.0, 0.0, 600.0, 350.0);
    let a = rect_at(10.0, 10.0, 20.0, 20.0);
    let top = rect_at(300.0, 10.0, 20.0, 20.0);
    let b = rect_at(50.0, 40.0, 30.0, 10.0);
    let elements = vec![bottom.clone(), a.clone(), top.clone(), b.clone()];

    let Some(outcome) = group(&elements, &[a.id(), b.id()]) else {
        panic!("two elements should group");
    };
    let order: Vec<ElementId> = outcome.elements.iter().map(Element::id).collect();
    assert_eq!(order[..2], [bottom.id(), top.id()]);
    assert!(outcome.elements[2].is_group());
}

#[test]
fn group_requires_two_members() {
    let a = rect_at(10.0, 10.0, 20.0, 20.0);
    assert!(group(std::slice::from_ref(&a), &[a.id()]).is_none());
    assert!(group(std::slice::from_ref(&a), &[a.id(), Uuid::new_v4()]).is_none());
}

// =============================================================
// ungroup
// =============================================================

#[test]
fn ungroup_restores_absolute_positions_with_fresh_ids() {
    let a = rect_at(10.0, 10.0, 20.0, 20.0);
    let b = rect_at(50.0, 40.0, 30.0, 10.0);
    let Some(grouped) = group(&[a.clone(), b.clone()], &[a.id(), b.id()]) else {
        panic!("two elements should group");
    };

    let Some(released) = ungroup(&grouped.elements, &grouped.selection) else {
        panic!("selected group should ungroup");
    };
    assert_eq!(released.elements.len(), 2);
    assert_eq!(released.selection.len(), 2);

    let first = find(&released.elements, &released.selection[0]);
    let second = find(&released.elements, &released.selection[1]);
    assert_eq!(first.map(Element::bounds), Some(a.bounds()));
    assert_eq!(second.map(Element::bounds), Some(b.bounds()));
    assert_ne!(released.selection[0], a.id());
    assert_ne!(released.selection[1], b.id());
}

#[test]
fn ungroup_ignores_non_groups() {
    let a = rect_at(10.0, 10.0, 20.0, 20.0);
    assert!(ungroup(std::slice::from_ref(&a), &[a.id()]).is_none());
}

#[test]
fn nested_groups_round_trip() {
    let a = rect_at(10.0, 10.0, 20.0, 20.0);
    let b = rect_at(50.0, 40.0, 30.0, 10.0);
    let c = rect_at(200.0, 200.0, 10.0, 10.0);

    let Some(inner) = group(&[a.clone(), b.clone(), c.clone()], &[a.id(), b.id()]) else {
        panic!("inner group");
    };
    let inner_id = inner.selection[0];
    let Some(outer) = group(&inner.elements, &[inner_id, c.id()]) else {
        panic!("outer group");
    };

    let Some(step1) = ungroup(&outer.elements, &outer.selection) else {
        panic!("outer ungroup");
    };
    let inner_again = step1.elements.iter().find(|el| el.is_group());
    let Some(inner_again) = inner_again else {
        panic!("inner group should be released intact");
    };
    assert_eq!(inner_again.bounds(), Rect::new(10.0, 10.0, 70.0, 40.0));

    let Some(step2) = ungroup(&step1.elements, &[inner_again.id()]) else {
        panic!("inner ungroup");
    };
    let mut boxes: Vec<Rect> = step2.elements.iter().map(Element::bounds).collect();
    boxes.sort_by(|l, r| l.x.total_cmp(&r.x));
    assert_eq!(boxes, vec![a.bounds(), b.bounds(), c.bounds()]);
}
