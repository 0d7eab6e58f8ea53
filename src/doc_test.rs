#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{ElementKind, Rect};
use crate::template::business_card;

fn rect_draft(x: f64, y: f64, w: f64, h: f64) -> ElementDraft {
    let kind = ElementDraft::rectangle_at(Point::default()).kind;
    ElementDraft::new("Box", Rect::new(x, y, w, h), kind)
}

fn add_rect(store: &mut DocStore, x: f64, y: f64, w: f64, h: f64) -> ElementId {
    store.add_element(rect_draft(x, y, w, h)).unwrap()
}

fn ids(store: &DocStore) -> Vec<ElementId> {
    store.elements().iter().map(Element::id).collect()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_store_is_empty_with_defaults() {
    let store = DocStore::new();
    assert!(store.is_empty());
    assert!(store.selection().is_empty());
    assert_eq!(store.tool(), Tool::Select);
    assert_eq!(store.view().zoom, 1.0);
    assert!(!store.can_undo());
    assert!(!store.can_redo());
    assert_eq!(store.history().len(), 1);
}

#[test]
fn with_elements_seeds_first_snapshot() {
    let store = DocStore::with_elements(business_card());
    assert_eq!(store.len(), 8);
    assert_eq!(store.history().len(), 1);
    assert!(!store.can_undo());
}

#[test]
fn with_config_applies_grid_and_history_limit() {
    let config = EditorConfig { history_limit: 3, grid_size: 8.0, ..EditorConfig::default() };
    let mut store = DocStore::with_config(Vec::new(), config);
    assert_eq!(store.view().grid_size, 8.0);
    for i in 0..10 {
        add_rect(&mut store, f64::from(i), 0.0, 10.0, 10.0);
    }
    assert_eq!(store.history().len(), 3);
}

// =============================================================
// add_element
// =============================================================

#[test]
fn add_selects_new_element_and_resets_tool() {
    let mut store = DocStore::new();
    store.set_tool(Tool::Rectangle);
    let id = add_rect(&mut store, 10.0, 10.0, 50.0, 50.0);

    assert_eq!(store.selection(), &[id]);
    assert_eq!(store.tool(), Tool::Select);
    assert_eq!(store.elements().last().map(Element::id), Some(id));
    assert!(store.can_undo());
}

#[test]
fn add_assigns_unique_ids() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    assert_ne!(a, b);
    assert_eq!(store.selection(), &[b]);
}

#[test]
fn malformed_draft_is_rejected() {
    let mut store = DocStore::new();
    let mut draft = rect_draft(0.0, 0.0, 10.0, 10.0);
    draft.height = f64::INFINITY;
    assert!(store.add_element(draft).is_none());
    assert!(store.is_empty());
    assert!(!store.can_undo());
}

// =============================================================
// Updates
// =============================================================

#[test]
fn update_element_records_no_history() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let before = store.history().len();

    assert!(store.update_element(&id, &ElementPatch::position(5.0, 6.0)));
    assert_eq!(store.get(&id).map(Element::bounds), Some(Rect::new(5.0, 6.0, 10.0, 10.0)));
    assert_eq!(store.history().len(), before);
}

#[test]
fn update_with_history_records_one_snapshot() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let before = store.history().len();

    let patch = ElementPatch { fill: Some("#ff0000".into()), ..Default::default() };
    assert!(store.update_element_with_history(&id, &patch));
    assert_eq!(store.history().len(), before + 1);
}

#[test]
fn update_unknown_id_is_noop() {
    let mut store = DocStore::new();
    add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let before = store.history().len();
    let ghost = Uuid::new_v4();

    assert!(!store.update_element(&ghost, &ElementPatch::position(1.0, 1.0)));
    assert!(!store.update_element_with_history(&ghost, &ElementPatch::position(1.0, 1.0)));
    assert!(!store.commit_element(&ghost));
    assert_eq!(store.history().len(), before);
}

#[test]
fn live_edits_then_commit_is_one_undo_step() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    for step in 1..=5 {
        store.move_element(&id, f64::from(step) * 10.0, 0.0);
    }
    store.commit_element(&id);
    assert_eq!(store.get(&id).map(|el| el.base.x), Some(50.0));

    assert!(store.undo());
    assert_eq!(store.get(&id).map(|el| el.base.x), Some(0.0));
}

#[test]
fn resize_with_origin_repositions() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 10.0, 10.0, 50.0, 50.0);
    assert!(store.resize_element(&id, 80.0, 30.0, Some(Point::new(0.0, 5.0))));
    assert_eq!(store.get(&id).map(Element::bounds), Some(Rect::new(0.0, 5.0, 80.0, 30.0)));
    assert!(store.resize_element(&id, 40.0, 40.0, None));
    assert_eq!(store.get(&id).map(Element::bounds), Some(Rect::new(0.0, 5.0, 40.0, 40.0)));
}

#[test]
fn rotation_is_stored_unnormalized() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    store.rotate_element(&id, -30.0);
    assert_eq!(store.get(&id).map(|el| el.base.rotation), Some(-30.0));
    store.rotate_element(&id, 400.0);
    assert_eq!(store.get(&id).map(|el| el.base.rotation), Some(400.0));
}

// =============================================================
// Locking
// =============================================================

#[test]
fn locked_element_ignores_geometry_edits() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 10.0, 10.0, 50.0, 50.0);
    store.update_element_with_history(&id, &ElementPatch { locked: Some(true), ..Default::default() });
    let before = store.get(&id).map(Element::bounds);

    assert!(!store.move_element(&id, 100.0, 100.0));
    assert!(!store.resize_element(&id, 5.0, 5.0, None));
    assert!(!store.rotate_element(&id, 45.0));
    store.select_element(&id, false);
    assert_eq!(store.nudge_selection(10.0, 0.0), 0);

    assert_eq!(store.get(&id).map(Element::bounds), before);
    assert_eq!(store.get(&id).map(|el| el.base.rotation), Some(0.0));
}

#[test]
fn locked_element_survives_delete() {
    let mut store = DocStore::new();
    let locked = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let free = add_rect(&mut store, 20.0, 0.0, 10.0, 10.0);
    store.update_element(&locked, &ElementPatch { locked: Some(true), ..Default::default() });

    assert_eq!(store.delete_elements(&[locked, free]), 1);
    assert_eq!(ids(&store), vec![locked]);
}

#[test]
fn locked_element_still_accepts_property_edits() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    store.update_element(&id, &ElementPatch { locked: Some(true), ..Default::default() });

    let patch = ElementPatch { fill: Some("#000000".into()), ..Default::default() };
    assert!(store.update_element_with_history(&id, &patch));
    let fill = match store.get(&id).map(|el| &el.kind) {
        Some(ElementKind::Rectangle(shape)) => shape.fill.clone(),
        _ => String::new(),
    };
    assert_eq!(fill, "#000000");
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_prunes_selection() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut store, 20.0, 0.0, 10.0, 10.0);
    store.select_element(&a, true);
    assert_eq!(store.selection().len(), 2);

    assert_eq!(store.delete_elements(&[a]), 1);
    assert_eq!(store.selection(), &[b]);
    assert!(store.get(&a).is_none());
}

#[test]
fn delete_nothing_records_nothing() {
    let mut store = DocStore::new();
    add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let before = store.history().len();
    assert_eq!(store.delete_elements(&[Uuid::new_v4()]), 0);
    assert_eq!(store.history().len(), before);
}

// =============================================================
// Nudge / reorder
// =============================================================

#[test]
fn nudge_moves_selection_with_one_snapshot() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut store, 20.0, 0.0, 10.0, 10.0);
    store.select_element(&a, true);
    let before = store.history().len();

    assert_eq!(store.nudge_selection(0.0, 10.0), 2);
    assert_eq!(store.get(&a).map(|el| el.base.y), Some(10.0));
    assert_eq!(store.get(&b).map(|el| el.base.y), Some(10.0));
    assert_eq!(store.history().len(), before + 1);
}

#[test]
fn reorder_moves_bottom_to_top() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let c = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);

    assert!(store.reorder_layers(0, 2));
    assert_eq!(ids(&store), vec![b, c, a]);
}

#[test]
fn reorder_out_of_range_is_ignored() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let before = store.history().len();

    assert!(!store.reorder_layers(0, 5));
    assert!(!store.reorder_layers(7, 0));
    assert!(store.reorder_layers(1, 1));
    assert_eq!(ids(&store), vec![a, b]);
    assert_eq!(store.history().len(), before);
}

#[test]
fn layer_index_from_top_reverses() {
    let mut store = DocStore::new();
    for _ in 0..3 {
        add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    }
    assert_eq!(store.layer_index_from_top(0), Some(2));
    assert_eq!(store.layer_index_from_top(2), Some(0));
    assert_eq!(store.layer_index_from_top(3), None);
    assert_eq!(store.layer_index_from_top(usize::MAX), None);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_replaces_or_toggles() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);

    store.select_element(&a, false);
    assert_eq!(store.selection(), &[a]);
    store.select_element(&b, true);
    assert_eq!(store.selection(), &[a, b]);
    store.select_element(&a, true);
    assert_eq!(store.selection(), &[b]);
    store.clear_selection();
    assert!(store.selection().is_empty());
}

#[test]
fn select_unknown_id_is_noop() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    store.select_element(&Uuid::new_v4(), false);
    assert_eq!(store.selection(), &[a]);
}

// =============================================================
// Grouping
// =============================================================

#[test]
fn group_then_ungroup_restores_positions() {
    let mut store = DocStore::new();
    let a = add_rect(&mut store, 10.0, 10.0, 20.0, 20.0);
    let b = add_rect(&mut store, 50.0, 40.0, 30.0, 10.0);
    store.select_element(&a, true);

    let group_id = store.group_selection().unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.selection(), &[group_id]);
    assert_eq!(store.get(&group_id).map(Element::bounds), Some(Rect::new(10.0, 10.0, 70.0, 40.0)));

    let released = store.ungroup_selection();
    assert_eq!(released.len(), 2);
    assert_eq!(store.selection(), released.as_slice());
    let boxes: Vec<Rect> = store.elements().iter().map(Element::bounds).collect();
    assert_eq!(boxes, vec![Rect::new(10.0, 10.0, 20.0, 20.0), Rect::new(50.0, 40.0, 30.0, 10.0)]);
    assert!(!released.contains(&a) && !released.contains(&b));
}

#[test]
fn group_with_single_selection_is_noop() {
    let mut store = DocStore::new();
    add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    let before = store.history().len();
    assert!(store.group_selection().is_none());
    assert!(store.ungroup_selection().is_empty());
    assert_eq!(store.history().len(), before);
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn undo_redo_round_trip() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    store.update_element_with_history(&id, &ElementPatch::position(30.0, 30.0));
    let after = store.elements().to_vec();

    assert!(store.undo());
    assert_eq!(store.get(&id).map(|el| el.base.x), Some(0.0));
    assert!(store.redo());
    assert_eq!(store.elements(), after.as_slice());
    assert!(!store.redo());
}

#[test]
fn undo_prunes_selection_of_vanished_elements() {
    let mut store = DocStore::new();
    let id = add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    assert_eq!(store.selection(), &[id]);

    assert!(store.undo());
    assert!(store.is_empty());
    assert!(store.selection().is_empty());
    assert!(!store.undo());
}

#[test]
fn new_edit_after_undo_cuts_redo_branch() {
    let mut store = DocStore::new();
    add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    store.undo();
    assert!(store.can_redo());

    add_rect(&mut store, 0.0, 0.0, 10.0, 10.0);
    assert!(!store.can_redo());
}

#[test]
fn history_is_bounded_after_many_operations() {
    let mut store = DocStore::new();
    for i in 0..80 {
        add_rect(&mut store, f64::from(i), 0.0, 10.0, 10.0);
    }
    assert_eq!(store.history().len(), 50);

    let mut undos = 0;
    while store.undo() {
        undos += 1;
    }
    assert_eq!(undos, 49);
    // The empty initial document was evicted; 31 elements remain at the oldest entry.
    assert_eq!(store.len(), 31);
}

// =============================================================
// View
// =============================================================

#[test]
fn view_setters() {
    let mut store = DocStore::new();
    store.zoom_in();
    assert_eq!(store.view().zoom, 1.25);
    store.set_zoom(0.1);
    assert_eq!(store.view().zoom, 0.25);
    store.reset_zoom();
    store.zoom_out();
    assert_eq!(store.view().zoom, 0.75);

    store.toggle_grid();
    assert!(store.view().show_grid);
    store.set_show_grid(false);
    assert!(!store.view().show_grid);
    store.set_grid_size(40.0);
    assert_eq!(store.view().grid_size, 40.0);

    store.toggle_dark_mode();
    assert!(store.view().dark_mode);
    store.set_dark_mode(false);
    assert!(!store.view().dark_mode);
}
