//! Document store: the element list, selection, active tool, view flags, and history.
//!
//! `DocStore` is the only write path for editor state. Renderers and panels
//! read through the query methods and call back into the mutation methods;
//! they never touch elements directly.
//!
//! Mutations come in two flavours:
//!
//! - **Live** (`update_element`, `move_element`, `resize_element`,
//!   `rotate_element`) apply immediately and never snapshot. They serve
//!   continuous edits such as an in-progress drag or live text typing.
//! - **Committing** (`update_element_with_history`, `commit_element`, add,
//!   delete, reorder, group, ungroup, nudge) apply and then record exactly one
//!   history snapshot.
//!
//! References to unknown ids are silent no-ops everywhere: UI events can race
//! against a deletion that already happened.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EditorConfig;
use crate::element::{Element, ElementDraft, ElementId, ElementPatch};
use crate::group;
use crate::history::History;
use crate::input::Tool;
use crate::view::{Point, ViewState};

/// In-memory editor document.
#[derive(Debug, Clone)]
pub struct DocStore {
    /// Top-level elements; index 0 is the bottom layer.
    elements: Vec<Element>,
    /// Selected ids, always a subset of the top-level ids.
    selection: Vec<ElementId>,
    tool: Tool,
    view: ViewState,
    history: History,
    config: EditorConfig,
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocStore {
    /// Create an empty document with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Vec::new(), EditorConfig::default())
    }

    /// Create a document seeded with `elements` (e.g. a template).
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self::with_config(elements, EditorConfig::default())
    }

    /// Create a document seeded with `elements` using `config`.
    /// The initial state is the first history snapshot.
    #[must_use]
    pub fn with_config(elements: Vec<Element>, config: EditorConfig) -> Self {
        let mut view = ViewState::default();
        view.set_grid_size(config.grid_size);
        Self {
            history: History::new(elements.clone(), config.history_limit),
            elements,
            selection: Vec::new(),
            tool: Tool::default(),
            view,
            config,
        }
    }

    // --- Queries ---

    /// All top-level elements in z-order (bottom first).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == *id)
    }

    /// Position of `id` in the z-order list.
    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id() == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Selected elements in z-order.
    #[must_use]
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.elements.iter().filter(|el| self.selection.contains(&el.id())).collect()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Convert a position in a top-first layer list into the canonical z-order index.
    #[must_use]
    pub fn layer_index_from_top(&self, top_first_index: usize) -> Option<usize> {
        top_first_index.checked_add(1).and_then(|n| self.elements.len().checked_sub(n))
    }

    // --- Element mutations ---

    /// Assign a fresh id to `draft`, append it on top, select it exclusively,
    /// switch back to the select tool, and record history.
    ///
    /// Malformed drafts (non-finite geometry, negative size, opacity outside
    /// `0..=1`) are dropped and `None` is returned.
    pub fn add_element(&mut self, draft: ElementDraft) -> Option<ElementId> {
        if !draft.is_well_formed() {
            warn!(name = %draft.name, "rejected malformed element draft");
            return None;
        }
        let id = Uuid::new_v4();
        let element = draft.into_element(id);
        debug!(%id, kind = ?element.element_type(), "element added");
        self.elements.push(element);
        self.selection = vec![id];
        self.tool = Tool::Select;
        self.record();
        Some(id)
    }

    /// Merge `patch` into the element with `id` without recording history.
    /// Returns `false` if the element doesn't exist.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|el| el.id() == *id) else {
            return false;
        };
        patch.apply(element);
        true
    }

    /// Merge `patch` into the element with `id` and record history.
    /// Returns `false` (recording nothing) if the element doesn't exist.
    pub fn update_element_with_history(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        if !self.update_element(id, patch) {
            return false;
        }
        debug!(%id, "element updated");
        self.record();
        true
    }

    /// Record a snapshot for edits already applied to `id` through the live path.
    pub fn commit_element(&mut self, id: &ElementId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        debug!(%id, "element edit committed");
        self.record();
        true
    }

    /// Remove every unlocked element whose id is in `ids`, drop them from the
    /// selection, and record history. Returns the number removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let before = self.elements.len();
        self.elements.retain(|el| el.base.locked || !ids.contains(&el.id()));
        let removed = before - self.elements.len();
        if removed == 0 {
            return 0;
        }
        self.prune_selection();
        debug!(count = removed, "elements deleted");
        self.record();
        removed
    }

    /// Live move. No-op for locked or unknown elements.
    pub fn move_element(&mut self, id: &ElementId, x: f64, y: f64) -> bool {
        self.update_unlocked(id, &ElementPatch::position(x, y))
    }

    /// Live resize, optionally repositioning the origin. No-op for locked or unknown elements.
    pub fn resize_element(&mut self, id: &ElementId, width: f64, height: f64, origin: Option<Point>) -> bool {
        let mut patch = ElementPatch::size(width, height);
        if let Some(p) = origin {
            patch.x = Some(p.x);
            patch.y = Some(p.y);
        }
        self.update_unlocked(id, &patch)
    }

    /// Live rotate. No-op for locked or unknown elements.
    pub fn rotate_element(&mut self, id: &ElementId, rotation: f64) -> bool {
        self.update_unlocked(id, &ElementPatch::rotation(rotation))
    }

    /// Move every selected, unlocked element by `(dx, dy)` and record one snapshot.
    /// Returns the number of elements moved.
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> usize {
        let mut moved = 0;
        for el in &mut self.elements {
            if el.base.locked || !self.selection.contains(&el.id()) {
                continue;
            }
            el.base.x += dx;
            el.base.y += dy;
            moved += 1;
        }
        if moved > 0 {
            self.record();
        }
        moved
    }

    /// Move the element at `from` to `to` in the z-order list and record history.
    /// Out-of-range indices are ignored.
    pub fn reorder_layers(&mut self, from: usize, to: usize) -> bool {
        let len = self.elements.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        debug!(from, to, "layers reordered");
        self.record();
        true
    }

    // --- Selection ---

    /// With `add_to_selection == false`, select exactly `id`; otherwise toggle its membership.
    pub fn select_element(&mut self, id: &ElementId, add_to_selection: bool) {
        if self.get(id).is_none() {
            return;
        }
        if !add_to_selection {
            self.selection = vec![*id];
        } else if let Some(pos) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(*id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Grouping ---

    /// Group the current selection (at least two elements). Returns the new group's id.
    pub fn group_selection(&mut self) -> Option<ElementId> {
        let outcome = group::group(&self.elements, &self.selection)?;
        let group_id = outcome.selection.first().copied();
        debug!(count = self.selection.len(), "selection grouped");
        self.elements = outcome.elements;
        self.selection = outcome.selection;
        self.record();
        group_id
    }

    /// Ungroup every selected group. Returns the ids of the released children.
    pub fn ungroup_selection(&mut self) -> Vec<ElementId> {
        let Some(outcome) = group::ungroup(&self.elements, &self.selection) else {
            return Vec::new();
        };
        debug!(count = outcome.selection.len(), "selection ungrouped");
        self.elements = outcome.elements;
        self.selection = outcome.selection.clone();
        self.record();
        outcome.selection
    }

    // --- History ---

    /// Restore the previous snapshot. Returns `false` at the earliest snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(elements) = self.history.undo() else {
            return false;
        };
        self.elements = elements.to_vec();
        self.prune_selection();
        true
    }

    /// Restore the next snapshot. Returns `false` at the latest snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(elements) = self.history.redo() else {
            return false;
        };
        self.elements = elements.to_vec();
        self.prune_selection();
        true
    }

    // --- Tool / view ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.view.reset_zoom();
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.view.show_grid = show;
    }

    pub fn toggle_grid(&mut self) {
        self.view.show_grid = !self.view.show_grid;
    }

    pub fn set_grid_size(&mut self, size: f64) {
        self.view.set_grid_size(size);
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.view.dark_mode = dark;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.view.dark_mode = !self.view.dark_mode;
    }

    // --- Internals ---

    fn update_unlocked(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        match self.get(id) {
            Some(el) if !el.base.locked => self.update_element(id, patch),
            _ => false,
        }
    }

    fn prune_selection(&mut self) {
        let elements = &self.elements;
        self.selection.retain(|id| elements.iter().any(|el| el.id() == *id));
    }

    fn record(&mut self) {
        self.history.push(self.elements.clone());
    }
}
