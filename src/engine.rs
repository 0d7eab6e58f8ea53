//! Event routing: pointer, keyboard, double-click and blur events into store operations.
//!
//! ARCHITECTURE
//! ============
//! The host (DOM, native window, test harness) forwards raw input here and
//! reacts to the returned [`Action`]s: repaint, change the cursor, open a
//! text editor or a file picker, show a transient notice. All state changes
//! go through [`DocStore`]; this layer only decides which operation a given
//! event means and tracks the in-progress gesture in [`InputState`].
//!
//! Drag gestures capture the element's geometry at pointer-down. Each
//! pointer-move recomputes geometry from that origin plus the cumulative
//! delta and applies it through the live (non-history) path; pointer-up
//! commits exactly one history snapshot. If the pointer-up never arrives the
//! host calls [`EngineCore::on_blur`], which finalizes the gesture the same way.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, error};

use crate::config::EditorConfig;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::doc::DocStore;
use crate::element::{ElementId, ElementKind, ElementPatch};
use crate::hit::{HitPart, hit_test};
use crate::import::{ImportError, ImportedImage, prepare_image};
use crate::input::{Button, InputState, Key, Modifiers, Tool};
use crate::transform::{DragOrigin, canvas_delta, resize, rotation_for_pointer, translate};
use crate::view::{Camera, Point};

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short-lived user notification (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Document or view state changed; repaint.
    RenderNeeded,
    /// Change the pointer cursor (CSS cursor name).
    SetCursor(&'static str),
    /// Open an in-place editor for a text element.
    EditTextRequested { id: ElementId },
    /// Ask the user for an image file; place it at `at` or at the canvas center.
    ImageImportRequested { at: Option<Point> },
    /// Show a transient notice.
    Notify(Notice),
}

/// Editor engine: document store plus gesture tracking.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub doc: DocStore,
    pub input: InputState,
    /// Screen position of the canvas origin in CSS pixels.
    pub pan_x: f64,
    pub pan_y: f64,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(DocStore::new())
    }

    /// Empty document using `config`.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_store(DocStore::with_config(Vec::new(), config))
    }

    /// Drive an existing document (for example one seeded from a template).
    #[must_use]
    pub fn with_store(doc: DocStore) -> Self {
        Self { doc, input: InputState::Idle, pan_x: 0.0, pan_y: 0.0, cursor: "default" }
    }

    /// Camera built from the canvas placement and the document's zoom.
    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera { pan_x: self.pan_x, pan_y: self.pan_y, zoom: self.doc.view().zoom }
    }

    /// Update where the canvas origin sits on screen.
    pub fn set_canvas_origin(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    // --- Tools ---

    /// Switch tools. Choosing the image tool immediately requests a file centered on the canvas.
    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.doc.set_tool(tool);
        let mut actions = vec![Action::RenderNeeded];
        if tool == Tool::Image {
            actions.push(Action::ImageImportRequested { at: None });
        }
        actions
    }

    // --- Pointer events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = self.end_text_edit();
        self.finish_gesture(&mut actions);

        let camera = self.camera();
        let canvas_pt = camera.screen_to_canvas(screen_pt);
        let Some(hit) = hit_test(canvas_pt, self.doc.elements(), &camera, self.doc.selection()) else {
            self.press_empty_canvas(canvas_pt, &mut actions);
            return actions;
        };

        let Some(element) = self.doc.get(&hit.element_id) else {
            return actions;
        };
        let id = element.id();
        let locked = element.base.locked;
        let origin = DragOrigin::of(element);

        match hit.part {
            HitPart::Body => {
                self.doc.select_element(&id, modifiers.command());
                if !locked && self.doc.tool() == Tool::Select && self.doc.is_selected(&id) {
                    self.input = InputState::Moving { id, start_screen: screen_pt, origin };
                    self.set_cursor("move", &mut actions);
                }
                actions.push(Action::RenderNeeded);
            }
            HitPart::ResizeHandle(handle) => {
                if locked {
                    return actions;
                }
                self.input = InputState::Resizing { id, handle, start_screen: screen_pt, origin };
                self.set_cursor(handle.cursor(), &mut actions);
            }
            HitPart::RotateHandle => {
                if locked {
                    return actions;
                }
                self.input = InputState::Rotating { id, origin };
                self.set_cursor("grabbing", &mut actions);
            }
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let camera = self.camera();
        let mut actions = Vec::new();
        match self.input {
            InputState::Moving { id, start_screen, origin } => {
                let delta = canvas_delta(sub(screen_pt, start_screen), camera.zoom);
                let p = translate(&origin, delta);
                if self.doc.move_element(&id, p.x, p.y) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Resizing { id, handle, start_screen, origin } => {
                let delta = canvas_delta(sub(screen_pt, start_screen), camera.zoom);
                let r = resize(&origin, handle, delta, modifiers.shift, self.doc.config().min_size);
                if self.doc.resize_element(&id, r.width, r.height, Some(Point::new(r.x, r.y))) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Rotating { id, origin } => {
                let pointer = camera.screen_to_canvas(screen_pt);
                let rotation = rotation_for_pointer(origin.bounds().center(), pointer, modifiers.shift);
                if self.doc.rotate_element(&id, rotation) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Idle | InputState::EditingText { .. } => {
                let canvas_pt = camera.screen_to_canvas(screen_pt);
                let cursor = match hit_test(canvas_pt, self.doc.elements(), &camera, self.doc.selection()) {
                    Some(hit) => match hit.part {
                        HitPart::ResizeHandle(handle) => handle.cursor(),
                        HitPart::RotateHandle => "grab",
                        HitPart::Body => "move",
                    },
                    None => "default",
                };
                self.set_cursor(cursor, &mut actions);
            }
        }
        actions
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.finish_gesture(&mut actions);
        actions
    }

    /// Window lost focus or the pointer-up was lost: finalize whatever is in progress.
    pub fn on_blur(&mut self) -> Vec<Action> {
        let mut actions = self.end_text_edit();
        self.finish_gesture(&mut actions);
        actions
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let camera = self.camera();
        let canvas_pt = camera.screen_to_canvas(screen_pt);
        let top = self
            .doc
            .elements()
            .iter()
            .rev()
            .find(|el| el.base.visible && el.contains_point(canvas_pt))
            .map(|el| el.id());

        if let Some(id) = top {
            return self.begin_text_edit(&id);
        }
        match self.doc.tool() {
            Tool::Text => {
                let mut actions = Vec::new();
                self.create_with_tool(Tool::Text, canvas_pt, &mut actions);
                actions
            }
            Tool::Image => vec![Action::ImageImportRequested { at: Some(canvas_pt) }],
            _ => Vec::new(),
        }
    }

    // --- Text editing ---

    /// Start editing the content of the text element `id`. Other kinds are ignored.
    pub fn begin_text_edit(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(ElementKind::Text(text)) = self.doc.get(id).map(|el| &el.kind) else {
            return Vec::new();
        };
        let original = text.content.clone();
        let mut actions = self.end_text_edit();
        self.finish_gesture(&mut actions);
        self.input = InputState::EditingText { id: *id, original };
        actions.push(Action::EditTextRequested { id: *id });
        actions
    }

    /// Apply live keystrokes to the text being edited. Records no history.
    pub fn edit_text(&mut self, content: &str) -> Vec<Action> {
        let InputState::EditingText { id, .. } = self.input else {
            return Vec::new();
        };
        if self.doc.update_element(&id, &ElementPatch::content(content)) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Close the text editor, committing one snapshot if the content changed.
    pub fn end_text_edit(&mut self) -> Vec<Action> {
        let InputState::EditingText { id, original } = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let current = match self.doc.get(&id).map(|el| &el.kind) {
            Some(ElementKind::Text(text)) => text.content.clone(),
            _ => return Vec::new(),
        };
        if current == original {
            return Vec::new();
        }
        self.doc.update_element_with_history(&id, &ElementPatch::content(current));
        vec![Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if matches!(self.input, InputState::EditingText { .. }) {
            let closes = key.name() == "Escape" || (key.name() == "Enter" && modifiers.command());
            return if closes { self.end_text_edit() } else { Vec::new() };
        }

        // A key pressed mid-drag applies to the settled document.
        let mut actions = Vec::new();
        self.finish_gesture(&mut actions);
        actions.extend(self.dispatch_key(key, modifiers));
        actions
    }

    fn dispatch_key(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            return self.on_command_key(key, modifiers);
        }

        match key.name() {
            "Delete" | "Backspace" => self.delete_selection(),
            "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" => self.nudge(key.name(), modifiers.shift),
            "Escape" => {
                self.doc.clear_selection();
                self.doc.set_tool(Tool::Select);
                vec![Action::RenderNeeded]
            }
            name => match Tool::from_shortcut(name) {
                Some(tool) => self.select_tool(tool),
                None => Vec::new(),
            },
        }
    }

    fn on_command_key(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_letter('z') {
            let changed = if modifiers.shift { self.doc.redo() } else { self.doc.undo() };
            return render_if(changed);
        }
        if key.is_letter('y') {
            return render_if(self.doc.redo());
        }
        if key.is_letter('g') {
            if modifiers.shift {
                if self.doc.ungroup_selection().is_empty() {
                    return Vec::new();
                }
                return vec![Action::RenderNeeded, Action::Notify(Notice::success("Elements ungrouped"))];
            }
            if self.doc.selection().len() >= 2 && self.doc.group_selection().is_some() {
                return vec![Action::RenderNeeded, Action::Notify(Notice::success("Elements grouped"))];
            }
        }
        Vec::new()
    }

    fn delete_selection(&mut self) -> Vec<Action> {
        let ids = self.doc.selection().to_vec();
        if ids.is_empty() || self.doc.delete_elements(&ids) == 0 {
            return Vec::new();
        }
        vec![Action::RenderNeeded, Action::Notify(Notice::success("Elements deleted"))]
    }

    fn nudge(&mut self, key: &str, fast: bool) -> Vec<Action> {
        let config = self.doc.config();
        let step = if fast { config.nudge_step_fast } else { config.nudge_step };
        let (dx, dy) = match key {
            "ArrowLeft" => (-step, 0.0),
            "ArrowRight" => (step, 0.0),
            "ArrowUp" => (0.0, -step),
            _ => (0.0, step),
        };
        render_if(self.doc.nudge_selection(dx, dy) > 0)
    }

    // --- Image import ---

    /// Complete an image import started by [`Action::ImageImportRequested`].
    pub fn finish_image_import(
        &mut self,
        result: Result<ImportedImage, ImportError>,
        at: Option<Point>,
    ) -> Vec<Action> {
        match result {
            Ok(image) => render_if(self.doc.add_element(image.draft(at)).is_some()),
            Err(e) => {
                error!(error = %e, "image import failed");
                vec![Action::Notify(Notice::error("Failed to load image"))]
            }
        }
    }

    /// Largest width or height an imported image is fitted to.
    #[must_use]
    pub fn image_max_dimension(&self) -> f64 {
        self.doc.config().image_max_dimension
    }

    /// Decode `bytes` on the calling thread, fit it to the configured limit,
    /// and insert it at `at` (or the canvas center).
    pub fn import_image(&mut self, bytes: &[u8], at: Option<Point>) -> Vec<Action> {
        let result = prepare_image(bytes, self.image_max_dimension());
        self.finish_image_import(result, at)
    }

    // --- Internals ---

    fn press_empty_canvas(&mut self, canvas_pt: Point, actions: &mut Vec<Action>) {
        self.doc.clear_selection();
        actions.push(Action::RenderNeeded);

        let tool = self.doc.tool();
        let inside = (0.0..=CANVAS_WIDTH).contains(&canvas_pt.x) && (0.0..=CANVAS_HEIGHT).contains(&canvas_pt.y);
        if tool == Tool::Select || !inside {
            return;
        }
        if tool == Tool::Image {
            actions.push(Action::ImageImportRequested { at: Some(canvas_pt) });
        } else {
            self.create_with_tool(tool, canvas_pt, actions);
        }
    }

    fn create_with_tool(&mut self, tool: Tool, canvas_pt: Point, actions: &mut Vec<Action>) {
        let Some(draft) = tool.draft_at(canvas_pt) else {
            return;
        };
        if let Some(id) = self.doc.add_element(draft) {
            debug!(%id, ?tool, "element created with tool");
            actions.push(Action::RenderNeeded);
        }
    }

    /// End any drag gesture, committing one snapshot if the geometry changed.
    fn finish_gesture(&mut self, actions: &mut Vec<Action>) {
        if !self.input.is_dragging() {
            return;
        }
        let (id, origin) = match std::mem::take(&mut self.input) {
            InputState::Moving { id, origin, .. }
            | InputState::Resizing { id, origin, .. }
            | InputState::Rotating { id, origin } => (id, origin),
            InputState::Idle | InputState::EditingText { .. } => return,
        };
        let changed = self.doc.get(&id).is_some_and(|el| DragOrigin::of(el) != origin);
        if changed {
            self.doc.commit_element(&id);
            actions.push(Action::RenderNeeded);
        }
        self.set_cursor("default", actions);
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

fn render_if(changed: bool) -> Vec<Action> {
    if changed { vec![Action::RenderNeeded] } else { Vec::new() }
}
