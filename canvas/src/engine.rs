//! Interaction controller and the engine's public method surface.
//!
//! [`EngineCore`] owns the element store, the selection, the viewport and the
//! gesture state machine. Hosts feed it pointer, wheel and key events (or call
//! the direct editing operations) and get back a list of [`Action`]s that
//! describe what changed, so observers re-render from the store without
//! reaching into shared global state.
//!
//! Every entry point is synchronous and total. References to elements that no
//! longer exist, or geometry edits on locked elements, are benign races in a
//! UI loop: they are logged at `debug` and skipped, never surfaced as errors.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace};

use crate::align::{self, Alignment, Axis, Placement};
use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::doc::{CanvasElement, DocError, DocStore, ElementId, ElementKind, ElementOverrides, PartialElement};
use crate::export::Snapshot;
use crate::geometry::{self, Point};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, ComponentDrop, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::resize::resize_rect;
use crate::selection::Selection;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";
const CURSOR_CROSSHAIR: &str = "crosshair";

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new element exists in the store.
    ElementCreated(CanvasElement),
    /// An element changed; `fields` holds the new values.
    ElementUpdated { id: ElementId, fields: PartialElement },
    /// Elements were removed from the store.
    ElementsDeleted(Vec<ElementId>),
    /// The selection changed; carries the new ordered selection.
    SelectionChanged(Vec<ElementId>),
    /// Pan or zoom changed.
    ViewportChanged(Camera),
    /// Suggested CSS cursor.
    SetCursor(String),
    /// Short user-facing message (e.g. "Duplicated 2 elements").
    Notify(String),
    /// Something visible changed; the host should redraw.
    RenderNeeded,
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "element" } else { "elements" }
}

/// Core engine state. Holds no platform handles, so it runs anywhere.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub selection: Selection,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom tuning. Invalid values are repaired.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            doc: DocStore::with_min_size(config.min_size),
            camera: Camera::default(),
            selection: Selection::new(),
            ui: UiState::default(),
            input: InputState::default(),
            config,
        }
    }

    // --- Queries ---

    /// Selected ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        self.selection.ids()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.doc.get(id)
    }

    /// Currently active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// Plain serializable copy of the whole editing state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.doc, self.camera)
    }

    /// Replace the document and viewport from a snapshot.
    ///
    /// Zoom is clamped, non-finite pan falls back to zero, stale selection
    /// entries are dropped, and any gesture in progress is abandoned.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Vec<Action> {
        self.doc.load_snapshot(snapshot.elements);

        let mut camera = Camera::default();
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        camera.pan_to(finite_or_zero(snapshot.viewport.pan_x), finite_or_zero(snapshot.viewport.pan_y));
        camera.set_zoom_within(snapshot.viewport.zoom, self.config.min_zoom, self.config.max_zoom);
        self.camera = camera;

        self.input = InputState::Idle;
        self.selection.retain_live(&self.doc);
        debug!(elements = self.doc.len(), "snapshot loaded");
        vec![
            Action::SelectionChanged(self.selection.ids().to_vec()),
            Action::ViewportChanged(self.camera),
            Action::RenderNeeded,
        ]
    }

    // --- Tool ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        vec![Action::SetCursor(Self::idle_cursor(tool).to_owned())]
    }

    fn idle_cursor(tool: Tool) -> &'static str {
        match tool {
            Tool::Select => CURSOR_DEFAULT,
            Tool::Hand => CURSOR_GRAB,
            _ => CURSOR_CROSSHAIR,
        }
    }

    // --- Element store operations ---

    /// Create an element with its top-left at world `(x, y)`.
    pub fn add(&mut self, kind: ElementKind, x: f64, y: f64, overrides: ElementOverrides) -> (ElementId, Vec<Action>) {
        let id = self.doc.add(kind, x, y, overrides);
        let mut actions = Vec::new();
        if let Some(el) = self.doc.get(&id) {
            actions.push(Action::ElementCreated(el.clone()));
        }
        actions.push(Action::RenderNeeded);
        (id, actions)
    }

    /// Place a palette component with its top-left at a screen-space drop point.
    /// The new element becomes the selection.
    pub fn drop_component(&mut self, drop: ComponentDrop, screen_pt: Point) -> (ElementId, Vec<Action>) {
        let world = self.camera.screen_to_world(screen_pt);
        let overrides = ElementOverrides {
            width: Some(drop.width),
            height: Some(drop.height),
            content: drop.content,
            style: drop.style,
            ..Default::default()
        };
        let (id, mut actions) = self.add(drop.kind, world.x, world.y, overrides);
        if self.selection.replace(&[id], &self.doc) {
            actions.push(self.selection_changed());
        }
        (id, actions)
    }

    /// Shallow-merge `partial` into an element. Missing ids are a no-op.
    ///
    /// Locking or deleting through an update also drops the element from the
    /// selection.
    pub fn update(&mut self, id: &ElementId, partial: PartialElement) -> Vec<Action> {
        if let Err(e) = self.doc.update(id, &partial) {
            debug!(error = %e, "update skipped");
            return Vec::new();
        }
        let mut actions = vec![Action::ElementUpdated { id: *id, fields: partial }];
        if self.selection.retain_live(&self.doc) {
            actions.push(self.selection_changed());
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Translate one element by a world-space delta. Missing or locked: no-op.
    pub fn move_element(&mut self, id: &ElementId, dx: f64, dy: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        self.move_and_report(id, dx, dy, &mut actions);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn move_and_report(&mut self, id: &ElementId, dx: f64, dy: f64, actions: &mut Vec<Action>) {
        match self.doc.move_by(id, dx, dy) {
            Ok(()) => {
                if let Some(el) = self.doc.get(id) {
                    actions.push(Action::ElementUpdated { id: *id, fields: PartialElement::position(el.x, el.y) });
                }
            }
            Err(e) => debug!(error = %e, "move skipped"),
        }
    }

    /// Flip an element's lock flag. Locking drops it from the selection.
    pub fn toggle_lock(&mut self, id: &ElementId) -> Vec<Action> {
        match self.doc.toggle_lock(id) {
            Ok(locked) => self.update(id, PartialElement { locked: Some(locked), ..Default::default() }),
            Err(e) => {
                debug!(error = %e, "toggle lock skipped");
                Vec::new()
            }
        }
    }

    /// Flip an element's visibility flag.
    pub fn toggle_visibility(&mut self, id: &ElementId) -> Vec<Action> {
        match self.doc.toggle_visibility(id) {
            Ok(visible) => self.update(id, PartialElement { visible: Some(visible), ..Default::default() }),
            Err(e) => {
                debug!(error = %e, "toggle visibility skipped");
                Vec::new()
            }
        }
    }

    /// Delete one element and drop it from the selection.
    pub fn remove(&mut self, id: &ElementId) -> Vec<Action> {
        self.bulk_remove(&[*id])
    }

    /// Delete several elements and drop them from the selection.
    pub fn bulk_remove(&mut self, ids: &[ElementId]) -> Vec<Action> {
        let removed = self.doc.bulk_remove(ids);
        if removed.is_empty() {
            return Vec::new();
        }
        let mut selection_changed = false;
        for id in &removed {
            selection_changed |= self.selection.remove(id);
        }
        let mut actions = vec![Action::ElementsDeleted(removed)];
        if selection_changed {
            actions.push(self.selection_changed());
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete every selected element.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let ids = self.selection.ids().to_vec();
        let mut actions = self.bulk_remove(&ids);
        if !ids.is_empty() {
            actions.push(Action::Notify(format!("Deleted {} {}", ids.len(), plural(ids.len()))));
        }
        actions
    }

    /// Copy elements above everything; the copies become the selection.
    pub fn duplicate(&mut self, ids: &[ElementId]) -> Vec<Action> {
        let new_ids = self.doc.duplicate(ids);
        if new_ids.is_empty() {
            return Vec::new();
        }
        let mut actions: Vec<Action> = new_ids
            .iter()
            .filter_map(|id| self.doc.get(id))
            .map(|el| Action::ElementCreated(el.clone()))
            .collect();
        self.selection.replace(&new_ids, &self.doc);
        actions.push(self.selection_changed());
        actions.push(Action::Notify(format!("Duplicated {} {}", new_ids.len(), plural(new_ids.len()))));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Duplicate the current selection.
    pub fn duplicate_selection(&mut self) -> Vec<Action> {
        let ids = self.selection_in_paint_order();
        self.duplicate(&ids)
    }

    /// Restack `ids` above everything, in the order given.
    pub fn bring_to_front(&mut self, ids: &[ElementId]) -> Vec<Action> {
        let restacked = self.doc.bring_to_front(ids);
        self.report_z_changes(&restacked)
    }

    /// Restack `ids` beneath everything, in the order given (first lowest).
    pub fn send_to_back(&mut self, ids: &[ElementId]) -> Vec<Action> {
        let restacked = self.doc.send_to_back(ids);
        self.report_z_changes(&restacked)
    }

    /// Bring the selection to the front, keeping its internal stacking.
    pub fn bring_selection_to_front(&mut self) -> Vec<Action> {
        let ids = self.selection_in_paint_order();
        self.bring_to_front(&ids)
    }

    /// Send the selection to the back, keeping its internal stacking.
    pub fn send_selection_to_back(&mut self) -> Vec<Action> {
        let ids = self.selection_in_paint_order();
        self.send_to_back(&ids)
    }

    fn report_z_changes(&self, ids: &[ElementId]) -> Vec<Action> {
        let mut actions: Vec<Action> = ids
            .iter()
            .filter_map(|id| self.doc.get(id))
            .map(|el| Action::ElementUpdated {
                id: el.id,
                fields: PartialElement { z_index: Some(el.z_index), ..Default::default() },
            })
            .collect();
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Selected ids ordered bottom to top.
    fn selection_in_paint_order(&self) -> Vec<ElementId> {
        let mut els: Vec<&CanvasElement> = self.selection.ids().iter().filter_map(|id| self.doc.get(id)).collect();
        els.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        els.into_iter().map(|el| el.id).collect()
    }

    // --- Selection ---

    fn selection_changed(&self) -> Action {
        Action::SelectionChanged(self.selection.ids().to_vec())
    }

    /// Click-select semantics; see [`Selection::select`].
    pub fn select(&mut self, id: ElementId, additive: bool) -> Vec<Action> {
        if self.selection.select(id, additive, &self.doc) {
            vec![self.selection_changed(), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Replace the selection, keeping only live unlocked ids.
    pub fn replace_selection(&mut self, ids: &[ElementId]) -> Vec<Action> {
        if self.selection.replace(ids, &self.doc) {
            vec![self.selection_changed(), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.selection.clear() {
            vec![self.selection_changed(), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn select_all(&mut self) -> Vec<Action> {
        if self.selection.select_all(&self.doc) {
            vec![self.selection_changed(), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Alignment ---

    /// Align the selection. Needs at least two selected elements.
    pub fn align_selection(&mut self, alignment: Alignment) -> Vec<Action> {
        let placements = align::align(&self.doc, self.selection.ids(), alignment);
        self.apply_placements(&placements)
    }

    /// Equalize spacing across the selection. Needs at least three.
    pub fn distribute_selection(&mut self, axis: Axis) -> Vec<Action> {
        let placements = align::distribute(&self.doc, self.selection.ids(), axis);
        self.apply_placements(&placements)
    }

    fn apply_placements(&mut self, placements: &[Placement]) -> Vec<Action> {
        let mut actions = Vec::with_capacity(placements.len() + 1);
        for p in placements {
            let fields = PartialElement::position(p.x, p.y);
            match self.doc.update(&p.id, &fields) {
                Ok(()) => actions.push(Action::ElementUpdated { id: p.id, fields }),
                Err(e) => debug!(error = %e, "placement skipped"),
            }
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Viewport ---

    fn viewport_actions(&self, before: Camera) -> Vec<Action> {
        if self.camera == before {
            Vec::new()
        } else {
            vec![Action::ViewportChanged(self.camera), Action::RenderNeeded]
        }
    }

    /// Set zoom, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        let before = self.camera;
        self.camera.set_zoom_within(zoom, self.config.min_zoom, self.config.max_zoom);
        self.viewport_actions(before)
    }

    /// Add a linear zoom delta, clamped to the configured bounds.
    pub fn zoom_by(&mut self, delta: f64) -> Vec<Action> {
        let before = self.camera;
        self.camera.zoom_by_within(delta, self.config.min_zoom, self.config.max_zoom);
        self.viewport_actions(before)
    }

    /// Shift the pan offset (screen pixels).
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let before = self.camera;
        self.camera.pan_by(dx, dy);
        self.viewport_actions(before)
    }

    /// Back to 100% zoom at the origin.
    pub fn reset_view(&mut self) -> Vec<Action> {
        let before = self.camera;
        self.camera.reset();
        self.viewport_actions(before)
    }

    // --- Input events ---

    fn start_panning(&mut self, screen_pt: Point) -> Vec<Action> {
        let anchor = Point::new(screen_pt.x - self.camera.pan_x, screen_pt.y - self.camera.pan_y);
        self.input = InputState::Panning { anchor };
        debug!("panning started");
        vec![Action::SetCursor(CURSOR_GRABBING.to_owned())]
    }

    /// Pointer pressed at a screen-space point.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        // A press without a matching release ends the previous gesture.
        self.input = InputState::Idle;

        match button {
            Button::Middle => return self.start_panning(screen_pt),
            Button::Secondary => return Vec::new(),
            Button::Primary => {}
        }

        let world = self.camera.screen_to_world(screen_pt);
        match self.ui.tool {
            Tool::Hand => self.start_panning(screen_pt),
            Tool::Select => {
                let hit = hit::hit_test(world, &self.doc, &self.camera, &self.selection, self.config.handle_radius_px);
                match hit {
                    Some(Hit { element_id, part: HitPart::ResizeHandle(anchor) }) => {
                        let Some(el) = self.doc.get(&element_id) else {
                            return Vec::new();
                        };
                        self.input = InputState::Resizing { id: element_id, anchor, start_screen: screen_pt, start: el.bounds() };
                        debug!(id = %element_id, ?anchor, "resize started");
                        vec![Action::SetCursor(anchor.cursor().to_owned())]
                    }
                    Some(Hit { element_id, part: HitPart::Body }) => self.start_dragging(element_id, screen_pt, modifiers),
                    None => self.start_panning(screen_pt),
                }
            }
            tool => {
                let Some(kind) = tool.creates() else {
                    return Vec::new();
                };
                let (id, mut actions) = self.add(kind, world.x, world.y, ElementOverrides::default());
                if self.selection.replace(&[id], &self.doc) {
                    actions.push(self.selection_changed());
                }
                actions
            }
        }
    }

    fn start_dragging(&mut self, id: ElementId, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.selection.select(id, modifiers.shift, &self.doc) {
            actions.push(self.selection_changed());
        }
        self.input = InputState::Dragging { last_screen: screen_pt };
        debug!(%id, selected = self.selection.len(), "drag started");
        actions.push(Action::SetCursor(CURSOR_GRABBING.to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer moved to a screen-space point.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { anchor } => {
                let before = self.camera;
                self.camera.pan_to(screen_pt.x - anchor.x, screen_pt.y - anchor.y);
                self.viewport_actions(before)
            }
            InputState::Dragging { last_screen } => {
                let delta = geometry::world_delta(screen_pt.sub(last_screen), self.camera.zoom);
                self.input = InputState::Dragging { last_screen: screen_pt };
                trace!(dx = delta.x, dy = delta.y, "drag step");
                let ids = self.selection.ids().to_vec();
                let mut actions = Vec::with_capacity(ids.len() + 1);
                for id in &ids {
                    self.move_and_report(id, delta.x, delta.y, &mut actions);
                }
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                actions
            }
            InputState::Resizing { id, anchor, start_screen, start } => {
                match self.doc.get(&id) {
                    None => {
                        debug!(error = %DocError::NotFound(id), "resize step skipped");
                        return Vec::new();
                    }
                    Some(el) if el.locked => {
                        debug!(error = %DocError::Locked(id), "resize step skipped");
                        return Vec::new();
                    }
                    Some(_) => {}
                }
                let delta = geometry::world_delta(screen_pt.sub(start_screen), self.camera.zoom);
                let rect = resize_rect(anchor, start, delta, self.config.min_size);
                let fields = PartialElement::geometry(rect.x, rect.y, rect.width, rect.height);
                match self.doc.update(&id, &fields) {
                    Ok(()) => vec![Action::ElementUpdated { id, fields }, Action::RenderNeeded],
                    Err(e) => {
                        debug!(error = %e, "resize step skipped");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Pointer released. Ends any gesture; nothing is left to commit.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    /// Pointer left the tracking area. Treated exactly like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        debug!(state = ?self.input, "gesture ended");
        self.input = InputState::Idle;
        vec![Action::SetCursor(Self::idle_cursor(self.ui.tool).to_owned())]
    }

    /// Wheel input. With ctrl/cmd the vertical delta zooms linearly;
    /// otherwise both deltas pan. Independent of the gesture state machine.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            self.zoom_by(-delta.dy * self.config.wheel_zoom_sensitivity)
        } else {
            self.pan_by(-delta.dx, -delta.dy)
        }
    }

    /// Keyboard shortcuts.
    ///
    /// | Key | Effect |
    /// |-----|--------|
    /// | `Delete` / `Backspace` | delete selection |
    /// | `Escape` | clear selection |
    /// | ctrl/cmd + `d` | duplicate selection |
    /// | ctrl/cmd + `a` | select all |
    /// | ctrl/cmd + `]` / `[` | bring to front / send to back |
    /// | arrows | nudge selection (larger step with shift) |
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let step = if modifiers.shift { self.config.nudge_step_large } else { self.config.nudge_step };
        match (key.as_str(), modifiers.command()) {
            ("Delete" | "Backspace", _) => self.delete_selection(),
            ("Escape", _) => self.clear_selection(),
            ("d" | "D", true) => self.duplicate_selection(),
            ("a" | "A", true) => self.select_all(),
            ("]", true) => self.bring_selection_to_front(),
            ("[", true) => self.send_selection_to_back(),
            ("ArrowLeft", _) => self.nudge_selection(-step, 0.0),
            ("ArrowRight", _) => self.nudge_selection(step, 0.0),
            ("ArrowUp", _) => self.nudge_selection(0.0, -step),
            ("ArrowDown", _) => self.nudge_selection(0.0, step),
            _ => Vec::new(),
        }
    }

    fn nudge_selection(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let ids = self.selection.ids().to_vec();
        let mut actions = Vec::with_capacity(ids.len() + 1);
        for id in &ids {
            self.move_and_report(id, dx, dy, &mut actions);
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}
