//! Document model: canvas elements, their properties, and the in-memory store.
//!
//! This module defines the core data types that describe what is on the canvas
//! (`CanvasElement`, `ElementKind`), the override and sparse-update types used
//! to create and edit elements (`ElementOverrides`, `PartialElement`), and the
//! runtime store that owns all live elements (`DocStore`).
//!
//! Data flows into this layer from snapshots (JSON deserialization) and from
//! the interaction controller (mutations). Paint order is derived from
//! `z_index` via `sorted_elements`; insertion order carries no meaning.
//!
//! Store operations that reference a missing id report [`DocError::NotFound`]
//! instead of panicking. Callers at the engine surface treat that as a benign
//! race and carry on.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::consts::MIN_SIZE;
use crate::geometry::Rect;

/// Unique identifier for a canvas element.
pub type ElementId = Uuid;

/// Open-ended presentation attributes. Opaque to the engine.
pub type Style = Map<String, Value>;

/// Error returned by store operations that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    #[error("element not found: {0}")]
    NotFound(ElementId),
    #[error("element is locked: {0}")]
    Locked(ElementId),
}

/// The kind of a canvas element. Only used as a rendering label downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Text,
    Button,
    Container,
    Navbar,
    Card,
    /// Device frame (phone/tablet/desktop artboard).
    Frame,
    Image,
    Comment,
    Input,
    Divider,
}

impl ElementKind {
    /// Lowercase label, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
            Self::Button => "button",
            Self::Container => "container",
            Self::Navbar => "navbar",
            Self::Card => "card",
            Self::Frame => "frame",
            Self::Image => "image",
            Self::Comment => "comment",
            Self::Input => "input",
            Self::Divider => "divider",
        }
    }

    /// Default `(width, height)` for a freshly placed element of this kind.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Rectangle => (150.0, 100.0),
            Self::Circle => (100.0, 100.0),
            Self::Text => (200.0, 40.0),
            Self::Button => (120.0, 40.0),
            Self::Container => (300.0, 200.0),
            Self::Navbar => (800.0, 60.0),
            Self::Card => (280.0, 180.0),
            Self::Frame => (375.0, 667.0),
            Self::Image => (200.0, 150.0),
            Self::Comment => (200.0, 80.0),
            Self::Input => (240.0, 40.0),
            Self::Divider => (300.0, MIN_SIZE),
        }
    }

    /// Default text payload, for kinds that carry one.
    #[must_use]
    pub fn default_content(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("Text"),
            Self::Button => Some("Button"),
            Self::Navbar => Some("Navigation"),
            Self::Card => Some("Card title"),
            Self::Comment => Some("Comment"),
            Self::Input => Some("Placeholder"),
            _ => None,
        }
    }

    /// Default style entries for this kind.
    #[must_use]
    pub fn default_style(self) -> Style {
        let value = match self {
            Self::Rectangle | Self::Container => json!({ "fill": "#F3F4F6", "stroke": "#9CA3AF" }),
            Self::Circle => json!({ "fill": "#E5E7EB", "stroke": "#6B7280" }),
            Self::Text => json!({ "color": "#111827", "fontSize": 16 }),
            Self::Button => json!({ "fill": "#2563EB", "color": "#FFFFFF", "radius": 6 }),
            Self::Navbar => json!({ "fill": "#1F2937", "color": "#F9FAFB" }),
            Self::Card => json!({ "fill": "#FFFFFF", "stroke": "#E5E7EB", "radius": 8 }),
            Self::Frame => json!({ "fill": "#FFFFFF", "stroke": "#111827" }),
            Self::Image => json!({ "fill": "#D1D5DB" }),
            Self::Comment => json!({ "fill": "#FEF3C7", "color": "#92400E" }),
            Self::Input => json!({ "fill": "#FFFFFF", "stroke": "#D1D5DB", "radius": 4 }),
            Self::Divider => json!({ "stroke": "#D1D5DB" }),
        };
        match value {
            Value::Object(map) => map,
            _ => Style::new(),
        }
    }
}

fn default_visible() -> bool {
    true
}

/// A placed visual element as stored in the document and in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    /// Unique identifier; never changes after creation.
    pub id: ElementId,
    /// Rendering label.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge of the bounding box in world coordinates.
    pub x: f64,
    /// Top edge of the bounding box in world coordinates.
    pub y: f64,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
    /// Stacking order; lower values are painted beneath higher values.
    pub z_index: i64,
    /// Free-form text payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Presentation attributes.
    #[serde(default)]
    pub style: Style,
    /// Hidden elements are skipped by hit-testing and rendering.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked elements ignore pointer selection, drag, and resize.
    #[serde(default)]
    pub locked: bool,
}

impl CanvasElement {
    /// World-space bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether pointer interaction may target this element.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }
}

/// Caller-supplied values that replace kind defaults in [`DocStore::add`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Merged over the kind's default style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style keys to merge or remove (null values delete keys).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl PartialElement {
    /// Position-only update.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Position and size update.
    #[must_use]
    pub fn geometry(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x: Some(x), y: Some(y), width: Some(width), height: Some(height), ..Default::default() }
    }
}

/// Shallow-merge `incoming` into `existing`; `null` values delete keys.
fn merge_style(existing: &mut Style, incoming: &Style) {
    for (k, v) in incoming {
        if v.is_null() {
            existing.remove(k);
        } else {
            existing.insert(k.clone(), v.clone());
        }
    }
}

/// In-memory store of canvas elements.
#[derive(Debug, Clone)]
pub struct DocStore {
    elements: HashMap<ElementId, CanvasElement>,
    min_size: f64,
}

impl DocStore {
    /// Create an empty store with the default size floor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_size(MIN_SIZE)
    }

    /// Create an empty store that floors element sizes at `min_size`.
    #[must_use]
    pub fn with_min_size(min_size: f64) -> Self {
        Self { elements: HashMap::new(), min_size }
    }

    /// The size floor applied by `add` and `update`.
    #[must_use]
    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Create an element of `kind` with its top-left corner at `(x, y)`.
    ///
    /// The new element paints above everything already present unless the
    /// overrides say otherwise.
    pub fn add(&mut self, kind: ElementKind, x: f64, y: f64, overrides: ElementOverrides) -> ElementId {
        let (default_w, default_h) = kind.default_size();
        let mut style = kind.default_style();
        if let Some(ref incoming) = overrides.style {
            merge_style(&mut style, incoming);
        }

        let element = CanvasElement {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width: overrides.width.unwrap_or(default_w).max(self.min_size),
            height: overrides.height.unwrap_or(default_h).max(self.min_size),
            z_index: overrides.z_index.unwrap_or_else(|| self.next_front_z()),
            content: overrides.content.or_else(|| kind.default_content().map(str::to_owned)),
            style,
            visible: overrides.visible.unwrap_or(true),
            locked: overrides.locked.unwrap_or(false),
        };
        let id = element.id;
        debug!(%id, kind = kind.as_str(), x, y, z_index = element.z_index, "element added");
        self.elements.insert(id, element);
        id
    }

    /// Apply a partial update. Style is merged key-wise, sizes are floored.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn update(&mut self, id: &ElementId, partial: &PartialElement) -> Result<(), DocError> {
        let min_size = self.min_size;
        let el = self.elements.get_mut(id).ok_or(DocError::NotFound(*id))?;
        if let Some(x) = partial.x {
            el.x = x;
        }
        if let Some(y) = partial.y {
            el.y = y;
        }
        if let Some(w) = partial.width {
            el.width = w.max(min_size);
        }
        if let Some(h) = partial.height {
            el.height = h.max(min_size);
        }
        if let Some(z) = partial.z_index {
            el.z_index = z;
        }
        if let Some(ref content) = partial.content {
            el.content = Some(content.clone());
        }
        if let Some(ref style) = partial.style {
            merge_style(&mut el.style, style);
        }
        if let Some(visible) = partial.visible {
            el.visible = visible;
        }
        if let Some(locked) = partial.locked {
            el.locked = locked;
        }
        trace!(%id, "element updated");
        Ok(())
    }

    /// Translate an element by a world-space delta.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing id and `Locked` for a locked element;
    /// in both cases nothing changes.
    pub fn move_by(&mut self, id: &ElementId, dx: f64, dy: f64) -> Result<(), DocError> {
        let el = self.elements.get_mut(id).ok_or(DocError::NotFound(*id))?;
        if el.locked {
            return Err(DocError::Locked(*id));
        }
        el.x += dx;
        el.y += dy;
        trace!(%id, dx, dy, "element moved");
        Ok(())
    }

    /// Flip the `locked` flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn toggle_lock(&mut self, id: &ElementId) -> Result<bool, DocError> {
        let el = self.elements.get_mut(id).ok_or(DocError::NotFound(*id))?;
        el.locked = !el.locked;
        Ok(el.locked)
    }

    /// Flip the `visible` flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn toggle_visibility(&mut self, id: &ElementId) -> Result<bool, DocError> {
        let el = self.elements.get_mut(id).ok_or(DocError::NotFound(*id))?;
        el.visible = !el.visible;
        Ok(el.visible)
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<CanvasElement> {
        let removed = self.elements.remove(id);
        if removed.is_some() {
            debug!(%id, "element removed");
        }
        removed
    }

    /// Remove every listed element; returns the ids that were actually present.
    pub fn bulk_remove(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        ids.iter()
            .filter(|id| self.remove(id).is_some())
            .copied()
            .collect()
    }

    /// Copy each listed element under a fresh id, stacked above everything.
    ///
    /// Copies keep geometry, content, style and flags. Missing ids are skipped.
    /// Returns the new ids in the order of the sources.
    pub fn duplicate(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut next_z = self.next_front_z();
        let mut new_ids = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(source) = self.elements.get(id) else {
                debug!(%id, "duplicate skipped missing element");
                continue;
            };
            let mut copy = source.clone();
            copy.id = Uuid::new_v4();
            copy.z_index = next_z;
            next_z += 1;
            new_ids.push(copy.id);
            self.elements.insert(copy.id, copy);
        }
        debug!(count = new_ids.len(), "elements duplicated");
        new_ids
    }

    /// Restack the listed elements above everything else.
    ///
    /// They receive `max + 1 ..= max + n` in the order given, so the last id
    /// ends up topmost. Missing ids are skipped; returns the ids restacked.
    pub fn bring_to_front(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let present = self.present(ids);
        let mut z = self.next_front_z();
        for id in &present {
            if let Some(el) = self.elements.get_mut(id) {
                el.z_index = z;
                z += 1;
            }
        }
        present
    }

    /// Restack the listed elements beneath everything else.
    ///
    /// They occupy `min - n ..= min - 1`, keeping the order given (first id
    /// lowest), mirroring [`bring_to_front`](Self::bring_to_front).
    pub fn send_to_back(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let present = self.present(ids);
        let min = self.min_z().unwrap_or(0);
        #[allow(clippy::cast_possible_wrap)]
        let mut z = min - present.len() as i64;
        for id in &present {
            if let Some(el) = self.elements.get_mut(id) {
                el.z_index = z;
                z += 1;
            }
        }
        present
    }

    /// Ids from `ids` that exist, without duplicates, in the order given.
    fn present(&self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.elements.contains_key(id) && !out.contains(id) {
                out.push(*id);
            }
        }
        out
    }

    /// z-index that would paint above every current element.
    fn next_front_z(&self) -> i64 {
        self.max_z().map_or(0, |z| z + 1)
    }

    /// Highest z-index in the store.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.elements.values().map(|e| e.z_index).max()
    }

    /// Lowest z-index in the store.
    #[must_use]
    pub fn min_z(&self) -> Option<i64> {
        self.elements.values().map(|e| e.z_index).min()
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.elements.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Replace all elements with a full snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) {
        self.elements.clear();
        for el in elements {
            self.elements.insert(el.id, el);
        }
    }

    /// Return all elements sorted by `(z_index, id)` for paint order (bottom first).
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&CanvasElement> {
        let mut els: Vec<&CanvasElement> = self.elements.values().collect();
        els.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        els
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
