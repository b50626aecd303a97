//! Selection manager: the ordered set of currently selected element ids.
//!
//! Insertion order is kept so "last selected" queries work. Every operation
//! consults the [`DocStore`] and silently drops ids that are missing or
//! locked, so the selection only ever references live, unlocked elements.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use tracing::debug;

use crate::doc::{DocStore, ElementId};

/// Ordered, duplicate-free set of selected element ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

fn selectable(doc: &DocStore, id: &ElementId) -> bool {
    doc.get(id).is_some_and(|el| !el.locked)
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Click-select `id`.
    ///
    /// Non-additive: the selection becomes exactly `[id]`. Additive (shift):
    /// toggles `id` out if already selected, otherwise appends it. Missing or
    /// locked elements leave the selection unchanged. Returns whether the
    /// selection changed.
    pub fn select(&mut self, id: ElementId, additive: bool, doc: &DocStore) -> bool {
        if !selectable(doc, &id) {
            debug!(%id, "select ignored for missing or locked element");
            return false;
        }
        if additive {
            if let Some(pos) = self.ids.iter().position(|s| *s == id) {
                self.ids.remove(pos);
            } else {
                self.ids.push(id);
            }
            return true;
        }
        if self.ids.len() == 1 && self.ids[0] == id {
            return false;
        }
        self.ids.clear();
        self.ids.push(id);
        true
    }

    /// Empty the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Set the selection to exactly `ids`, keeping only live unlocked elements.
    /// Returns whether the selection changed.
    pub fn replace(&mut self, ids: &[ElementId], doc: &DocStore) -> bool {
        let mut next: Vec<ElementId> = Vec::with_capacity(ids.len());
        for id in ids {
            if selectable(doc, id) && !next.contains(id) {
                next.push(*id);
            }
        }
        if next == self.ids {
            return false;
        }
        self.ids = next;
        true
    }

    /// Select every visible, unlocked element in paint order.
    pub fn select_all(&mut self, doc: &DocStore) -> bool {
        let ids: Vec<ElementId> = doc
            .sorted_elements()
            .into_iter()
            .filter(|el| el.is_interactive())
            .map(|el| el.id)
            .collect();
        self.replace(&ids, doc)
    }

    /// Drop a single id. Returns whether it was selected.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    /// Drop ids that no longer reference a live, unlocked element.
    /// Returns whether anything was dropped.
    pub fn retain_live(&mut self, doc: &DocStore) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| selectable(doc, id));
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    /// Selected ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// The only selected id, when exactly one element is selected.
    #[must_use]
    pub fn single(&self) -> Option<ElementId> {
        match self.ids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Most recently added id.
    #[must_use]
    pub fn last(&self) -> Option<ElementId> {
        self.ids.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
