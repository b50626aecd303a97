//! Snapshot and export formats at the persistence boundary.
//!
//! The engine exposes its state as a plain [`Snapshot`]; when and where it is
//! written is the host's business. Two renderings are provided: a JSON
//! serialization of the snapshot, and a static HTML page that places each
//! visible element as an absolutely positioned box.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::camera::Camera;
use crate::doc::{CanvasElement, DocStore};

/// Error returned when a snapshot cannot be encoded or decoded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to restore an editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Elements in paint order (bottom first).
    pub elements: Vec<CanvasElement>,
    #[serde(default)]
    pub viewport: Camera,
}

impl Snapshot {
    /// Capture the store and viewport.
    #[must_use]
    pub fn capture(doc: &DocStore, viewport: Camera) -> Self {
        Self {
            elements: doc.sorted_elements().into_iter().cloned().collect(),
            viewport,
        }
    }
}

/// Serialize a snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn to_json(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a snapshot from JSON.
///
/// # Errors
///
/// Returns `Json` if the input is not a valid snapshot document.
pub fn from_json(input: &str) -> Result<Snapshot, SnapshotError> {
    Ok(serde_json::from_str(input)?)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// CSS declarations for the style keys the static export understands.
fn style_css(element: &CanvasElement) -> String {
    let mut css = String::new();
    for (key, value) in &element.style {
        let property = match key.as_str() {
            "fill" => "background",
            "stroke" => "border-color",
            "color" => "color",
            "fontSize" => "font-size",
            "radius" => "border-radius",
            _ => continue,
        };
        let rendered = match value {
            Value::String(s) => escape_html(s),
            Value::Number(n) => format!("{n}px"),
            _ => continue,
        };
        css.push_str(&format!(" {property}: {rendered};"));
    }
    if element.style.contains_key("stroke") {
        css.push_str(" border-style: solid; border-width: 1px;");
    }
    css
}

/// Render visible elements as absolutely positioned boxes, in paint order.
#[must_use]
pub fn render_html(elements: &[CanvasElement]) -> String {
    let mut sorted: Vec<&CanvasElement> = elements.iter().filter(|el| el.visible).collect();
    sorted.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));

    let mut body = String::new();
    for el in sorted {
        let content = el.content.as_deref().map(escape_html).unwrap_or_default();
        let line = format!(
            "    <div class=\"el el-{kind}\" data-id=\"{id}\" style=\"position: absolute; left: {x}px; top: {y}px; width: {w}px; height: {h}px; z-index: {z};{css}\">{content}</div>\n",
            kind = el.kind.as_str(),
            id = el.id,
            x = el.x,
            y = el.y,
            w = el.width,
            h = el.height,
            z = el.z_index,
            css = style_css(el),
        );
        body.push_str(&line);
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>Canvas export</title>\n</head>\n<body>\n  <div class=\"canvas\" style=\"position: relative;\">\n{body}  </div>\n</body>\n</html>\n"
    )
}
