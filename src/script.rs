//! Scripted input replay.
//!
//! A script is a JSON array of steps, each tagged by `op`. Steps map one to
//! one onto engine entry points, so a replay exercises exactly the code path
//! a live host would.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::align::{Alignment, Axis};
use canvas::doc::{ElementKind, ElementOverrides};
use canvas::engine::{Action, EngineCore};
use canvas::geometry::Point;
use canvas::input::{Button, ComponentDrop, Key, Modifiers, Tool, WheelDelta};
use serde::Deserialize;
use tracing::{debug, info};

/// One scripted event or command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool {
        tool: Tool,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerLeave,
    Wheel {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Place an element at world coordinates.
    Add {
        #[serde(rename = "type")]
        kind: ElementKind,
        x: f64,
        y: f64,
        #[serde(default)]
        overrides: ElementOverrides,
    },
    /// Drop a palette component at a screen point.
    Drop {
        component: ComponentDrop,
        x: f64,
        y: f64,
    },
    Align {
        alignment: Alignment,
    },
    Distribute {
        axis: Axis,
    },
    BringToFront,
    SendToBack,
    Duplicate,
    Delete,
    SelectAll,
    ClearSelection,
    Zoom {
        zoom: f64,
    },
    ResetView,
}

/// Summary of a finished replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replay {
    pub steps: usize,
    pub actions: usize,
    /// User-facing notices raised along the way, in order.
    pub notices: Vec<String>,
}

/// Feed one step to the engine.
pub fn apply(core: &mut EngineCore, step: Step) -> Vec<Action> {
    match step {
        Step::Tool { tool } => core.set_tool(tool),
        Step::PointerDown { x, y, button, modifiers } => core.on_pointer_down(Point::new(x, y), button, modifiers),
        Step::PointerMove { x, y, modifiers } => core.on_pointer_move(Point::new(x, y), modifiers),
        Step::PointerUp { x, y, button, modifiers } => core.on_pointer_up(Point::new(x, y), button, modifiers),
        Step::PointerLeave => core.on_pointer_leave(),
        Step::Wheel { dx, dy, modifiers } => core.on_wheel(WheelDelta { dx, dy }, modifiers),
        Step::Key { key, modifiers } => core.on_key_down(&Key::new(key), modifiers),
        Step::Add { kind, x, y, overrides } => core.add(kind, x, y, overrides).1,
        Step::Drop { component, x, y } => core.drop_component(component, Point::new(x, y)).1,
        Step::Align { alignment } => core.align_selection(alignment),
        Step::Distribute { axis } => core.distribute_selection(axis),
        Step::BringToFront => core.bring_selection_to_front(),
        Step::SendToBack => core.send_selection_to_back(),
        Step::Duplicate => core.duplicate_selection(),
        Step::Delete => core.delete_selection(),
        Step::SelectAll => core.select_all(),
        Step::ClearSelection => core.clear_selection(),
        Step::Zoom { zoom } => core.set_zoom(zoom),
        Step::ResetView => core.reset_view(),
    }
}

/// Run every step in order.
pub fn replay(core: &mut EngineCore, steps: Vec<Step>) -> Replay {
    let mut report = Replay::default();
    for step in steps {
        debug!(?step, "step");
        let actions = apply(core, step);
        report.steps += 1;
        report.actions += actions.len();
        for action in actions {
            if let Action::Notify(message) = action {
                info!(%message, "notice");
                report.notices.push(message);
            }
        }
    }
    report
}

/// Parse a script document.
///
/// # Errors
///
/// Returns the JSON error if the input is not an array of known steps.
pub fn parse(input: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(input)
}
