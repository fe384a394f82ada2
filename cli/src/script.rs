//! Scripted editor sessions.
//!
//! A script is a JSON array of events, each tagged by `type`. Coordinates
//! are screen pixels. Elements are addressed by their index in paint order,
//! since ids are generated at replay time.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::camera::{Point, Transform};
use canvas::doc::ElementId;
use canvas::engine::{Action, EngineCore, InspectorEdit};
use canvas::input::{Button, Modifiers, WheelDelta};
use serde::Deserialize;
use tracing::{debug, info};

use crate::CliError;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScriptEvent {
    Add {
        kind: String,
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
    },
    Wheel {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    ZoomIn,
    ZoomOut,
    SetTransform {
        x: f64,
        y: f64,
        scale: f64,
    },
    Select {
        index: usize,
    },
    Deselect,
    /// Start a resize on the element at `index` directly, as the handle would.
    BeginResize {
        index: usize,
        x: f64,
        y: f64,
    },
    OpenInspector {
        index: usize,
    },
    CloseInspector,
    /// Inspector edits on the current selection.
    Edit {
        width: Option<f64>,
        height: Option<f64>,
        colour: Option<String>,
    },
    Remove {
        index: usize,
    },
    Export,
}

/// Apply `events` in order and collect every action the core emits.
///
/// # Errors
///
/// Fails on an unknown element kind or an index with no element.
pub fn replay(core: &mut EngineCore, events: &[ScriptEvent]) -> Result<Vec<Action>, CliError> {
    let mut log = Vec::new();
    for (step, event) in events.iter().enumerate() {
        let actions = apply(core, step, event)?;
        debug!(step, ?event, emitted = actions.len(), "event applied");
        if actions.contains(&Action::ExportRequested) {
            info!(step, elements = core.doc().len(), "export requested");
        }
        log.extend(actions);
    }
    Ok(log)
}

fn apply(core: &mut EngineCore, step: usize, event: &ScriptEvent) -> Result<Vec<Action>, CliError> {
    let actions = match event {
        ScriptEvent::Add { kind } => core.add_element_named(kind)?,
        ScriptEvent::PointerDown { x, y, button, modifiers } => core.on_pointer_down(Point::new(*x, *y), *button, *modifiers),
        ScriptEvent::PointerMove { x, y, modifiers } => core.on_pointer_move(Point::new(*x, *y), *modifiers),
        ScriptEvent::PointerUp { x, y, button } => core.on_pointer_up(Point::new(*x, *y), *button, Modifiers::default()),
        ScriptEvent::Wheel { x, y, dx, dy, modifiers } => {
            core.on_wheel(Point::new(*x, *y), WheelDelta { dx: *dx, dy: *dy }, *modifiers)
        }
        ScriptEvent::ZoomIn => core.zoom_in(),
        ScriptEvent::ZoomOut => core.zoom_out(),
        ScriptEvent::SetTransform { x, y, scale } => core.set_transform(Transform { x: *x, y: *y, scale: *scale }),
        ScriptEvent::Select { index } => {
            let id = element_at(core, step, *index)?;
            core.select(&id)
        }
        ScriptEvent::Deselect => core.deselect(),
        ScriptEvent::BeginResize { index, x, y } => {
            let id = element_at(core, step, *index)?;
            core.begin_resize(&id, Point::new(*x, *y))
        }
        ScriptEvent::OpenInspector { index } => {
            let id = element_at(core, step, *index)?;
            core.open_inspector(&id)
        }
        ScriptEvent::CloseInspector => {
            core.close_inspector();
            Vec::new()
        }
        ScriptEvent::Edit { width, height, colour } => {
            let mut actions = Vec::new();
            if let Some(w) = width {
                actions.extend(core.edit_selected(InspectorEdit::Width(*w)));
            }
            if let Some(h) = height {
                actions.extend(core.edit_selected(InspectorEdit::Height(*h)));
            }
            if let Some(c) = colour {
                actions.extend(core.edit_selected(InspectorEdit::Colour(c.clone())));
            }
            actions
        }
        ScriptEvent::Remove { index } => {
            let id = element_at(core, step, *index)?;
            core.remove_element(&id)
        }
        ScriptEvent::Export => core.request_export(),
    };
    Ok(actions)
}

fn element_at(core: &EngineCore, step: usize, index: usize) -> Result<ElementId, CliError> {
    core.doc().elements().get(index).map(|el| el.id).ok_or(CliError::NoSuchElement { step, index })
}
