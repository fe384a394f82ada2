use serde::Serialize;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Transform};
use crate::config::CanvasConfig;
use crate::consts::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::doc::{CanvasElement, DocError, ElementId, ElementKind, ElementStore, PartialElement};
use crate::draw;
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, InteractionMode, Modifiers, UiState, WheelDelta, WheelMode};
use crate::render::{self, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_IDLE: &str = "grab";
const CURSOR_PANNING: &str = "grabbing";
const CURSOR_OVER_ELEMENT: &str = "move";
const CURSOR_RESIZE: &str = "nwse-resize";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    ElementCreated { element: CanvasElement },
    ElementUpdated { id: ElementId, fields: PartialElement },
    ElementRemoved { id: ElementId },
    SelectionChanged { id: Option<ElementId> },
    SetCursor { cursor: String },
    /// The user pressed the export button. The host owns the export format.
    ExportRequested,
    RenderNeeded,
}

/// A field edit coming from the inspector panel.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorEdit {
    Width(f64),
    Height(f64),
    Colour(String),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies. This is the single writer of the transform, the element
/// store and the selection; everything else reads through the accessors.
pub struct EngineCore {
    doc: ElementStore,
    camera: Camera,
    ui: UiState,
    input: InputState,
    config: CanvasConfig,
    cursor: &'static str,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            doc: ElementStore::with_min_size(config.min_element_size),
            camera: Camera::new(config.zoom_bounds()),
            ui: UiState::default(),
            input: InputState::Idle,
            config,
            cursor: CURSOR_IDLE,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Elements ---

    /// Add an element of `kind` at the default position.
    pub fn add_element(&mut self, kind: ElementKind) -> Vec<Action> {
        let element = self.doc.add(kind).clone();
        debug!(id = %element.id, ?kind, "element added");
        vec![Action::ElementCreated { element }, Action::RenderNeeded]
    }

    /// Add an element by kind name.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnknownKind`] for an unrecognized name; nothing is added.
    pub fn add_element_named(&mut self, kind: &str) -> Result<Vec<Action>, DocError> {
        let kind = kind.parse::<ElementKind>()?;
        Ok(self.add_element(kind))
    }

    /// Apply a sparse patch to an element. Unknown ids, and patches that
    /// leave the element as it was, are a no-op.
    pub fn update_element(&mut self, id: &ElementId, fields: &PartialElement) -> Vec<Action> {
        let Some(before) = self.doc.get(id).cloned() else {
            debug!(%id, "update for unknown element ignored");
            return Vec::new();
        };
        if !self.doc.update(id, fields) || self.doc.get(id) == Some(&before) {
            debug!(%id, "patch changed nothing");
            return Vec::new();
        }
        vec![Action::ElementUpdated { id: *id, fields: self.applied(id, fields) }, Action::RenderNeeded]
    }

    /// Remove an element, dropping the selection and any gesture that refers to it.
    #[cfg(feature = "element-removal")]
    pub fn remove_element(&mut self, id: &ElementId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        debug!(%id, "element removed");
        if self.input.target() == Some(*id) {
            self.input = InputState::Idle;
        }
        let mut actions = vec![Action::ElementRemoved { id: *id }];
        if self.ui.selected_id == Some(*id) {
            actions.extend(self.deselect());
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Replace every element with `elements`, keeping the selection only if it survives.
    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) -> Vec<Action> {
        self.doc.clear();
        for el in elements {
            self.doc.insert(el);
        }
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if self.ui.selected_id.is_some_and(|id| !self.doc.contains(&id)) {
            actions.extend(self.deselect());
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every element and reset the selection.
    pub fn clear(&mut self) -> Vec<Action> {
        self.load_snapshot(Vec::new())
    }

    // --- Selection / inspector ---

    /// Select an element. Returns no actions if `id` is unknown or already selected.
    pub fn select(&mut self, id: &ElementId) -> Vec<Action> {
        if !self.doc.contains(id) || self.ui.selected_id == Some(*id) {
            return Vec::new();
        }
        self.ui.selected_id = Some(*id);
        vec![Action::SelectionChanged { id: Some(*id) }, Action::RenderNeeded]
    }

    /// Clear the selection and close the inspector.
    pub fn deselect(&mut self) -> Vec<Action> {
        self.ui.inspector_open = false;
        if self.ui.selected_id.take().is_none() {
            return Vec::new();
        }
        vec![Action::SelectionChanged { id: None }, Action::RenderNeeded]
    }

    /// Select `id` and show it in the inspector.
    pub fn open_inspector(&mut self, id: &ElementId) -> Vec<Action> {
        if !self.doc.contains(id) {
            return Vec::new();
        }
        let actions = self.select(id);
        self.ui.inspector_open = true;
        actions
    }

    /// Hide the inspector. The selection is kept.
    pub fn close_inspector(&mut self) {
        self.ui.inspector_open = false;
    }

    /// Apply an inspector field edit to the selected element.
    pub fn edit_selected(&mut self, edit: InspectorEdit) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let patch = match edit {
            InspectorEdit::Width(w) => PartialElement { width: Some(w), ..Default::default() },
            InspectorEdit::Height(h) => PartialElement { height: Some(h), ..Default::default() },
            InspectorEdit::Colour(c) => PartialElement { colour: Some(c), ..Default::default() },
        };
        self.update_element(&id, &patch)
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.camera.zoom_step(self.config.zoom_increment);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.camera.zoom_step(-self.config.zoom_increment);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        self.camera.zoom_by(factor);
        vec![Action::RenderNeeded]
    }

    pub fn set_transform(&mut self, transform: Transform) -> Vec<Action> {
        self.camera.set_transform(transform);
        vec![Action::RenderNeeded]
    }

    /// Record the CSS viewport size and device pixel ratio. Non-finite or
    /// negative extents become 0; a bad ratio becomes 1.
    pub fn set_viewport_size(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let extent = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.viewport_width = extent(width_css);
        self.viewport_height = extent(height_css);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Toolbar export button.
    #[must_use]
    pub fn request_export(&self) -> Vec<Action> {
        debug!(elements = self.doc.len(), "export requested");
        vec![Action::ExportRequested]
    }

    // --- Gestures ---

    /// Start panning from `screen_pt`.
    pub fn begin_pan(&mut self, screen_pt: Point) -> Vec<Action> {
        let t = self.camera.transform();
        let anchor = Point::new(screen_pt.x - t.x, screen_pt.y - t.y);
        self.input = InputState::Panning { anchor };
        debug!(?anchor, "pan started");
        self.set_cursor(CURSOR_PANNING).into_iter().collect()
    }

    /// Select `id` and start dragging it from `screen_pt`.
    pub fn begin_drag(&mut self, id: &ElementId, screen_pt: Point) -> Vec<Action> {
        let Some(el) = self.doc.get(id) else {
            debug!(%id, "drag on unknown element ignored");
            return Vec::new();
        };
        let pointer = self.camera.transform().to_canvas(screen_pt);
        let offset = Point::new(pointer.x - el.x, pointer.y - el.y);
        self.input = InputState::DraggingElement { id: *id, offset };
        debug!(%id, ?offset, "drag started");

        let mut actions = self.select(id);
        actions.extend(self.set_cursor(CURSOR_OVER_ELEMENT));
        actions
    }

    /// Start resizing `id` from its handle at `screen_pt`.
    pub fn begin_resize(&mut self, id: &ElementId, screen_pt: Point) -> Vec<Action> {
        let Some(el) = self.doc.get(id) else {
            debug!(%id, "resize on unknown element ignored");
            return Vec::new();
        };
        let anchor = self.camera.transform().to_canvas(screen_pt);
        self.input = InputState::ResizingElement {
            id: *id,
            anchor,
            start_width: el.width,
            start_height: el.height,
        };
        debug!(%id, ?anchor, "resize started");

        let mut actions = self.select(id);
        actions.extend(self.set_cursor(CURSOR_RESIZE));
        actions
    }

    // --- Input events ---

    /// Dispatch a pointer-down to pan, drag or resize based on what is under the pointer.
    ///
    /// Exactly one gesture starts per event: a hit on an element never also pans.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        // A missed pointer-up must not leave a stale gesture running.
        self.input = InputState::Idle;

        match button {
            Button::Middle => self.begin_pan(screen_pt),
            Button::Secondary => Vec::new(),
            Button::Primary => {
                let hit = hit::hit_test(screen_pt, &self.doc, &self.camera.transform(), self.ui.selected_id);
                match hit {
                    Some(h) if h.part == HitPart::ResizeHandle => self.begin_resize(&h.element_id, screen_pt),
                    Some(h) => self.begin_drag(&h.element_id, screen_pt),
                    None => {
                        let mut actions = self.deselect();
                        actions.extend(self.begin_pan(screen_pt));
                        actions
                    }
                }
            }
        }
    }

    /// Advance the active gesture to `screen_pt`.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        let t = self.camera.transform();
        let input = self.input;

        match input {
            InputState::Idle => {
                let cursor = self.hover_cursor(screen_pt);
                self.set_cursor(cursor).into_iter().collect()
            }
            InputState::Panning { anchor } => {
                self.camera.pan_to(screen_pt.x - anchor.x, screen_pt.y - anchor.y);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingElement { id, offset } => {
                let pointer = t.to_canvas(screen_pt);
                let fields = PartialElement::position(pointer.x - offset.x, pointer.y - offset.y);
                self.apply_gesture_patch(id, &fields)
            }
            InputState::ResizingElement { id, anchor, start_width, start_height } => {
                let pointer = t.to_canvas(screen_pt);
                let min = self.doc.min_size();
                let fields = PartialElement::size(
                    (start_width + (pointer.x - anchor.x)).max(min),
                    (start_height + (pointer.y - anchor.y)).max(min),
                );
                self.apply_gesture_patch(id, &fields)
            }
        }
    }

    /// End whatever gesture is active.
    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.input != InputState::Idle {
            debug!(mode = ?self.input.mode(), "gesture ended");
        }
        self.input = InputState::Idle;
        let cursor = if screen_pt.is_finite() { self.hover_cursor(screen_pt) } else { CURSOR_IDLE };
        self.set_cursor(cursor).into_iter().collect()
    }

    /// Wheel: zoom or pan depending on the configured wheel mode and modifiers.
    /// Ignored while the pointer is over the selected element's resize handle.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !delta.dx.is_finite() || !delta.dy.is_finite() {
            return Vec::new();
        }
        if self.over_resize_handle(screen_pt) {
            return Vec::new();
        }

        let zoom = match self.config.wheel_mode {
            WheelMode::Zoom => true,
            WheelMode::PanOrZoom => modifiers.zoom(),
        };
        if zoom {
            let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
            self.camera.zoom_by(factor);
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected element id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    /// The selected element, as shown in the inspector.
    #[must_use]
    pub fn selected_element(&self) -> Option<&CanvasElement> {
        self.ui.selected_id.and_then(|id| self.doc.get(&id))
    }

    #[must_use]
    pub fn inspector_open(&self) -> bool {
        self.ui.inspector_open && self.ui.selected_id.is_some()
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.camera.transform()
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn doc(&self) -> &ElementStore {
        &self.doc
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.input.mode()
    }

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.doc.get(id)
    }

    /// Project the current state to screen space.
    #[must_use]
    pub fn scene(&self) -> Scene {
        render::project(&self.camera.transform(), &self.doc, &self.ui, &self.config.grid_style())
    }

    // --- Helpers ---

    fn apply_gesture_patch(&mut self, id: ElementId, fields: &PartialElement) -> Vec<Action> {
        if !self.doc.update(&id, fields) {
            debug!(%id, "gesture target vanished");
            self.input = InputState::Idle;
            return Vec::new();
        }
        vec![Action::ElementUpdated { id, fields: fields.clone() }, Action::RenderNeeded]
    }

    /// The patch as it actually landed, with clamped values read back from the store.
    fn applied(&self, id: &ElementId, fields: &PartialElement) -> PartialElement {
        let Some(el) = self.doc.get(id) else {
            return fields.clone();
        };
        PartialElement {
            x: fields.x.map(|_| el.x),
            y: fields.y.map(|_| el.y),
            width: fields.width.map(|_| el.width),
            height: fields.height.map(|_| el.height),
            colour: fields.colour.as_ref().map(|_| el.colour.clone()),
            border: fields.border.as_ref().map(|_| el.border.clone()),
            border_radius: fields.border_radius.as_ref().map(|_| el.border_radius.clone()),
        }
    }

    fn over_resize_handle(&self, screen_pt: Point) -> bool {
        screen_pt.is_finite()
            && self
                .selected_element()
                .is_some_and(|el| hit::handle_contains(el, &self.camera.transform(), screen_pt))
    }

    fn hover_cursor(&self, screen_pt: Point) -> &'static str {
        match hit::hit_test(screen_pt, &self.doc, &self.camera.transform(), self.ui.selected_id) {
            Some(h) if h.part == HitPart::ResizeHandle => CURSOR_RESIZE,
            Some(_) => CURSOR_OVER_ELEMENT,
            None => CURSOR_IDLE,
        }
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor { cursor: cursor.to_owned() })
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport_size(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((self.core.viewport_width * dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * dpr).round() as u32);
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        draw::draw(&ctx, &self.core.scene(), self.core.viewport_width, self.core.viewport_height, self.core.dpr)
    }
}
