//! Document model: canvas elements, sparse patches, and the ordered registry.
//!
//! This module defines what is on the canvas (`CanvasElement`, `ElementKind`),
//! a sparse-update type for incremental edits (`PartialElement`), and the
//! store that owns all live elements (`ElementStore`).
//!
//! Elements keep insertion order. The renderer walks `elements()` front to
//! back, so an element added later is painted on top of earlier ones.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_BORDER, DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y, DEFAULT_FILL, MIN_ELEMENT_SIZE};

/// Unique identifier for a canvas element.
pub type ElementId = Uuid;

/// Error returned when an element cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    /// The requested element type is not one the canvas knows how to draw.
    #[error("unknown element kind: {0}")]
    UnknownKind(String),
}

/// The kind of a canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Rounded rectangle.
    Rectangle,
    /// Circle (ellipse when resized to a non-square box).
    Circle,
}

impl ElementKind {
    /// Default `(width, height)` for a freshly added element.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Rectangle => (200.0, 100.0),
            Self::Circle => (100.0, 100.0),
        }
    }

    /// Default CSS border radius for a freshly added element.
    #[must_use]
    pub fn default_border_radius(self) -> &'static str {
        match self {
            Self::Rectangle => "6px",
            Self::Circle => "50%",
        }
    }
}

impl FromStr for ElementKind {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            _ => Err(DocError::UnknownKind(s.to_owned())),
        }
    }
}

/// A shape placed on the canvas. Geometry is in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fill colour as a CSS colour string.
    pub colour: String,
    /// CSS border shorthand, e.g. `"2px solid grey"`.
    pub border: String,
    /// CSS border radius, in `px` or `%`.
    pub border_radius: String,
}

impl CanvasElement {
    /// Build an element of `kind` with the default position, size and style.
    #[must_use]
    pub fn with_defaults(kind: ElementKind) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: Uuid::new_v4(),
            kind,
            x: DEFAULT_ELEMENT_X,
            y: DEFAULT_ELEMENT_Y,
            width,
            height,
            colour: DEFAULT_FILL.to_owned(),
            border: DEFAULT_BORDER.to_owned(),
            border_radius: kind.default_border_radius().to_owned(),
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

impl PartialElement {
    /// Patch that moves an element's origin.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Patch that resizes an element.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }
}

/// In-memory, insertion-ordered store of canvas elements.
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<CanvasElement>,
    min_size: f64,
}

impl ElementStore {
    /// Create an empty store using the default minimum element size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_size(MIN_ELEMENT_SIZE)
    }

    /// Create an empty store that floors width and height at `min_size`.
    #[must_use]
    pub fn with_min_size(min_size: f64) -> Self {
        let min_size = if min_size.is_finite() && min_size > 0.0 { min_size } else { MIN_ELEMENT_SIZE };
        Self { elements: Vec::new(), min_size }
    }

    #[must_use]
    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Append a new element of `kind` with default geometry and style.
    pub fn add(&mut self, kind: ElementKind) -> &CanvasElement {
        self.push(CanvasElement::with_defaults(kind))
    }

    /// Parse `kind` and append a default element.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnknownKind`] when `kind` names no element type. The
    /// store is left unchanged.
    pub fn add_named(&mut self, kind: &str) -> Result<&CanvasElement, DocError> {
        let kind = kind.parse::<ElementKind>()?;
        Ok(self.add(kind))
    }

    /// Append an existing element, replacing any element with the same id in
    /// place. Undersized geometry is floored at the minimum size.
    pub fn insert(&mut self, mut element: CanvasElement) -> &CanvasElement {
        element.width = self.floor_size(element.width);
        element.height = self.floor_size(element.height);
        if let Some(idx) = self.index_of(&element.id) {
            self.elements[idx] = element;
            return &self.elements[idx];
        }
        self.push(element)
    }

    fn push(&mut self, element: CanvasElement) -> &CanvasElement {
        let idx = self.elements.len();
        self.elements.push(element);
        &self.elements[idx]
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == *id)
    }

    /// Apply a partial update. Width and height are floored at the minimum
    /// size and non-finite numbers are skipped. Returns false if the element
    /// doesn't exist.
    pub fn update(&mut self, id: &ElementId, partial: &PartialElement) -> bool {
        let min = self.min_size;
        let Some(el) = self.elements.iter_mut().find(|e| e.id == *id) else {
            return false;
        };
        if let Some(x) = partial.x.filter(|v| v.is_finite()) {
            el.x = x;
        }
        if let Some(y) = partial.y.filter(|v| v.is_finite()) {
            el.y = y;
        }
        if let Some(w) = partial.width.filter(|v| v.is_finite()) {
            el.width = w.max(min);
        }
        if let Some(h) = partial.height.filter(|v| v.is_finite()) {
            el.height = h.max(min);
        }
        if let Some(ref colour) = partial.colour {
            el.colour.clone_from(colour);
        }
        if let Some(ref border) = partial.border {
            el.border.clone_from(border);
        }
        if let Some(ref radius) = partial.border_radius {
            el.border_radius.clone_from(radius);
        }
        true
    }

    /// Remove an element by id, returning it if it was present.
    #[cfg(feature = "element-removal")]
    pub fn remove(&mut self, id: &ElementId) -> Option<CanvasElement> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// All elements in paint order (first = bottom).
    #[must_use]
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn floor_size(&self, v: f64) -> f64 {
        if v.is_finite() { v.max(self.min_size) } else { self.min_size }
    }
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}
