//! Infinite-canvas diagram editor core, plus the fishbone cause diagram.
//!
//! The crate compiles to WebAssembly for the browser and to a native library
//! for the `studio` CLI. All state lives in one explicit
//! [`engine::EngineCore`]: the element registry, the view transform, the
//! selection and the current pointer gesture. Pointer and wheel handlers
//! return [`engine::Action`]s for the host to persist or react to, and
//! [`engine::EngineCore::scene`] projects the state into screen space.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller, [`engine::EngineCore`] and the browser-bound [`engine::Engine`] |
//! | [`doc`] | Element model and the ordered element registry |
//! | [`camera`] | View transform, zoom bounds and coordinate conversions |
//! | [`input`] | Pointer types, UI state and the gesture state machine |
//! | [`hit`] | Hit-testing element bodies and the resize handle |
//! | [`render`] | Pure projection of state into a screen-space [`render::Scene`] |
//! | [`draw`] | Paints a scene to a `CanvasRenderingContext2d` |
//! | [`config`] | Tunable limits and wheel behaviour |
//! | [`analysis`] | Fishbone analysis data model |
//! | [`fishbone`] | Cause categories, fishbone layout and SVG output |
//! | [`consts`] | Shared numeric defaults |

pub mod analysis;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod draw;
pub mod engine;
pub mod fishbone;
pub mod hit;
pub mod input;
pub mod render;
