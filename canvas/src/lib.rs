//! Canvas editing engine for the visual design tool.
//!
//! This crate is the authoritative in-memory model of placed elements and the
//! direct-manipulation machinery around it: translating raw pointer, wheel and
//! key events into store mutations, maintaining the pan/zoom viewport,
//! hit-testing elements and resize handles, and aligning or restacking the
//! selection. It does no rendering and no I/O; the host draws from the store
//! and persists [`export::Snapshot`]s when it sees fit.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: interaction controller and editing API |
//! | [`doc`] | Element types and the in-memory element store |
//! | [`selection`] | Ordered multi-selection |
//! | [`camera`] | Pan/zoom viewport with clamped zoom |
//! | [`geometry`] | Screen/world coordinate conversions and bounding boxes |
//! | [`input`] | Tools, modifiers, and the gesture state machine |
//! | [`hit`] | Hit-testing against elements and resize handles |
//! | [`resize`] | Anchored resize math with the size floor |
//! | [`align`] | Alignment and distribution of a multi-selection |
//! | [`export`] | Snapshots, JSON, and static HTML export |
//! | [`config`] | Engine tuning knobs |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod align;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod resize;
pub mod selection;
