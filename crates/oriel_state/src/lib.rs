//! Shared state for the oriel compositor
//!
//! This crate holds the vocabulary types and cross-actor plumbing that both
//! the engine library and its binary need: id newtypes, integer geometry,
//! the typed window-request channel, and the process-wide session context.
//! Keeping them here keeps the engine crates decoupled from each other and
//! from any particular windowing backend.

pub mod channels;
pub mod context;
pub mod geometry;
pub mod ids;

pub use channels::{window_request_channel, WindowRequest, WindowRequestReceiver, WindowRequestSender};
pub use context::SessionContext;
pub use geometry::{Point, Rect};
pub use ids::{NativeHandle, TaskId, WindowId};
