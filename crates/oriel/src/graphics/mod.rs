//! Layer composition module
//!
//! This module turns the flat per-frame layer list coming out of the guest
//! compositor into per-window draw calls: renderables are attributed to
//! windows, remapped into window-relative coordinates and handed to the
//! renderer grouped by target.

pub mod composer;
pub mod renderable;
pub mod strategy;

pub use composer::LayerComposer;
pub use renderable::Renderable;
pub use strategy::{ComposerStrategy, MultiWindowStrategy, WindowGroup};
