//! Renderer seam
//!
//! The compositor never draws pixels itself; it binds windows to native
//! rendering targets and hands each one a remapped layer list per frame.
//! Everything behind this trait is someone else's GPU problem.

use oriel_state::{NativeHandle, Rect};

use crate::graphics::Renderable;

pub trait Renderer: Send + Sync {
    /// Bind a native window so it can be drawn into. False means the target
    /// could not be created; the caller decides whether to roll back.
    fn create_native_window(&self, handle: NativeHandle) -> bool;

    /// Release a previously created native window.
    fn destroy_native_window(&self, handle: NativeHandle);

    /// Draw one window's layers. `viewport` covers the window's current size
    /// anchored at the origin; `layers` are already window-relative.
    fn draw(&self, handle: NativeHandle, viewport: Rect, layers: &[Renderable]) -> bool;
}

/// Renderer that accepts everything and draws nothing. Stands in for a real
/// backend in the demo binary and wherever tests only care about the calls.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl NullRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for NullRenderer {
    fn create_native_window(&self, handle: NativeHandle) -> bool {
        tracing::debug!("null renderer: created native window {}", handle);
        true
    }

    fn destroy_native_window(&self, handle: NativeHandle) {
        tracing::debug!("null renderer: destroyed native window {}", handle);
    }

    fn draw(&self, handle: NativeHandle, viewport: Rect, layers: &[Renderable]) -> bool {
        tracing::trace!(
            "null renderer: draw {} layers into window {} viewport {}",
            layers.len(),
            handle,
            viewport
        );
        true
    }
}
