//! Per-frame composition entry point.

use std::sync::Arc;

use oriel_state::Rect;

use crate::graphics::renderable::Renderable;
use crate::graphics::strategy::ComposerStrategy;
use crate::render::Renderer;
use crate::wm::WindowManager;

/// Drives one composition pass per displayed frame. No geometry logic lives
/// here; the composer's only own job is to hold the registry for the whole
/// traversal so a window cannot be torn down between grouping and drawing.
pub struct LayerComposer {
    renderer: Arc<dyn Renderer>,
    strategy: Box<dyn ComposerStrategy>,
    manager: Arc<WindowManager>,
}

impl LayerComposer {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        strategy: Box<dyn ComposerStrategy>,
        manager: Arc<WindowManager>,
    ) -> Self {
        Self { renderer, strategy, manager }
    }

    /// Called by the render actor with this frame's flat layer list.
    pub fn submit_layers(&self, layers: &[Renderable]) {
        let table = self.manager.lock_windows();
        let groups = self.strategy.process_layers(&self.manager, &table, layers);
        for group in &groups {
            let frame = group.window.frame();
            let viewport = Rect::with_size(frame.width(), frame.height());
            if !self.renderer.draw(group.window.native_handle(), viewport, &group.layers) {
                tracing::warn!("draw failed for window {}", group.window.id());
            }
        }
    }
}
