//! Per-frame layer attribution, coordinate remap and resize debounce.
//!
//! The guest compositor hands over one flat, z-ordered list of surfaces per
//! frame with positions in guest-absolute pixels. This module splits that
//! list into per-window groups, rewrites every rectangle into the target
//! window's coordinate space and decides, per window, whether to serve the
//! freshly computed group or to freeze on the previous frame's output while
//! a host-initiated resize is still settling on the guest side.

use std::collections::HashMap;
use std::sync::Arc;

use oriel_state::{Point, Rect, WindowId};
use parking_lot::Mutex;

use crate::consts::TOAST_SURFACE_NAME;
use crate::graphics::renderable::Renderable;
use crate::wm::manager::{WindowManager, WindowTable};
use crate::wm::window::Window;

/// One window's share of a frame: the target window plus its renderables,
/// remapped into window-relative coordinates, in guest z-order.
pub struct WindowGroup {
    pub window: Arc<dyn Window>,
    pub layers: Arc<Vec<Renderable>>,
}

/// Turns a flat guest layer list into per-window draw groups. Called by the
/// composer with the registry locked, so windows seen here cannot be torn
/// down until the returned groups have been drawn.
pub trait ComposerStrategy: Send + Sync {
    fn process_layers(
        &self,
        manager: &WindowManager,
        table: &WindowTable,
        layers: &[Renderable],
    ) -> Vec<WindowGroup>;
}

/// What the debounce remembers about a window between frames: the largest
/// surface's rectangle relative to the frame captured at resize start, and
/// the group actually served.
struct FrameRecord {
    anchor: Rect,
    layers: Arc<Vec<Renderable>>,
}

pub struct MultiWindowStrategy {
    previous: Mutex<HashMap<WindowId, FrameRecord>>,
}

impl MultiWindowStrategy {
    pub fn new() -> Self {
        Self { previous: Mutex::new(HashMap::new()) }
    }

    /// Offset used while the guest still reports geometry from before a
    /// host resize: fold the minimum left/top over the group, shifting each
    /// candidate by half of any overflow beyond the window's current size so
    /// oversized content ends up centered instead of pinned to a corner.
    fn centered_offset(frame: Rect, layers: &[Renderable]) -> Point {
        let mut offset_x = i32::MAX;
        let mut offset_y = i32::MAX;
        for layer in layers {
            let position = layer.screen_position();
            if position.left < offset_x {
                offset_x = position.left;
                let overflow = position.width() - frame.width();
                if overflow > 0 {
                    offset_x += overflow / 2;
                }
            }
            if position.top < offset_y {
                offset_y = position.top;
                let overflow = position.height() - frame.height();
                if overflow > 0 {
                    offset_y += overflow / 2;
                }
            }
        }
        Point::new(offset_x, offset_y)
    }
}

impl Default for MultiWindowStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerStrategy for MultiWindowStrategy {
    fn process_layers(
        &self,
        manager: &WindowManager,
        table: &WindowTable,
        layers: &[Renderable],
    ) -> Vec<WindowGroup> {
        // Attribution pass. Groups keep first-appearance order and every
        // group keeps input order, which is the guest's z-order.
        let mut toast: Option<Renderable> = None;
        let mut grouped: Vec<(Arc<dyn Window>, Vec<Renderable>)> = Vec::new();

        for layer in layers {
            if layer.name() == TOAST_SURFACE_NAME {
                if toast.is_some() {
                    // Upstream is expected to send at most one per frame.
                    // First one wins, the rest are not worth guessing about.
                    tracing::warn!("dropping extra toast surface at {}", layer.screen_position());
                    continue;
                }
                toast = Some(layer.clone());
                continue;
            }

            let Some(task) = layer.task() else {
                tracing::debug!("surface {:?} names no task, dropping for this frame", layer.name());
                continue;
            };
            let Some(window) = table.get(task) else {
                tracing::debug!("no window registered for task {}, dropping surface", task);
                continue;
            };
            match grouped.iter_mut().find(|(w, _)| w.id() == window.id()) {
                Some((_, list)) => list.push(layer.clone()),
                None => grouped.push((window.clone(), vec![layer.clone()])),
            }
        }

        // The toast overlay joins the ordinary remap path as its own group;
        // with the pool window placed exactly at the surface's position the
        // remap below degenerates to (0, 0, w, h). No toast this frame means
        // the whole pool gets collapsed.
        match toast {
            Some(layer) => {
                if let Some(window) = manager.get_toast_window(layer.screen_position()) {
                    grouped.push((window, vec![layer]));
                }
            }
            None => manager.hide_toast_windows(),
        }

        let mut previous = self.previous.lock();
        let mut next: HashMap<WindowId, FrameRecord> = HashMap::with_capacity(grouped.len());
        let mut output = Vec::with_capacity(grouped.len());

        for (window, mut raw) in grouped {
            // Stacking comes from the explicit ordinal; the sort is stable,
            // so equal ordinals keep the guest's input order.
            raw.sort_by_key(|layer| layer.z());

            let frame = window.frame();
            // Read the debounce state once, before anything below can clear
            // it: the first frame after an unfreeze still remaps with the
            // mid-resize policy it was composed under.
            let mid_resize = window.resizable() && window.is_resizing();

            let offset = if mid_resize {
                Self::centered_offset(frame, &raw)
            } else {
                frame.origin()
            };
            let remapped: Vec<Renderable> = raw
                .iter()
                .map(|layer| {
                    let position = layer.screen_position().translated(-offset.x, -offset.y);
                    layer.with_screen_position(position)
                })
                .collect();

            // Debounce anchor: the largest surface this frame, relative to
            // the frame captured when the resize began. While the guest has
            // not relaid out, this shape is stable even though the host
            // window already changed size.
            let last_frame = window.last_frame();
            let mut anchor = Rect::ZERO;
            for layer in &raw {
                let relative = layer.screen_position().translated(-last_frame.left, -last_frame.top);
                if relative.area() > anchor.area() {
                    anchor = relative;
                }
            }

            let layers = match previous.remove(&window.id()) {
                Some(record) if mid_resize && record.anchor == anchor => {
                    // Guest still composes against the pre-resize geometry:
                    // keep serving the output frozen at resize start.
                    record.layers
                }
                _ => {
                    window.set_resizing(false);
                    Arc::new(remapped)
                }
            };

            next.insert(window.id(), FrameRecord { anchor, layers: layers.clone() });
            output.push(WindowGroup { window, layers });
        }

        // Full cache replacement. Windows without a group this frame fall
        // out here and will never be served stale output later.
        *previous = next;
        output
    }
}
