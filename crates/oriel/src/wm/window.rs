//! Window entity and lifecycle state
//!
//! One trait covers the closed set of window variants: `BaseWindow` (plain
//! data + default behavior), the host adapter window, and the pooled toast
//! overlay. The registry owns windows as `Arc<dyn Window>`; everything else
//! holds transient clones for the duration of a call, so all mutation goes
//! through shared references with the interior state of each window guarded
//! by its own mutex. Lock order is always registry before window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use oriel_state::{NativeHandle, Point, Rect, TaskId, WindowId};
use parking_lot::Mutex;

use crate::consts::RESIZE_DEBOUNCE;
use crate::render::Renderer;
use crate::wm::WindowState;

/// Behavior shared by every window variant.
///
/// Only `update_state`, `title_event_filter`, and `destroy_window` differ per
/// variant; the rest are passthroughs into the shared [`WindowBase`].
pub trait Window: Send + Sync {
    fn base(&self) -> &WindowBase;

    fn id(&self) -> WindowId {
        self.base().id()
    }

    fn task(&self) -> Option<TaskId> {
        self.base().task()
    }

    fn title(&self) -> &str {
        self.base().title()
    }

    fn native_handle(&self) -> NativeHandle {
        self.base().native_handle()
    }

    fn frame(&self) -> Rect {
        self.base().frame()
    }

    fn last_frame(&self) -> Rect {
        self.base().last_frame()
    }

    fn resizable(&self) -> bool {
        self.base().resizable()
    }

    fn attached(&self) -> bool {
        self.base().attached()
    }

    fn attach(&self) -> bool {
        self.base().attach()
    }

    fn update_frame(&self, frame: Rect) -> bool {
        self.base().update_frame(frame)
    }

    fn is_resizing(&self) -> bool {
        self.base().is_resizing()
    }

    fn set_resizing(&self, resizing: bool) {
        self.base().set_resizing(resizing)
    }

    /// Reconcile against guest-reported states. The base variant has no
    /// native geometry to reconcile, so this is a no-op by default.
    fn update_state(&self, _states: &[WindowState]) {}

    /// Whether `point` falls into an active title strip.
    fn title_event_filter(&self, _point: Point) -> bool {
        false
    }

    /// Terminal: release the native handle. Operations after this are
    /// undefined and the registry entry is expected to go away.
    fn destroy_window(&self) {
        self.base().release();
    }
}

/// Overlay windows add pool visibility control on top of the window trait.
pub trait OverlayWindow: Window {
    /// Apply `frame` and show the window. A degenerate frame hides instead.
    fn show_at(&self, frame: Rect);

    fn hide(&self);

    fn visible(&self) -> bool;
}

/// Geometry and debounce bookkeeping, guarded together: the resizing flag is
/// meaningless without the last_frame it froze.
struct Geometry {
    frame: Rect,
    last_frame: Rect,
    resizing: bool,
    last_resize_at: Instant,
}

/// State shared by every window variant.
pub struct WindowBase {
    id: WindowId,
    task: Option<TaskId>,
    title: String,
    native: NativeHandle,
    renderer: Option<Arc<dyn Renderer>>,
    resizable: bool,
    attached: AtomicBool,
    geometry: Mutex<Geometry>,
}

impl WindowBase {
    pub fn new(
        renderer: Option<Arc<dyn Renderer>>,
        task: Option<TaskId>,
        frame: Rect,
        title: impl Into<String>,
        native: NativeHandle,
        resizable: bool,
    ) -> Self {
        Self {
            id: WindowId::next(),
            task,
            title: title.into(),
            native,
            renderer,
            resizable,
            attached: AtomicBool::new(false),
            geometry: Mutex::new(Geometry {
                frame,
                last_frame: frame,
                resizing: false,
                last_resize_at: Instant::now(),
            }),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn task(&self) -> Option<TaskId> {
        self.task
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn native_handle(&self) -> NativeHandle {
        self.native
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Bind to the native rendering target. Fails when no renderer is bound;
    /// re-attaching after a failed attach is legal.
    pub fn attach(&self) -> bool {
        let Some(renderer) = &self.renderer else {
            return false;
        };
        let attached = renderer.create_native_window(self.native);
        self.attached.store(attached, Ordering::SeqCst);
        attached
    }

    /// Release the native rendering target, if bound.
    pub fn release(&self) {
        if self.attached.swap(false, Ordering::SeqCst) {
            if let Some(renderer) = &self.renderer {
                renderer.destroy_native_window(self.native);
            }
        }
    }

    pub fn frame(&self) -> Rect {
        self.geometry.lock().frame
    }

    pub fn last_frame(&self) -> Rect {
        self.geometry.lock().last_frame
    }

    /// Set the frame. A no-op returning false when nothing changes, so
    /// downstream notifications stay edge-triggered.
    pub fn update_frame(&self, frame: Rect) -> bool {
        let mut g = self.geometry.lock();
        if g.frame == frame {
            return false;
        }
        g.frame = frame;
        true
    }

    /// Flip the resizing flag. The false→true transition snapshots
    /// last_frame so the composer can keep serving the pre-resize coordinate
    /// space; every true refreshes the debounce deadline.
    pub fn set_resizing(&self, resizing: bool) {
        let mut g = self.geometry.lock();
        if resizing {
            if !g.resizing {
                g.last_frame = g.frame;
            }
            g.resizing = true;
            g.last_resize_at = Instant::now();
        } else {
            g.resizing = false;
        }
    }

    /// Current resizing state. Auto-clears once the debounce interval passes
    /// without a new move/resize event, snapshotting last_frame back to the
    /// settled frame.
    pub fn is_resizing(&self) -> bool {
        let mut g = self.geometry.lock();
        if g.resizing && g.last_resize_at.elapsed() > RESIZE_DEBOUNCE {
            g.resizing = false;
            g.last_frame = g.frame;
        }
        g.resizing
    }

    /// Shift the debounce deadline into the past. Lets tests cross the
    /// auto-clear boundary without sleeping.
    #[cfg(test)]
    pub(crate) fn backdate_resize(&self, by: std::time::Duration) {
        let mut g = self.geometry.lock();
        g.last_resize_at -= by;
    }
}

/// Plain window: shared state plus default trait behavior, nothing else.
pub struct BaseWindow {
    base: WindowBase,
}

impl BaseWindow {
    pub fn new(
        renderer: Option<Arc<dyn Renderer>>,
        task: Option<TaskId>,
        frame: Rect,
        title: impl Into<String>,
        native: NativeHandle,
    ) -> Self {
        Self {
            base: WindowBase::new(renderer, task, frame, title, native, true),
        }
    }
}

impl Window for BaseWindow {
    fn base(&self) -> &WindowBase {
        &self.base
    }
}
