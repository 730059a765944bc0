//! Host platform layer
//!
//! Everything that touches the host window system lives here. The rest of
//! the crate only sees the `wm::Window` trait; this module supplies the
//! concrete variants backed by a native shell, the observer surface those
//! windows report host events through, and a headless platform that stands
//! in for a real window system in tests and the demo binary.
//!
//! ## Modules
//!
//! - `shell` - The native window-system seam and hit-test vocabulary
//! - `host_window` - Task windows with chrome, reconciliation and debounce
//! - `toast_window` - Pooled overlay windows
//! - `headless` - In-process platform: request processing and event routing

use oriel_state::WindowId;
use thiserror::Error;

pub mod headless;
pub mod host_window;
pub mod shell;
pub mod toast_window;

pub use headless::{HeadlessPlatform, HeadlessShell};
pub use host_window::HostWindow;
pub use shell::{HitTarget, NativeShell, ResizeEdge};
pub use toast_window::ToastWindow;

/// Host window-system events, reported by windows to their owning platform.
/// Windows hold their observer weakly; the platform outlives them but the
/// drop order during teardown is not guaranteed.
pub trait Observer: Send + Sync {
    /// The window was closed from the host side.
    fn window_deleted(&self, id: WindowId);

    /// The window gained host focus.
    fn window_wants_focus(&self, id: WindowId);

    /// The window was moved to a new origin, in host-absolute pixels.
    fn window_moved(&self, id: WindowId, x: i32, y: i32);

    /// The window was resized to a new width and height.
    fn window_resized(&self, id: WindowId, width: i32, height: i32);

    /// A key event synthesized by window chrome. 1 is down, 0 is up.
    fn input_key_event(&self, code: u16, down_or_up: i32);
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("No renderer bound, cannot create a window for task {0}")]
    NoRenderer(oriel_state::TaskId),

    #[error("Native window for task {task} could not attach to the renderer")]
    AttachFailed { task: oriel_state::TaskId },
}
