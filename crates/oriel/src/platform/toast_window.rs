//! Pooled overlay windows for transient guest notifications.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use oriel_state::Rect;

use crate::platform::shell::NativeShell;
use crate::render::Renderer;
use crate::wm::window::{OverlayWindow, Window, WindowBase};
use crate::wm::window_state::{Stack, WindowState};

/// One slot of the toast pool. Created hidden and zero-sized at startup;
/// the composer positions and shows it when a toast surface arrives and
/// collapses it again when none does. Toasts belong to no task and take no
/// chrome or focus.
pub struct ToastWindow {
    base: WindowBase,
    shell: Arc<dyn NativeShell>,
    visible: AtomicBool,
}

impl ToastWindow {
    pub fn new(renderer: Option<Arc<dyn Renderer>>, shell: Arc<dyn NativeShell>) -> Self {
        let frame = shell.frame();
        shell.hide();
        Self {
            base: WindowBase::new(renderer, None, frame, "toast", shell.native_handle(), false),
            shell,
            visible: AtomicBool::new(false),
        }
    }

    fn apply_frame(&self, frame: Rect) {
        if self.base.frame() != frame {
            self.shell.set_frame(frame);
            self.base.update_frame(frame);
        }
        self.shell.show();
        self.visible.store(true, Ordering::SeqCst);
    }
}

impl Window for ToastWindow {
    fn base(&self) -> &WindowBase {
        &self.base
    }

    /// A Default-stack state means the toast went away on the guest side;
    /// anything else carries the geometry to show at.
    fn update_state(&self, states: &[WindowState]) {
        let Some(state) = states.first() else {
            return;
        };
        if state.stack() == Stack::Default {
            self.hide();
            return;
        }
        self.apply_frame(state.frame());
    }
}

impl OverlayWindow for ToastWindow {
    fn show_at(&self, frame: Rect) {
        if frame.is_degenerate() {
            self.hide();
            return;
        }
        self.apply_frame(frame);
    }

    fn hide(&self) {
        self.shell.hide();
        self.visible.store(false, Ordering::SeqCst);
    }

    fn visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessShell;
    use oriel_state::{NativeHandle, TaskId};

    fn toast() -> (ToastWindow, Arc<HeadlessShell>) {
        let shell = Arc::new(HeadlessShell::new(NativeHandle::new(5), Rect::ZERO));
        (ToastWindow::new(None, shell.clone()), shell)
    }

    #[test]
    fn test_starts_hidden_and_zero_sized() {
        let (toast, shell) = toast();
        assert!(!toast.visible());
        assert!(!shell.shown());
        assert!(toast.frame().is_degenerate());
    }

    #[test]
    fn test_show_at_applies_frame_and_shows() {
        let (toast, shell) = toast();
        let frame = Rect::from_origin_size(200, 800, 400, 90);

        toast.show_at(frame);
        assert!(toast.visible());
        assert!(shell.shown());
        assert_eq!(toast.frame(), frame);
        assert_eq!(shell.frame(), frame);
    }

    #[test]
    fn test_degenerate_frame_hides() {
        let (toast, shell) = toast();
        toast.show_at(Rect::from_origin_size(200, 800, 400, 90));

        toast.show_at(Rect::ZERO);
        assert!(!toast.visible());
        assert!(!shell.shown());
        // The last real geometry is kept; hiding does not zero the frame.
        assert_eq!(toast.frame(), Rect::from_origin_size(200, 800, 400, 90));
    }

    #[test]
    fn test_update_state_hides_on_default_stack() {
        let (toast, _shell) = toast();
        toast.show_at(Rect::from_origin_size(200, 800, 400, 90));

        let state =
            WindowState::new(0, true, Rect::ZERO, "org.oriel.toast", TaskId::INVALID, Stack::Default);
        toast.update_state(&[state]);
        assert!(!toast.visible());
    }

    #[test]
    fn test_update_state_reconciles_and_shows() {
        let (toast, shell) = toast();
        let frame = Rect::from_origin_size(100, 700, 300, 60);
        let state = WindowState::new(0, true, frame, "org.oriel.toast", TaskId::INVALID, Stack::Toast);

        toast.update_state(&[state]);
        assert!(toast.visible());
        assert_eq!(shell.frame(), frame);
    }
}
