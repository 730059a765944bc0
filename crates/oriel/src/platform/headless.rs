//! In-process platform with no real window system behind it.
//!
//! The headless platform plays the UI actor end to end: it drains
//! `WindowRequest`s into window construction and teardown, owns the routing
//! tables from window ids back to windows, and implements the observer
//! surface those windows report into. Shells are plain state holders, which
//! is exactly enough for the demo binary and for exercising the full
//! bridge→UI→render path in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use oriel_state::{NativeHandle, Rect, TaskId, WindowId, WindowRequest};
use parking_lot::Mutex;

use crate::consts::RESIZE_MODE_USER;
use crate::platform::host_window::HostWindow;
use crate::platform::shell::NativeShell;
use crate::platform::toast_window::ToastWindow;
use crate::platform::{Observer, PlatformError};
use crate::render::Renderer;
use crate::settings::ControlsPolicy;
use crate::wm::{Window, WindowManager};

struct ShellState {
    frame: Rect,
    shown: bool,
    maximized: bool,
    minimized: bool,
}

/// Native shell that only records what it is told. Windows built on it
/// behave exactly like their windowed counterparts minus the pixels.
pub struct HeadlessShell {
    handle: NativeHandle,
    state: Mutex<ShellState>,
}

impl HeadlessShell {
    pub fn new(handle: NativeHandle, frame: Rect) -> Self {
        Self {
            handle,
            state: Mutex::new(ShellState {
                frame,
                shown: true,
                maximized: false,
                minimized: false,
            }),
        }
    }

    pub fn shown(&self) -> bool {
        self.state.lock().shown
    }

    pub fn minimized(&self) -> bool {
        self.state.lock().minimized
    }
}

impl NativeShell for HeadlessShell {
    fn native_handle(&self) -> NativeHandle {
        self.handle
    }

    fn frame(&self) -> Rect {
        self.state.lock().frame
    }

    fn set_frame(&self, frame: Rect) {
        self.state.lock().frame = frame;
    }

    fn show(&self) {
        let mut state = self.state.lock();
        state.shown = true;
        state.minimized = false;
    }

    fn hide(&self) {
        self.state.lock().shown = false;
    }

    fn minimize(&self) {
        self.state.lock().minimized = true;
    }

    fn maximize(&self) {
        let mut state = self.state.lock();
        state.maximized = true;
        state.minimized = false;
    }

    fn restore(&self) {
        let mut state = self.state.lock();
        state.maximized = false;
        state.minimized = false;
    }

    fn maximized(&self) -> bool {
        self.state.lock().maximized
    }
}

pub struct HeadlessPlatform {
    renderer: Option<Arc<dyn Renderer>>,
    manager: Arc<WindowManager>,
    /// Host-event routing: window id → window, task → window id.
    windows: DashMap<WindowId, Arc<HostWindow>>,
    tasks: DashMap<TaskId, WindowId>,
    controls: HashMap<String, ControlsPolicy>,
    resizable_windows: bool,
    next_handle: AtomicU64,
}

impl HeadlessPlatform {
    pub fn new(
        renderer: Option<Arc<dyn Renderer>>,
        manager: Arc<WindowManager>,
        controls: HashMap<String, ControlsPolicy>,
        resizable_windows: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            renderer,
            manager,
            windows: DashMap::new(),
            tasks: DashMap::new(),
            controls,
            resizable_windows,
            next_handle: AtomicU64::new(1),
        })
    }

    fn allocate_handle(&self) -> NativeHandle {
        NativeHandle::new(self.next_handle.fetch_add(1, Ordering::SeqCst))
    }

    /// Pre-create the overlay pool: hidden, zero-sized toast windows handed
    /// to the registry for the composer to pick from.
    pub fn create_toast_windows(&self, count: usize) {
        for _ in 0..count {
            let shell = Arc::new(HeadlessShell::new(self.allocate_handle(), Rect::ZERO));
            let toast = Arc::new(ToastWindow::new(self.renderer.clone(), shell));
            if !toast.attach() {
                tracing::debug!("toast window pooled without a renderer attachment");
            }
            self.manager.add_toast_window(toast);
        }
    }

    /// Drain handler for the UI actor. Create requests build and attach a
    /// window then register it; failures roll the task back out of the
    /// guest so upstream state stays consistent with what is on screen.
    pub fn process_request(self: &Arc<Self>, request: WindowRequest) {
        match request {
            WindowRequest::Create { task, frame, title } => {
                if self.tasks.contains_key(&task) {
                    tracing::debug!("task {} already has a host window, ignoring create", task);
                    return;
                }
                match self.create_window(task, frame, &title) {
                    Ok(window) => {
                        tracing::debug!("created window {} for task {}", window.id(), task);
                        self.manager.insert_task(task, window);
                    }
                    Err(err) => {
                        tracing::warn!("{}; rolling task {} back", err, task);
                        self.manager.remove_task(task);
                    }
                }
            }
            WindowRequest::Destroy { task } => {
                if let Some(window) = self.manager.find_window_for_task(task) {
                    window.destroy_window();
                }
                self.manager.erase_task(task);
                if let Some((_, id)) = self.tasks.remove(&task) {
                    self.windows.remove(&id);
                }
            }
        }
    }

    fn create_window(
        self: &Arc<Self>,
        task: TaskId,
        frame: Rect,
        title: &str,
    ) -> Result<Arc<HostWindow>, PlatformError> {
        let Some(renderer) = self.renderer.clone() else {
            return Err(PlatformError::NoRenderer(task));
        };
        let shell = Arc::new(HeadlessShell::new(self.allocate_handle(), frame));
        let controls = self.controls.get(title).cloned().unwrap_or_default();
        let observer: Arc<dyn Observer> = self.clone();
        let window = Arc::new(HostWindow::new(
            renderer,
            task,
            Arc::downgrade(&observer),
            title,
            self.resizable_windows,
            controls,
            shell,
        ));
        if !window.attach() {
            return Err(PlatformError::AttachFailed { task });
        }
        self.windows.insert(window.id(), window.clone());
        self.tasks.insert(task, window.id());
        Ok(window)
    }

    pub fn window_for_task(&self, task: TaskId) -> Option<Arc<HostWindow>> {
        let id = *self.tasks.get(&task)?.value();
        self.windows.get(&id).map(|entry| entry.value().clone())
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

impl Observer for HeadlessPlatform {
    fn window_deleted(&self, id: WindowId) {
        let Some((_, window)) = self.windows.remove(&id) else {
            tracing::warn!("window removed event for unknown window {}", id);
            return;
        };
        // The registry entry stays until the guest drops the task and
        // reconciliation tears it down; here we only roll the task out
        // upstream.
        if let Some(task) = window.task() {
            self.tasks.remove(&task);
            self.manager.remove_task(task);
        }
    }

    fn window_wants_focus(&self, id: WindowId) {
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        if let Some(task) = window.task() {
            self.manager.set_focused_task(task);
        }
    }

    fn window_moved(&self, id: WindowId, x: i32, y: i32) {
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        window.set_resizing(true);
        let frame = window.frame().moved_to(x, y);
        window.update_frame(frame);
        if let Some(task) = window.task() {
            self.manager.resize_task(task, frame, RESIZE_MODE_USER);
        }
    }

    fn window_resized(&self, id: WindowId, width: i32, height: i32) {
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        window.set_resizing(true);
        let frame = window.frame().resized(width, height);
        window.update_frame(frame);
        if let Some(task) = window.task() {
            self.manager.resize_task(task, frame, RESIZE_MODE_USER);
        }
    }

    fn input_key_event(&self, code: u16, down_or_up: i32) {
        // Input devices live outside this crate; chrome-synthesized keys
        // are only surfaced to the log here.
        tracing::debug!("key event {} ({})", code, down_or_up);
    }
}
