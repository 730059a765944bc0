//! Task↔window registry
//!
//! The manager is the sole long-lived owner of windows and the only entry
//! point the bridge side gets. `apply_window_state_update` runs on the bridge
//! actor; window construction and destruction are marshalled to the UI actor
//! as typed requests because native windows must not be touched off their
//! owning actor. Geometry-only updates for already-registered windows are
//! applied synchronously right here.
//!
//! One mutex guards the task→window map together with the pending-create
//! set. It is held for the duration of a lookup/insert/erase, and by the
//! composer for its whole traversal so a window cannot be torn down while it
//! is being drawn. The toast pool sits behind its own mutex.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use oriel_state::{Rect, SessionContext, TaskId, WindowRequest};
use parking_lot::{Mutex, MutexGuard};

use crate::bridge::GuestController;
use crate::wm::window::{OverlayWindow, Window};
use crate::wm::{Stack, WindowState};

/// The guarded view of the registry: registered windows plus tasks whose
/// create request is still in flight.
pub struct WindowTable {
    windows: HashMap<TaskId, Arc<dyn Window>>,
    pending: HashSet<TaskId>,
}

impl WindowTable {
    fn new() -> Self {
        Self { windows: HashMap::new(), pending: HashSet::new() }
    }

    pub fn get(&self, task: TaskId) -> Option<&Arc<dyn Window>> {
        self.windows.get(&task)
    }
}

struct ToastSlot {
    overlay: Arc<dyn OverlayWindow>,
    window: Arc<dyn Window>,
}

pub struct WindowManager {
    windows: Mutex<WindowTable>,
    toasts: Mutex<Vec<ToastSlot>>,
    guest: Arc<dyn GuestController>,
    /// Package name → window title directory, from settings.
    titles: HashMap<String, String>,
    context: SessionContext,
}

impl WindowManager {
    pub fn new(
        context: SessionContext,
        guest: Arc<dyn GuestController>,
        titles: HashMap<String, String>,
    ) -> Self {
        Self {
            windows: Mutex::new(WindowTable::new()),
            toasts: Mutex::new(Vec::new()),
            guest,
            titles,
            context,
        }
    }

    /// The sole upstream-facing entry point: reconcile the registry against
    /// one snapshot of guest window states.
    pub fn apply_window_state_update(&self, updated: &[WindowState], removed: &[WindowState]) {
        let mut table = self.windows.lock();

        // Walk the updates: group states for tasks that already have a
        // window, request creation for ones that do not. Only freeform
        // states with a surface participate; everything else never gets a
        // host window.
        let mut task_updates: HashMap<TaskId, Vec<WindowState>> = HashMap::new();
        for state in updated {
            if state.stack() != Stack::Freeform || !state.has_surface() {
                continue;
            }
            let task = state.task();
            if !task.is_valid() {
                continue;
            }
            if table.windows.contains_key(&task) {
                task_updates.entry(task).or_default().push(state.clone());
                continue;
            }
            if table.pending.contains(&task) {
                // Create already in flight on the UI actor.
                continue;
            }
            if state.frame().is_degenerate() {
                // Zero-area geometry means no window wanted yet.
                tracing::trace!("task {} reports degenerate frame, not creating", task);
                continue;
            }
            let title = self.resolve_title(state.package_name());
            tracing::info!("requesting window for task {} at {}", task, state.frame());
            self.context.request(WindowRequest::Create { task, frame: state.frame(), title });
            table.pending.insert(task);
        }

        // Geometry-only reconciliation is pure data and safe from the
        // bridge actor, so it happens synchronously.
        for (task, states) in &task_updates {
            if let Some(window) = table.windows.get(task) {
                window.update_state(states);
            }
        }

        // Tasks known here but absent from updated ∪ removed are gone
        // upstream; their windows come down via the UI actor.
        let mut live: HashSet<TaskId> = HashSet::new();
        live.extend(updated.iter().map(|s| s.task()));
        live.extend(removed.iter().map(|s| s.task()));

        let stale: Vec<TaskId> = table
            .windows
            .keys()
            .copied()
            .chain(table.pending.iter().copied())
            .filter(|task| !live.contains(task))
            .collect();
        for task in stale {
            tracing::info!("task {} no longer reported, requesting window teardown", task);
            self.context.request(WindowRequest::Destroy { task });
            table.pending.remove(&task);
        }
    }

    pub fn find_window_for_task(&self, task: TaskId) -> Option<Arc<dyn Window>> {
        self.windows.lock().windows.get(&task).cloned()
    }

    /// Register a freshly constructed window. Called by the UI actor once
    /// creation and attachment succeeded.
    pub fn insert_task(&self, task: TaskId, window: Arc<dyn Window>) {
        let mut table = self.windows.lock();
        table.pending.remove(&task);
        if table.windows.insert(task, window).is_none() {
            self.context.window_registered();
        } else {
            tracing::warn!("replaced existing window for task {}", task);
        }
    }

    /// Drop a task from the registry, returning its window if one was
    /// registered. Also clears an in-flight create mark.
    pub fn erase_task(&self, task: TaskId) -> Option<Arc<dyn Window>> {
        let mut table = self.windows.lock();
        table.pending.remove(&task);
        let window = table.windows.remove(&task);
        if window.is_some() {
            self.context.window_unregistered();
        }
        window
    }

    /// Exclusive hold over the registry for the duration of a composition
    /// traversal. Nothing may be inserted or erased while the guard lives.
    pub fn lock_windows(&self) -> MutexGuard<'_, WindowTable> {
        self.windows.lock()
    }

    /// Seed the overlay pool with one pre-created toast window.
    pub fn add_toast_window<W: OverlayWindow + 'static>(&self, toast: Arc<W>) {
        self.toasts.lock().push(ToastSlot { overlay: toast.clone(), window: toast });
    }

    /// Pick the pooled toast window best matching `frame`, apply the frame,
    /// show it, and hide the rest.
    pub fn get_toast_window(&self, frame: Rect) -> Option<Arc<dyn Window>> {
        let toasts = self.toasts.lock();
        if toasts.is_empty() {
            tracing::warn!("toast window requested but the pool is empty");
            return None;
        }
        let chosen = toasts
            .iter()
            .position(|slot| slot.window.frame() == frame)
            .or_else(|| toasts.iter().position(|slot| !slot.overlay.visible()))
            .unwrap_or(0);
        for (index, slot) in toasts.iter().enumerate() {
            if index == chosen {
                slot.overlay.show_at(frame);
            } else {
                slot.overlay.hide();
            }
        }
        Some(toasts[chosen].window.clone())
    }

    /// Collapse the whole pool. Driven by a degenerate zero-size rectangle,
    /// which is how a toast window is told it has nothing to show.
    pub fn hide_toast_windows(&self) {
        for slot in self.toasts.lock().iter() {
            slot.overlay.show_at(Rect::ZERO);
        }
    }

    /// Window title for a package, from the configured directory, falling
    /// back to the package name itself.
    pub fn resolve_title(&self, package_name: &str) -> String {
        self.titles
            .get(package_name)
            .cloned()
            .unwrap_or_else(|| package_name.to_string())
    }

    pub fn remove_task(&self, task: TaskId) {
        self.guest.remove_task(task);
    }

    pub fn resize_task(&self, task: TaskId, frame: Rect, mode: u32) {
        self.guest.resize_task(task, frame, mode);
    }

    pub fn set_focused_task(&self, task: TaskId) {
        self.context.set_focused_task(Some(task));
        self.guest.set_focused_task(task);
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullGuestController;
    use crate::wm::window::WindowBase;
    use oriel_state::{window_request_channel, NativeHandle, WindowRequestReceiver};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    struct CountingWindow {
        base: WindowBase,
        update_calls: AtomicUsize,
        last_batch: AtomicUsize,
    }

    impl CountingWindow {
        fn new(task: TaskId, frame: Rect) -> Arc<Self> {
            Arc::new(Self {
                base: WindowBase::new(None, Some(task), frame, "counting", NativeHandle::new(1), true),
                update_calls: AtomicUsize::new(0),
                last_batch: AtomicUsize::new(0),
            })
        }
    }

    impl Window for CountingWindow {
        fn base(&self) -> &WindowBase {
            &self.base
        }

        fn update_state(&self, states: &[WindowState]) {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.last_batch.store(states.len(), Ordering::SeqCst);
        }
    }

    struct FakeToast {
        base: WindowBase,
        shown_at: StdMutex<Vec<Rect>>,
        visible: std::sync::atomic::AtomicBool,
    }

    impl FakeToast {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                base: WindowBase::new(None, None, Rect::ZERO, "toast", NativeHandle::new(2), false),
                shown_at: StdMutex::new(Vec::new()),
                visible: std::sync::atomic::AtomicBool::new(false),
            })
        }
    }

    impl Window for FakeToast {
        fn base(&self) -> &WindowBase {
            &self.base
        }
    }

    impl OverlayWindow for FakeToast {
        fn show_at(&self, frame: Rect) {
            self.shown_at.lock().unwrap().push(frame);
            if frame.is_degenerate() {
                self.visible.store(false, Ordering::SeqCst);
            } else {
                self.base.update_frame(frame);
                self.visible.store(true, Ordering::SeqCst);
            }
        }

        fn hide(&self) {
            self.visible.store(false, Ordering::SeqCst);
        }

        fn visible(&self) -> bool {
            self.visible.load(Ordering::SeqCst)
        }
    }

    fn manager() -> (WindowManager, WindowRequestReceiver) {
        let (tx, rx) = window_request_channel();
        let context = SessionContext::new().with_request_sender(tx);
        let mut titles = HashMap::new();
        titles.insert("org.example.player".to_string(), "Player".to_string());
        let manager = WindowManager::new(context, Arc::new(NullGuestController::new()), titles);
        (manager, rx)
    }

    fn freeform(task: u32, frame: Rect) -> WindowState {
        WindowState::new(0, true, frame, "org.example.app", TaskId::new(task), Stack::Freeform)
    }

    #[test]
    fn test_insert_find_erase_round_trip() {
        let (manager, _rx) = manager();
        let task = TaskId::new(1);
        let window = CountingWindow::new(task, Rect::with_size(640, 480));

        assert!(manager.find_window_for_task(task).is_none());
        manager.insert_task(task, window);
        assert!(manager.find_window_for_task(task).is_some());
        assert_eq!(manager.context().window_count(), 1);

        assert!(manager.erase_task(task).is_some());
        assert!(manager.find_window_for_task(task).is_none());
        assert_eq!(manager.context().window_count(), 0);
        assert!(manager.erase_task(task).is_none());
    }

    #[test]
    fn test_create_requested_once_for_new_freeform_task() {
        let (manager, rx) = manager();
        let state = freeform(1, Rect::from_origin_size(0, 0, 1024, 768));

        manager.apply_window_state_update(&[state.clone()], &[]);
        match rx.try_recv().unwrap() {
            WindowRequest::Create { task, frame, title } => {
                assert_eq!(task, TaskId::new(1));
                assert_eq!(frame, Rect::with_size(1024, 768));
                assert_eq!(title, "org.example.app");
            }
            other => panic!("unexpected request: {:?}", other),
        }

        // Same snapshot again while the create is still in flight: no
        // duplicate request.
        manager.apply_window_state_update(&[state], &[]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_create_uses_configured_title() {
        let (manager, rx) = manager();
        let state = WindowState::new(
            0,
            true,
            Rect::with_size(800, 600),
            "org.example.player",
            TaskId::new(2),
            Stack::Freeform,
        );
        manager.apply_window_state_update(&[state], &[]);
        match rx.try_recv().unwrap() {
            WindowRequest::Create { title, .. } => assert_eq!(title, "Player"),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_no_create_for_non_freeform_stack() {
        let (manager, rx) = manager();
        let state = WindowState::new(
            0,
            true,
            Rect::with_size(1024, 768),
            "org.example.app",
            TaskId::new(1),
            Stack::Default,
        );
        manager.apply_window_state_update(&[state], &[]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_no_create_without_surface() {
        let (manager, rx) = manager();
        let state = WindowState::new(
            0,
            false,
            Rect::with_size(1024, 768),
            "org.example.app",
            TaskId::new(1),
            Stack::Freeform,
        );
        manager.apply_window_state_update(&[state], &[]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_no_create_for_degenerate_frame() {
        let (manager, rx) = manager();
        manager.apply_window_state_update(&[freeform(1, Rect::ZERO)], &[]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_destroy_requested_when_registered_task_disappears() {
        let (manager, rx) = manager();
        let task = TaskId::new(1);
        manager.insert_task(task, CountingWindow::new(task, Rect::with_size(100, 100)));

        manager.apply_window_state_update(&[], &[]);
        assert_eq!(rx.try_recv().unwrap(), WindowRequest::Destroy { task });
    }

    #[test]
    fn test_destroy_for_task_that_never_registered() {
        let (manager, rx) = manager();
        manager.apply_window_state_update(&[freeform(1, Rect::with_size(1024, 768))], &[]);
        assert!(matches!(rx.try_recv().unwrap(), WindowRequest::Create { .. }));

        // The UI actor never got around to building it; dropping the task
        // from the snapshot must still tear the pending create down.
        manager.apply_window_state_update(&[], &[]);
        assert_eq!(rx.try_recv().unwrap(), WindowRequest::Destroy { task: TaskId::new(1) });

        // And only once.
        manager.apply_window_state_update(&[], &[]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_removed_entries_defer_teardown() {
        let (manager, rx) = manager();
        let task = TaskId::new(1);
        manager.insert_task(task, CountingWindow::new(task, Rect::with_size(100, 100)));

        // Listed under removed, so still referenced upstream this cycle.
        manager.apply_window_state_update(&[], &[freeform(1, Rect::ZERO)]);
        assert!(rx.try_recv().is_err());

        // Gone from both lists: now it comes down.
        manager.apply_window_state_update(&[], &[]);
        assert_eq!(rx.try_recv().unwrap(), WindowRequest::Destroy { task });
    }

    #[test]
    fn test_update_state_applied_synchronously_with_all_states() {
        let (manager, rx) = manager();
        let task = TaskId::new(1);
        let window = CountingWindow::new(task, Rect::with_size(100, 100));
        manager.insert_task(task, window.clone());

        let states = vec![
            freeform(1, Rect::with_size(100, 100)),
            freeform(1, Rect::with_size(1024, 768)),
        ];
        manager.apply_window_state_update(&states, &[]);

        assert_eq!(window.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(window.last_batch.load(Ordering::SeqCst), 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_toast_pool_prefers_exact_frame_match() {
        let (manager, _rx) = manager();
        let first = FakeToast::new();
        let second = FakeToast::new();
        manager.add_toast_window(first.clone());
        manager.add_toast_window(second.clone());

        let frame = Rect::from_origin_size(10, 10, 200, 80);
        second.show_at(frame);

        let chosen = manager.get_toast_window(frame).unwrap();
        assert_eq!(chosen.id(), second.base.id());
        assert!(second.visible());
        assert!(!first.visible());
    }

    #[test]
    fn test_toast_pool_empty_yields_none() {
        let (manager, _rx) = manager();
        assert!(manager.get_toast_window(Rect::with_size(100, 40)).is_none());
    }

    #[test]
    fn test_hide_toast_windows_passes_degenerate_rect() {
        let (manager, _rx) = manager();
        let toast = FakeToast::new();
        manager.add_toast_window(toast.clone());
        toast.show_at(Rect::with_size(300, 60));

        manager.hide_toast_windows();
        assert!(!toast.visible());
        assert_eq!(*toast.shown_at.lock().unwrap().last().unwrap(), Rect::ZERO);
    }

    #[test]
    fn test_title_resolution_falls_back_to_package_name() {
        let (manager, _rx) = manager();
        assert_eq!(manager.resolve_title("org.example.player"), "Player");
        assert_eq!(manager.resolve_title("org.unknown.app"), "org.unknown.app");
    }
}
