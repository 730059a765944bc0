//! Process-wide session context
//!
//! One shared handle that every actor can clone: live window count, the
//! currently focused task, the window-request sender, and the shutdown flag.
//! Everything behind `Arc`, so a clone is a handle onto the same session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::channels::{WindowRequest, WindowRequestSender};
use crate::ids::TaskId;

#[derive(Clone)]
pub struct SessionContext {
    /// Number of host windows currently registered.
    window_count: Arc<Mutex<usize>>,

    /// Task whose window most recently asked for focus, if any.
    focused_task: Arc<Mutex<Option<TaskId>>>,

    /// Window request channel sender, installed once the UI actor exists.
    request_sender: Arc<Mutex<Option<WindowRequestSender>>>,

    /// Cooperative shutdown flag for the actor loops.
    shutdown: Arc<AtomicBool>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            window_count: Arc::new(Mutex::new(0)),
            focused_task: Arc::new(Mutex::new(None)),
            request_sender: Arc::new(Mutex::new(None)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Install the request sender (builder pattern).
    pub fn with_request_sender(self, sender: WindowRequestSender) -> Self {
        *self.request_sender.lock() = Some(sender);
        self
    }

    /// Marshal a request onto the UI actor.
    ///
    /// Sends are fire-and-forget; a send failure means the UI actor is gone
    /// and is logged rather than surfaced.
    pub fn request(&self, request: WindowRequest) {
        let sender = self.request_sender.lock();
        if let Some(sender) = sender.as_ref() {
            if let Err(e) = sender.send(request) {
                tracing::error!("failed to send window request: {}", e);
            }
        } else {
            tracing::error!("window request dropped, no request sender installed");
        }
    }

    pub fn window_registered(&self) {
        *self.window_count.lock() += 1;
    }

    pub fn window_unregistered(&self) {
        let mut count = self.window_count.lock();
        *count = count.saturating_sub(1);
    }

    pub fn window_count(&self) -> usize {
        *self.window_count.lock()
    }

    pub fn set_focused_task(&self, task: Option<TaskId>) {
        *self.focused_task.lock() = task;
    }

    pub fn focused_task(&self) -> Option<TaskId> {
        *self.focused_task.lock()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Set as the global instance. Later calls are ignored.
    pub fn set_global(self) {
        GLOBAL_CONTEXT.set(self).ok();
    }

    /// Get the global instance, if one was installed.
    pub fn global() -> Option<&'static Self> {
        GLOBAL_CONTEXT.get()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_CONTEXT: OnceLock<SessionContext> = OnceLock::new();
