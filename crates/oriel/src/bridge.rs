//! Guest-control seam
//!
//! The registry needs to talk back to the guest in three places: rolling a
//! task out after a failed window creation, reporting host-driven geometry
//! changes, and forwarding focus. The transport behind those calls is not
//! this crate's business, so they go through a trait.

use oriel_state::{Rect, TaskId};

pub trait GuestController: Send + Sync {
    /// Remove the task on the guest side. Used both for the close button and
    /// to roll back a task whose host window could not be created.
    fn remove_task(&self, task: TaskId);

    /// Report a host-driven frame change so the guest can relayout.
    fn resize_task(&self, task: TaskId, frame: Rect, mode: u32);

    /// Tell the guest which task's window holds host focus.
    fn set_focused_task(&self, task: TaskId);
}

/// Controller with no guest behind it; logs and drops every call. Used by
/// the demo binary and anywhere a real bridge is not wired up.
#[derive(Debug, Default)]
pub struct NullGuestController;

impl NullGuestController {
    pub fn new() -> Self {
        Self
    }
}

impl GuestController for NullGuestController {
    fn remove_task(&self, task: TaskId) {
        tracing::debug!("null guest: remove task {}", task);
    }

    fn resize_task(&self, task: TaskId, frame: Rect, mode: u32) {
        tracing::debug!("null guest: resize task {} to {} (mode {})", task, frame, mode);
    }

    fn set_focused_task(&self, task: TaskId) {
        tracing::debug!("null guest: focus task {}", task);
    }
}
