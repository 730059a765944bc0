//! Typed window-request channel
//!
//! Window construction and destruction must happen on the actor that owns the
//! native window system, so the bridge side never touches window objects
//! directly: it sends an owned request over this channel and the UI actor
//! consumes it. Requests are fire-and-forget; there is no reply path and no
//! timeout on the queue.

use std::sync::mpsc;

use crate::geometry::Rect;
use crate::ids::TaskId;

/// A request marshalled onto the UI actor.
///
/// The payload is owned by the message and freed by the receiver; nothing is
/// shared with the sender once `send` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowRequest {
    /// Create a host window for `task` at `frame` with the given title.
    Create { task: TaskId, frame: Rect, title: String },
    /// Tear down the host window owned by `task`, if one exists.
    Destroy { task: TaskId },
}

impl WindowRequest {
    pub fn task(&self) -> TaskId {
        match self {
            WindowRequest::Create { task, .. } => *task,
            WindowRequest::Destroy { task } => *task,
        }
    }
}

pub type WindowRequestSender = mpsc::Sender<WindowRequest>;
pub type WindowRequestReceiver = mpsc::Receiver<WindowRequest>;

/// Create the channel connecting the bridge side to the UI actor.
pub fn window_request_channel() -> (WindowRequestSender, WindowRequestReceiver) {
    mpsc::channel()
}
