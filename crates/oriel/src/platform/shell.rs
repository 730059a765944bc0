//! Native window-system seam.

use oriel_state::{NativeHandle, Rect};

/// Which resize border a point landed on. Corners take priority over edges
/// so a diagonal grab near a corner never degrades into a one-axis resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// Outcome of hit testing a window-relative point against a window's chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Plain content; the event goes to the guest.
    Normal,
    /// Title strip area that moves the window when dragged.
    Draggable,
    Resize(ResizeEdge),
}

/// One native window as the host window system sees it. Implementations are
/// expected to be cheap state holders; everything observable from the rest
/// of the crate goes through the owning `wm::Window`.
pub trait NativeShell: Send + Sync {
    fn native_handle(&self) -> NativeHandle;

    /// Current geometry in host-absolute pixels.
    fn frame(&self) -> Rect;

    /// Apply geometry. Origin and size together, the way the window system
    /// reports them back.
    fn set_frame(&self, frame: Rect);

    fn show(&self);

    fn hide(&self);

    fn minimize(&self);

    fn maximize(&self);

    /// Undo a maximize or minimize.
    fn restore(&self);

    fn maximized(&self) -> bool;
}
