//! Guest-reported window state snapshots
//!
//! A `WindowState` is what the guest says one task's window should look like
//! at one instant. Snapshots carry no history; every "previous value"
//! comparison lives in the window or the composer strategy, never here.

use oriel_state::{Rect, TaskId};

/// Which guest stack a window lives on. Only freeform windows get their own
/// host window; the toast stack is reserved for the pooled overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    Default,
    Freeform,
    Toast,
}

/// Surface flag bits as reported by the guest. A zero value means the guest
/// draws no titlebar region of its own.
pub const SURFACE_FLAGS_NO_TITLEBAR: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    display: u32,
    has_surface: bool,
    frame: Rect,
    package_name: String,
    task: TaskId,
    stack: Stack,
    flags: u32,
    fullscreen: bool,
}

impl WindowState {
    pub fn new(
        display: u32,
        has_surface: bool,
        frame: Rect,
        package_name: impl Into<String>,
        task: TaskId,
        stack: Stack,
    ) -> Self {
        Self {
            display,
            has_surface,
            frame,
            package_name: package_name.into(),
            task,
            stack,
            flags: 1,
            fullscreen: false,
        }
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn display(&self) -> u32 {
        self.display
    }

    pub fn has_surface(&self) -> bool {
        self.has_surface
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn task(&self) -> TaskId {
        self.task
    }

    pub fn stack(&self) -> Stack {
        self.stack
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// True when the guest reports no titlebar region for this surface.
    pub fn reports_no_titlebar(&self) -> bool {
        self.flags == SURFACE_FLAGS_NO_TITLEBAR
    }
}

/// The state most likely to be the guest's settled layout: the one with the
/// largest area. Ties favor the later entry, so a repeated report wins over
/// an earlier transient.
pub fn largest_area_candidate(states: &[WindowState]) -> Option<&WindowState> {
    let mut best: Option<&WindowState> = None;
    let mut best_area = 0_i64;
    for state in states {
        let area = state.frame().area();
        if best.is_none() || area >= best_area {
            best = Some(state);
            best_area = area;
        }
    }
    best
}
