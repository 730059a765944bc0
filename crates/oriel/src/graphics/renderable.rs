//! One guest surface to be drawn this frame
//!
//! Renderables arrive as a flat list once per frame, in guest-absolute
//! coordinates. They are value types: a fresh list is supplied every frame
//! and nothing correlates an individual renderable across frames (only the
//! owning window has cross-frame identity).

use oriel_state::{Rect, TaskId};

use crate::consts::SURFACE_NAME_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    /// Surface name; carries the owning task id by convention, or the toast
    /// sentinel for the overlay surface.
    name: String,
    /// Where the surface sits, in host-absolute pixels before remapping and
    /// window-relative pixels after.
    screen_position: Rect,
    /// Visible sub-region of the surface's backing buffer. Consumed by the
    /// renderer, never touched by the composer.
    crop: Rect,
    /// Stacking ordinal within the frame; lower draws first.
    z: u32,
}

impl Renderable {
    pub fn new(name: impl Into<String>, screen_position: Rect, crop: Rect, z: u32) -> Self {
        Self { name: name.into(), screen_position, crop, z }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn screen_position(&self) -> Rect {
        self.screen_position
    }

    pub fn crop(&self) -> Rect {
        self.crop
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    /// Copy of this renderable at a different screen position.
    pub fn with_screen_position(&self, screen_position: Rect) -> Renderable {
        Renderable { screen_position, ..self.clone() }
    }

    /// Task id encoded in the surface name, if the name follows the
    /// convention and carries a nonzero id.
    pub fn task(&self) -> Option<TaskId> {
        Self::task_from_name(&self.name)
    }

    pub fn task_from_name(name: &str) -> Option<TaskId> {
        let suffix = name.strip_prefix(SURFACE_NAME_PREFIX)?;
        let id: u32 = suffix.parse().ok()?;
        let task = TaskId::new(id);
        task.is_valid().then_some(task)
    }
}
