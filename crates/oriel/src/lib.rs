//! Window-state reconciliation and layer composition for containerized
//! guest displays.
//!
//! A guest display stack reports desired per-task window states and a flat
//! per-frame layer list; the host side owns the actual windows. This crate
//! reconciles the two:
//!
//! - [`wm`]: the window registry turning `WindowState` reports into
//!   create/update/destroy decisions and synchronous geometry updates.
//! - [`graphics`]: per-frame grouping of renderables into windows, with
//!   coordinate remapping, the resize freeze, and toast arbitration.
//! - [`platform`]: the host side; window chrome, native shells, and the
//!   headless platform that services the window-request channel.
//! - [`render`]: the drawing seam the composer hands per-window batches to.
//! - [`bridge`]: the guest-control seam for rollback, resize, and focus.
//!
//! [`session`] wires one instance of the whole system together; the binary
//! in `main.rs` runs a scripted demonstration of the three actors against
//! the headless platform.

pub mod args;
pub mod bridge;
pub mod consts;
pub mod graphics;
pub mod logging;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod wm;

pub use bridge::{GuestController, NullGuestController};
pub use graphics::{LayerComposer, MultiWindowStrategy, Renderable};
pub use platform::{HeadlessPlatform, HeadlessShell};
pub use render::{NullRenderer, Renderer};
pub use session::Session;
pub use settings::{ControlsPolicy, Settings};
pub use wm::{Stack, WindowManager, WindowState};
