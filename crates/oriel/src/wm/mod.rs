//! Window management module
//!
//! This module owns the mapping from guest tasks to host windows and keeps
//! it consistent across three actors:
//!
//! ```text
//! bridge actor                UI actor                 render actor
//! ────────────                ────────                 ────────────
//! apply_window_state_update   drains WindowRequest     submit_layers
//!   ├─ group updates            ├─ Create → platform     ├─ lock registry
//!   ├─ request creates          │    └─ insert_task      ├─ group by task
//!   └─ request teardowns        └─ Destroy → erase_task  └─ draw windows
//! ```
//!
//! Creation and destruction of native windows only ever happen on the UI
//! actor; the bridge side communicates through typed requests and the render
//! side through a registry guard held across each composition pass.
//!
//! ## Modules
//!
//! - `window_state` - Immutable per-task state snapshots from the guest
//! - `window` - The window trait, shared base state and resize debounce
//! - `manager` - The registry and the reconciliation entry point

pub mod manager;
pub mod window;
pub mod window_state;

pub use manager::{WindowManager, WindowTable};
pub use window::{BaseWindow, OverlayWindow, Window, WindowBase};
pub use window_state::{Stack, WindowState};
