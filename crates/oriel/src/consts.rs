use std::time::Duration;

// Package constants
pub const APP_NAME:        &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION:     &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// Surface naming convention used by the guest display stack. A surface is
// attributed to a task by parsing the numeric suffix after the prefix; the
// toast sentinel names the single transient overlay surface.
pub const SURFACE_NAME_PREFIX: &str = "org.oriel.surface.";
pub const TOAST_SURFACE_NAME:  &str = "org.oriel.toast";

/// How long a freshly created window keeps reconciling its geometry against
/// guest reports before giving up and latching initialized.
pub const APP_START_TIMEOUT: Duration = Duration::from_secs(15);

/// Two clicks at the same point within this span count as a double click.
pub const DOUBLE_CLICK_SPAN: Duration = Duration::from_millis(500);

/// A window stays in the resizing state this long past the last move/resize
/// event before the flag auto-clears.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

// Window chrome layout, in pixels.
pub const TITLEBAR_HEIGHT:       i32 = 42;
pub const TITLEBAR_BUTTON_WIDTH: i32 = 42;
pub const WINDOW_RESIZE_BORDER:  i32 = 3;

/// Linux KEY_BACK, forwarded when the titlebar back button is pressed.
pub const BACK_KEY_CODE: u16 = 158;

/// Resize mode reported upstream for host-user-driven geometry changes.
pub const RESIZE_MODE_USER: u32 = 3;

/// Toast windows pre-created for the overlay pool.
pub const DEFAULT_TOAST_POOL: usize = 5;
