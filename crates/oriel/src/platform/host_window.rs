//! Task windows backed by a native shell.
//!
//! A `HostWindow` is the host-side face of one guest task: it reconciles its
//! startup geometry against guest reports until the two sides agree, carries
//! the window chrome (title strip, back/minimize/maximize/close buttons,
//! resize borders) and detects title-strip double clicks. Everything the
//! user does through the chrome flows out over the `Observer` handle; the
//! window never calls back into the registry directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

use oriel_state::{Point, Rect, TaskId};
use parking_lot::Mutex;

use crate::consts::{
    APP_START_TIMEOUT, BACK_KEY_CODE, DOUBLE_CLICK_SPAN, TITLEBAR_BUTTON_WIDTH, TITLEBAR_HEIGHT,
    WINDOW_RESIZE_BORDER,
};
use crate::platform::shell::{HitTarget, NativeShell, ResizeEdge};
use crate::platform::Observer;
use crate::render::Renderer;
use crate::settings::ControlsPolicy;
use crate::wm::window::{Window, WindowBase};
use crate::wm::window_state::{largest_area_candidate, WindowState};

/// Double-click bookkeeping. A hit consumes the record so an immediate third
/// click starts a new cycle instead of chaining.
struct ClickRecord {
    at: Option<Instant>,
    point: Point,
    origin: Point,
}

pub struct HostWindow {
    base: WindowBase,
    shell: Arc<dyn NativeShell>,
    observer: Weak<dyn Observer>,
    controls: ControlsPolicy,
    /// Latched once guest and host geometry first agree, the user interacts
    /// with the chrome, or the startup timeout runs out.
    initialized: AtomicBool,
    last_attempt: Mutex<Instant>,
    title_strip_enabled: AtomicBool,
    click: Mutex<ClickRecord>,
}

impl HostWindow {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        task: TaskId,
        observer: Weak<dyn Observer>,
        title: impl Into<String>,
        resizable: bool,
        controls: ControlsPolicy,
        shell: Arc<dyn NativeShell>,
    ) -> Self {
        let frame = shell.frame();
        Self {
            base: WindowBase::new(
                Some(renderer),
                Some(task),
                frame,
                title,
                shell.native_handle(),
                resizable,
            ),
            shell,
            observer,
            controls,
            initialized: AtomicBool::new(false),
            last_attempt: Mutex::new(Instant::now()),
            title_strip_enabled: AtomicBool::new(true),
            click: Mutex::new(ClickRecord { at: None, point: Point::ZERO, origin: Point::ZERO }),
        }
    }

    pub fn initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn shell(&self) -> &Arc<dyn NativeShell> {
        &self.shell
    }

    fn latch_initialized(&self, how: &str) {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            tracing::info!("window {} initialized by {}", self.base.id(), how);
        }
    }

    /// The title strip follows the guest content: a surface carrying the
    /// no-titlebar flag within the strip's height, or a fullscreen wish,
    /// turns the strip off until a later snapshot says otherwise.
    fn refresh_title_strip(&self, states: &[WindowState]) {
        let top = self.base.frame().top;
        let covered = states.iter().any(|state| {
            if state.fullscreen() {
                return true;
            }
            let offset = state.frame().top - top;
            state.reports_no_titlebar() && (0..TITLEBAR_HEIGHT).contains(&offset)
        });
        self.title_strip_enabled.store(!covered, Ordering::SeqCst);
    }

    /// Title-strip double click detection. `point` is window-relative; a hit
    /// requires the point and the window origin to both be unchanged from
    /// the previous call, inside the double-click span.
    pub fn check_db_clicked(&self, point: Point) -> bool {
        let origin = self.shell.frame().origin();
        let now = Instant::now();
        let mut record = self.click.lock();
        let hit = match record.at {
            Some(at) => {
                point == record.point
                    && origin == record.origin
                    && now.duration_since(at) <= DOUBLE_CLICK_SPAN
            }
            None => false,
        };
        if hit {
            record.at = None;
        } else {
            record.at = Some(now);
        }
        record.point = point;
        record.origin = origin;
        hit
    }

    /// Map a window-relative point onto the window's chrome, performing
    /// whatever the chrome at that point does. Resize borders and the title
    /// strip also latch `initialized`: once the user takes control of the
    /// geometry, guest reports stop overriding it.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        let frame = self.shell.frame();
        let width = frame.width();
        let height = frame.height();

        if !self.shell.maximized() {
            if let Some(edge) = resize_edge(point, width, height) {
                self.latch_initialized("user resize");
                return HitTarget::Resize(edge);
            }
        }

        if point.y < TITLEBAR_HEIGHT {
            self.latch_initialized("title strip interaction");
            let button = TITLEBAR_BUTTON_WIDTH;
            if !self.controls.hide_back && point.x > 0 && point.x < button {
                self.send_back_key();
                return HitTarget::Normal;
            }
            if !self.controls.hide_close && point.x > width - button && point.x < width {
                self.close();
                return HitTarget::Normal;
            }
            if !self.controls.hide_maximize && point.x > width - 2 * button && point.x < width - button
            {
                self.switch_window_state();
                return HitTarget::Normal;
            }
            if !self.controls.hide_minimize && point.x > width - 3 * button && point.x < width - 2 * button
            {
                self.shell.minimize();
                return HitTarget::Normal;
            }
            if self.check_db_clicked(point) {
                self.switch_window_state();
                return HitTarget::Normal;
            }
            return HitTarget::Draggable;
        }

        HitTarget::Normal
    }

    fn switch_window_state(&self) {
        if self.shell.maximized() {
            self.shell.restore();
        } else {
            self.shell.maximize();
        }
    }

    fn close(&self) {
        if let Some(observer) = self.observer.upgrade() {
            observer.window_deleted(self.base.id());
        }
    }

    fn send_back_key(&self) {
        let Some(observer) = self.observer.upgrade() else {
            return;
        };
        observer.input_key_event(BACK_KEY_CODE, 1);
        observer.input_key_event(BACK_KEY_CODE, 0);
    }

    /// Shift the startup-timeout clock into the past. Lets tests reach the
    /// timeout latch without sleeping.
    #[cfg(test)]
    pub(crate) fn backdate_startup(&self, by: std::time::Duration) {
        let mut last = self.last_attempt.lock();
        *last -= by;
    }

    /// Shift the recorded click into the past.
    #[cfg(test)]
    pub(crate) fn backdate_click(&self, by: std::time::Duration) {
        let mut record = self.click.lock();
        if let Some(at) = record.at {
            record.at = at.checked_sub(by);
        }
    }
}

impl Window for HostWindow {
    fn base(&self) -> &WindowBase {
        &self.base
    }

    /// Startup geometry reconciliation. Until the window is initialized,
    /// the guest's largest reported frame is treated as the intended layout:
    /// matching geometry latches, anything else is applied to the host
    /// window, and a guest that keeps disagreeing past the startup timeout
    /// loses the argument for good.
    fn update_state(&self, states: &[WindowState]) {
        if states.is_empty() {
            return;
        }
        self.refresh_title_strip(states);
        if self.initialized.load(Ordering::SeqCst) {
            return;
        }

        let Some(candidate) = largest_area_candidate(states) else {
            return;
        };
        let wanted = candidate.frame();
        if wanted == self.shell.frame() {
            self.latch_initialized("geometry match");
            return;
        }

        {
            let mut last_attempt = self.last_attempt.lock();
            if last_attempt.elapsed() >= APP_START_TIMEOUT {
                self.latch_initialized("startup timeout");
                return;
            }
            *last_attempt = Instant::now();
        }

        self.shell.set_frame(wanted);
        self.base.update_frame(wanted);
    }

    fn title_event_filter(&self, point: Point) -> bool {
        if !self.title_strip_enabled.load(Ordering::SeqCst) {
            return false;
        }
        let strip = Rect::with_size(self.base.frame().width(), TITLEBAR_HEIGHT);
        strip.contains(point)
    }

    fn destroy_window(&self) {
        self.base.release();
        self.shell.hide();
    }
}

/// Resize borders, corners first. The window-relative point is tested
/// against a fixed-width band along each edge.
fn resize_edge(point: Point, width: i32, height: i32) -> Option<ResizeEdge> {
    let border = WINDOW_RESIZE_BORDER;
    let Point { x, y } = point;
    if x < border && y < border {
        Some(ResizeEdge::TopLeft)
    } else if x > border && x < width - border && y < border {
        Some(ResizeEdge::Top)
    } else if x > width - border && y < border {
        Some(ResizeEdge::TopRight)
    } else if x > width - border && y > border && y < height - border {
        Some(ResizeEdge::Right)
    } else if x > width - border && y > height - border {
        Some(ResizeEdge::BottomRight)
    } else if x > border && x < width - border && y > height - border {
        Some(ResizeEdge::Bottom)
    } else if x < border && y > height - border {
        Some(ResizeEdge::BottomLeft)
    } else if x < border && y > border && y < height - border {
        Some(ResizeEdge::Left)
    } else {
        None
    }
}
