//! Full-path test: guest state reports through the registry and request
//! channel into the headless platform, then layer lists through the composer
//! into a recording renderer.

use std::sync::{Arc, Mutex};

use oriel::consts::{SURFACE_NAME_PREFIX, TOAST_SURFACE_NAME};
use oriel::graphics::Renderable;
use oriel::platform::Observer;
use oriel::render::Renderer;
use oriel::session::Session;
use oriel::settings::Settings;
use oriel::wm::{Stack, Window, WindowState};
use oriel_state::{NativeHandle, Rect, TaskId};

struct DrawCall {
    handle: NativeHandle,
    viewport: Rect,
    layers: Vec<Renderable>,
}

#[derive(Default)]
struct RecordingRenderer {
    created: Mutex<Vec<NativeHandle>>,
    destroyed: Mutex<Vec<NativeHandle>>,
    draws: Mutex<Vec<DrawCall>>,
}

impl Renderer for RecordingRenderer {
    fn create_native_window(&self, handle: NativeHandle) -> bool {
        self.created.lock().unwrap().push(handle);
        true
    }

    fn destroy_native_window(&self, handle: NativeHandle) {
        self.destroyed.lock().unwrap().push(handle);
    }

    fn draw(&self, handle: NativeHandle, viewport: Rect, layers: &[Renderable]) -> bool {
        self.draws.lock().unwrap().push(DrawCall {
            handle,
            viewport,
            layers: layers.to_vec(),
        });
        true
    }
}

fn session_with_renderer() -> (Session, Arc<RecordingRenderer>) {
    let mut settings = Settings {
        toast_pool: 1,
        ..Settings::default()
    };
    settings
        .app_titles
        .insert("org.example.player".to_string(), "Player".to_string());
    let renderer = Arc::new(RecordingRenderer::default());
    let session = Session::new(
        &settings,
        renderer.clone(),
        Arc::new(oriel::bridge::NullGuestController::new()),
    );
    (session, renderer)
}

fn player_state(frame: Rect) -> WindowState {
    WindowState::new(
        0,
        true,
        frame,
        "org.example.player",
        TaskId::new(1),
        Stack::Freeform,
    )
}

fn surface(task: u32, position: Rect, z: u32) -> Renderable {
    Renderable::new(
        format!("{SURFACE_NAME_PREFIX}{task}"),
        position,
        Rect::with_size(position.width(), position.height()),
        z,
    )
}

#[test]
fn test_window_lifecycle_end_to_end() {
    let (session, renderer) = session_with_renderer();
    let manager = session.manager();
    let composer = session.composer();
    let task = TaskId::new(1);
    let frame = Rect::from_origin_size(448, 156, 1024, 768);

    // Bridge reports the task; the UI actor services the create request.
    manager.apply_window_state_update(&[player_state(frame)], &[]);
    session.drain_requests();

    let window = session.platform().window_for_task(task).unwrap();
    assert_eq!(window.title(), "Player");
    assert_eq!(window.frame(), frame);
    assert_eq!(session.context().window_count(), 1);
    // One native target for the pooled toast, one for the new window.
    assert_eq!(renderer.created.lock().unwrap().len(), 2);

    // A second report with matching geometry reconciles without a second
    // create and latches the window initialized.
    manager.apply_window_state_update(&[player_state(frame)], &[]);
    session.drain_requests();
    assert!(window.initialized());
    assert_eq!(renderer.created.lock().unwrap().len(), 2);

    // Render actor submits the matching layer list.
    composer.submit_layers(&[surface(1, frame, 0)]);
    {
        let draws = renderer.draws.lock().unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].handle, window.native_handle());
        assert_eq!(draws[0].viewport, Rect::with_size(1024, 768));
        assert_eq!(draws[0].layers.len(), 1);
        assert_eq!(
            draws[0].layers[0].screen_position(),
            Rect::with_size(1024, 768)
        );
    }

    // A toast surface brings the pool window into the frame.
    let toast_frame = Rect::from_origin_size(800, 900, 360, 96);
    composer.submit_layers(&[
        surface(1, frame, 0),
        Renderable::new(
            TOAST_SURFACE_NAME,
            toast_frame,
            Rect::with_size(360, 96),
            1,
        ),
    ]);
    {
        let draws = renderer.draws.lock().unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[2].viewport, Rect::with_size(360, 96));
        assert_eq!(draws[2].layers[0].screen_position(), Rect::with_size(360, 96));
    }

    // Guest drops the task; the destroy request tears the window down.
    manager.apply_window_state_update(&[], &[]);
    session.drain_requests();
    assert!(manager.find_window_for_task(task).is_none());
    assert!(session.platform().window_for_task(task).is_none());
    assert_eq!(session.context().window_count(), 0);
    assert_eq!(
        *renderer.destroyed.lock().unwrap(),
        vec![window.native_handle()]
    );
}

#[test]
fn test_states_without_surfaces_create_nothing() {
    let (session, _renderer) = session_with_renderer();
    let manager = session.manager();

    let surfaceless = WindowState::new(
        0,
        false,
        Rect::with_size(800, 600),
        "org.example.player",
        TaskId::new(1),
        Stack::Freeform,
    );
    manager.apply_window_state_update(&[surfaceless], &[]);
    session.drain_requests();

    assert!(session.platform().window_for_task(TaskId::new(1)).is_none());
    assert_eq!(session.context().window_count(), 0);
}

#[test]
fn test_host_resize_freeze_bridges_guest_lag() {
    let (session, renderer) = session_with_renderer();
    let manager = session.manager();
    let composer = session.composer();
    let platform = session.platform();
    let task = TaskId::new(1);
    let frame = Rect::from_origin_size(448, 156, 1024, 768);

    manager.apply_window_state_update(&[player_state(frame)], &[]);
    session.drain_requests();
    let window = platform.window_for_task(task).unwrap();

    // Prime the composer with one settled frame.
    composer.submit_layers(&[surface(1, frame, 0)]);

    // The host user enlarges the window; the guest has not caught up, so the
    // next layer list still carries the old geometry. Composition must hold
    // the previous output instead of chasing it.
    platform.window_resized(window.id(), 1200, 900);
    composer.submit_layers(&[surface(1, frame, 0)]);
    {
        let draws = renderer.draws.lock().unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[1].viewport, Rect::with_size(1200, 900));
        assert_eq!(draws[1].layers, draws[0].layers);
    }

    // Guest catches up with the new geometry; composition unfreezes.
    let grown = Rect::from_origin_size(448, 156, 1200, 900);
    manager.apply_window_state_update(&[player_state(grown)], &[]);
    session.drain_requests();
    composer.submit_layers(&[surface(1, grown, 0)]);
    {
        let draws = renderer.draws.lock().unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(
            draws[2].layers[0].screen_position(),
            Rect::with_size(1200, 900)
        );
    }
    assert!(!window.is_resizing());
}
