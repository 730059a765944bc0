//! Scripted demonstration of the three actors.
//
// The bridge thread plays a guest reporting window states, the render thread
// submits matching layer lists, and the main thread services window requests
// as the UI actor. Everything runs against the headless platform and the
// null renderer, so the only output is the log.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use oriel::args;
use oriel::bridge::NullGuestController;
use oriel::consts::{APP_NAME, APP_VERSION, SURFACE_NAME_PREFIX, TOAST_SURFACE_NAME};
use oriel::graphics::{LayerComposer, Renderable};
use oriel::logging;
use oriel::render::NullRenderer;
use oriel::session::Session;
use oriel::settings::{DisplaySize, Settings};
use oriel::wm::{Stack, WindowManager, WindowState};
use oriel_state::{Rect, SessionContext, TaskId};

const BRIDGE_TICK: Duration = Duration::from_millis(30);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// Script timeline, from session start.
const PANEL_SHOWS: Duration = Duration::from_millis(1000);
const PANEL_CLOSES: Duration = Duration::from_millis(2000);
const TOAST_SHOWS: Duration = Duration::from_millis(1400);
const TOAST_HIDES: Duration = Duration::from_millis(1900);

fn main() -> anyhow::Result<()> {
    let args = args::parse_args()?;
    if args.help {
        println!("{}", args::usage());
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(),
    };
    let _log_guard = logging::init(settings.log_to_file, settings.console && !args.no_console);
    tracing::info!("{} {} starting", APP_NAME, APP_VERSION);

    let session = Session::new(
        &settings,
        Arc::new(NullRenderer::new()),
        Arc::new(NullGuestController::new()),
    );
    session.context().clone().set_global();
    let frames = args.frames.unwrap_or(240);
    let started = Instant::now();

    let bridge = spawn_bridge(
        session.manager(),
        session.context().clone(),
        settings.display,
        started,
    );
    let render = spawn_render(
        session.composer(),
        session.context().clone(),
        settings.display,
        started,
        frames,
    );

    session.run();

    if bridge.join().is_err() {
        tracing::error!("bridge thread panicked");
    }
    if render.join().is_err() {
        tracing::error!("render thread panicked");
    }
    tracing::info!("session finished");
    Ok(())
}

fn centered(display: DisplaySize, width: i32, height: i32) -> Rect {
    Rect::from_origin_size(
        (display.width - width) / 2,
        (display.height - height) / 2,
        width,
        height,
    )
}

/// Guest stand-in: reports a player window for the whole run and a settings
/// panel for the middle second, then withdraws the panel.
fn spawn_bridge(
    manager: Arc<WindowManager>,
    context: SessionContext,
    display: DisplaySize,
    started: Instant,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let player = WindowState::new(
            0,
            true,
            centered(display, 1024, 768),
            "org.example.player",
            TaskId::new(1),
            Stack::Freeform,
        );
        let panel = WindowState::new(
            0,
            true,
            Rect::from_origin_size(120, 120, 640, 480),
            "org.example.panel",
            TaskId::new(2),
            Stack::Freeform,
        );

        let mut panel_reported = false;
        while !context.should_shutdown() {
            let elapsed = started.elapsed();
            let panel_live = elapsed >= PANEL_SHOWS && elapsed < PANEL_CLOSES;

            let mut updated = vec![player.clone()];
            let mut removed = Vec::new();
            if panel_live {
                updated.push(panel.clone());
                panel_reported = true;
            } else if panel_reported {
                removed.push(panel.clone());
                panel_reported = false;
            }
            manager.apply_window_state_update(&updated, &removed);
            thread::sleep(BRIDGE_TICK);
        }
    })
}

/// Render stand-in: submits the layer list matching the bridge script, with
/// a toast surface overlapping the panel phase, then requests shutdown.
fn spawn_render(
    composer: Arc<LayerComposer>,
    context: SessionContext,
    display: DisplaySize,
    started: Instant,
    frames: usize,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let player_frame = centered(display, 1024, 768);
        let panel_frame = Rect::from_origin_size(120, 120, 640, 480);
        let toast_frame =
            Rect::from_origin_size((display.width - 360) / 2, display.height - 160, 360, 96);

        for _ in 0..frames {
            if context.should_shutdown() {
                break;
            }
            let elapsed = started.elapsed();

            let mut layers = vec![Renderable::new(
                format!("{SURFACE_NAME_PREFIX}1"),
                player_frame,
                Rect::with_size(player_frame.width(), player_frame.height()),
                0,
            )];
            if elapsed >= PANEL_SHOWS && elapsed < PANEL_CLOSES {
                layers.push(Renderable::new(
                    format!("{SURFACE_NAME_PREFIX}2"),
                    panel_frame,
                    Rect::with_size(panel_frame.width(), panel_frame.height()),
                    1,
                ));
            }
            if elapsed >= TOAST_SHOWS && elapsed < TOAST_HIDES {
                layers.push(Renderable::new(
                    TOAST_SURFACE_NAME,
                    toast_frame,
                    Rect::with_size(toast_frame.width(), toast_frame.height()),
                    2,
                ));
            }
            composer.submit_layers(&layers);
            thread::sleep(FRAME_INTERVAL);
        }
        context.request_shutdown();
    })
}
