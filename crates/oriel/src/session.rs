//! Session wiring.
//!
//! A [`Session`] owns one end-to-end instance of the system: the request
//! channel, the window registry, the headless platform that services the
//! channel, and the composer the render actor submits frames to. The thread
//! calling [`Session::run`] becomes the UI actor; bridge and render actors
//! get their handles via [`Session::manager`] and [`Session::composer`].

use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use oriel_state::{window_request_channel, SessionContext, WindowRequestReceiver};

use crate::bridge::GuestController;
use crate::graphics::{LayerComposer, MultiWindowStrategy};
use crate::platform::HeadlessPlatform;
use crate::render::Renderer;
use crate::settings::Settings;
use crate::wm::WindowManager;

/// How long the request pump blocks before re-checking the shutdown flag.
const REQUEST_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct Session {
    context: SessionContext,
    manager: Arc<WindowManager>,
    platform: Arc<HeadlessPlatform>,
    composer: Arc<LayerComposer>,
    requests: WindowRequestReceiver,
}

impl Session {
    pub fn new(
        settings: &Settings,
        renderer: Arc<dyn Renderer>,
        guest: Arc<dyn GuestController>,
    ) -> Self {
        let (tx, rx) = window_request_channel();
        let context = SessionContext::new().with_request_sender(tx);
        let manager = Arc::new(WindowManager::new(
            context.clone(),
            guest,
            settings.app_titles.clone(),
        ));
        let platform = HeadlessPlatform::new(
            Some(renderer.clone()),
            manager.clone(),
            settings.window_controls.clone(),
            settings.resizable_windows,
        );
        platform.create_toast_windows(settings.toast_pool);
        let composer = Arc::new(LayerComposer::new(
            renderer,
            Box::new(MultiWindowStrategy::default()),
            manager.clone(),
        ));
        Self {
            context,
            manager,
            platform,
            composer,
            requests: rx,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn manager(&self) -> Arc<WindowManager> {
        self.manager.clone()
    }

    pub fn platform(&self) -> Arc<HeadlessPlatform> {
        self.platform.clone()
    }

    pub fn composer(&self) -> Arc<LayerComposer> {
        self.composer.clone()
    }

    /// Process every request currently queued, without blocking.
    pub fn drain_requests(&self) {
        while let Ok(request) = self.requests.try_recv() {
            self.platform.process_request(request);
        }
    }

    /// UI actor loop: service window requests until shutdown is requested
    /// or every sender is gone.
    pub fn run(&self) {
        while !self.context.should_shutdown() {
            match self.requests.recv_timeout(REQUEST_POLL_INTERVAL) {
                Ok(request) => {
                    self.platform.process_request(request);
                    self.drain_requests();
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.drain_requests();
        tracing::info!("session request pump stopped");
    }
}
