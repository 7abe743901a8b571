//! Fixed-rate window loop: dispatch input, compose a frame, present it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

use crate::config::Configuration;
use crate::events::{Command, DisplayMode};
use crate::input::command_for_window_event;
use crate::render::frame::FrameComposer;
use crate::render::gpu::{PresentStatus, Presenter};
use crate::session::{Outcome, Session};

/// Open the window and run until the user quits.
///
/// # Errors
/// Returns an error if the event loop, window or GPU cannot be initialised.
pub fn run(session: Session, cfg: &Configuration) -> Result<()> {
    let composer = FrameComposer::from_config(cfg)?;
    let event_loop = EventLoop::new().context("failed to build viewer event loop")?;
    let mut app = ViewerApp::new(session, composer, cfg);
    event_loop
        .run_app(&mut app)
        .context("viewer event loop failed")?;
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct ViewerApp {
    session: Session,
    composer: FrameComposer,
    title: String,
    windowed_size: LogicalSize<u32>,
    frame_interval: Duration,
    next_frame: Instant,
    // Declared before `window` so GPU resources drop first.
    presenter: Option<Presenter>,
    window: Option<Arc<Window>>,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(session: Session, composer: FrameComposer, cfg: &Configuration) -> Self {
        Self {
            session,
            composer,
            title: cfg.window.title.clone(),
            windowed_size: LogicalSize::new(cfg.window.width, cfg.window.height),
            frame_interval: cfg.frame_interval(),
            next_frame: Instant::now(),
            presenter: None,
            window: None,
            fatal: None,
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(window) = self.window.as_ref() {
            return Ok(window.clone());
        }
        let mut attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(self.windowed_size)
            .with_resizable(true);
        if self.session.mode() == DisplayMode::Fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create viewer window")?,
        );
        self.window = Some(window.clone());
        Ok(window)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!(error = ?err, "viewer failed");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, command: Command) {
        debug!(?command, "dispatch");
        match self.session.apply(command) {
            Outcome::Continue => {}
            Outcome::DisplayModeChanged(mode) => self.apply_display_mode(mode),
            Outcome::Quit => {
                info!("quit requested");
                event_loop.exit();
            }
        }
    }

    fn apply_display_mode(&self, mode: DisplayMode) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        match mode {
            DisplayMode::Fullscreen => {
                window.set_fullscreen(Some(Fullscreen::Borderless(window.current_monitor())));
            }
            DisplayMode::Windowed => {
                window.set_fullscreen(None);
                let _ = window.request_inner_size(self.windowed_size);
            }
        }
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        let (width, height) = presenter.size();
        let frame = self.composer.compose(&self.session, width, height);
        if presenter.present(&frame) == PresentStatus::Fatal {
            self.fail(event_loop, anyhow!("GPU surface out of memory"));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match self.ensure_window(event_loop) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err),
        };
        if self.presenter.is_none() {
            match Presenter::new(window.clone()) {
                Ok(presenter) => self.presenter = Some(presenter),
                Err(err) => return self.fail(event_loop, err),
            }
            info!(
                total = self.session.deck().total(),
                mode = ?self.session.mode(),
                "viewer ready"
            );
        }
        self.next_frame = Instant::now();
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        if let Some(command) = command_for_window_event(&event) {
            self.dispatch(event_loop, command);
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size);
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = window.inner_size();
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.draw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if event_loop.exiting() {
            return;
        }
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
            self.next_frame += self.frame_interval;
            // Fell behind (slow decode, suspended laptop): don't try to catch up.
            if self.next_frame < now {
                self.next_frame = now + self.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.presenter = None;
        self.window = None;
        info!("viewer closed");
    }
}
