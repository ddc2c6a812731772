use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::core::{App, FrameCtx};
use crate::device::{GlInit, GlWindow};
use crate::input::platform::winit::translate_window_event;
use crate::input::CloseFlag;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub fullscreen: bool,
    pub resizable: bool,
    pub gl: GlInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glfw window".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            fullscreen: false,
            resizable: false,
            gl: GlInit::default(),
        }
    }
}

impl RuntimeConfig {
    pub(crate) fn window_attributes(&self) -> WindowAttributes {
        let mut attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
            .with_resizable(self.resizable);

        if self.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        attrs
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app` until the close flag is set, then shuts down.
    ///
    /// Returns an error if the window or context could not be created or the
    /// app's `init` failed. A normal close returns `Ok(())`.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        // No frame pacing beyond the swap interval.
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    window: Option<GlWindow>,
    close: CloseFlag,
    frame_index: u64,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            close: CloseFlag::default(),
            frame_index: 0,
            failure: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let gl_window = GlWindow::new(
            event_loop,
            self.config.window_attributes(),
            &self.config.gl,
        )?;

        self.app
            .init(gl_window.gl())
            .context("application setup failed")?;

        log::info!(
            "window \"{}\" open at {:?}",
            self.config.title,
            gl_window.framebuffer_size()
        );
        self.window = Some(gl_window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("Error: {err:#}");
        self.failure = Some(err);
        self.close.request();
        event_loop.exit();
    }

    /// One loop iteration: query size, let the app draw, present.
    fn redraw(&mut self) {
        if self.close.is_set() {
            return;
        }
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let framebuffer = window.framebuffer_size();
        if framebuffer.is_empty() {
            return;
        }

        let mut ctx = FrameCtx {
            gl: window.gl(),
            framebuffer,
            frame_index: self.frame_index,
        };
        self.app.on_frame(&mut ctx);

        if let Err(e) = window.swap_buffers() {
            log::error!("Error: {e:#}");
        }

        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// Releases app resources with the context current, then the window.
    fn shutdown(&mut self) {
        let Some(window) = self.window.take() else {
            return;
        };

        self.app.shutdown(window.gl());
        window.destroy();
        log::info!("shut down after {} frames", self.frame_index);
    }

    fn finish(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.close.is_set() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(window) = self.window.as_ref() {
            window.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(ev) = translate_window_event(&event) {
            if self.close.apply(&ev) {
                log::debug!("close requested by {ev:?}");
            }
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(window) = self.window.as_ref() {
                    window.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }

        if self.close.is_set() {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.close.is_set() {
            self.shutdown();
            event_loop.exit();
            return;
        }

        // Continuous redraw.
        if let Some(window) = self.window.as_ref() {
            window.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
