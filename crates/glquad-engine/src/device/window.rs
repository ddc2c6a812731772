use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{debug, GlInit};
use crate::render::FramebufferSize;

/// A window with a current OpenGL context.
///
/// Owns, in drop order: the loaded GL function table, the window surface,
/// the context and the window. The context stays current on the thread that
/// created it until [`GlWindow::destroy`].
pub struct GlWindow {
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlWindow {
    /// Creates the window, a core-profile context of `init.version` and a
    /// window surface, then makes the context current and loads GL.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GlInit,
    ) -> Result<Self> {
        let template = ConfigTemplateBuilder::new();

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create window and GL config: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no raw handle")?
            .as_raw();

        let display = config.display();
        let (major, minor) = init.version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .with_debug(init.debug)
            .build(Some(raw_handle));

        // SAFETY: `raw_handle` belongs to `window`, which is dropped after the context.
        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to build GL surface attributes")?;

        // SAFETY: same window handle lifetime argument as above.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create GL window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        // SAFETY: the context is current and `display` resolves its entry points.
        let mut gl =
            unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };

        if init.debug {
            debug::install(&mut gl);
        }

        // SAFETY: context is current.
        let (version, renderer) = unsafe {
            (
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
            )
        };
        log::info!("GL context ready: {version} on {renderer}");

        Ok(Self {
            gl,
            surface,
            context,
            window,
        })
    }

    #[inline]
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn framebuffer_size(&self) -> FramebufferSize {
        self.window.inner_size().into()
    }

    /// Resizes the surface; zero-sized (minimised) windows are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.surface.resize(&self.context, w, h);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.window.pre_present_notify();
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    /// Tears down surface, context and window in that order.
    ///
    /// GL objects must have been deleted before this call.
    pub fn destroy(self) {
        let Self {
            gl,
            surface,
            context,
            window,
        } = self;

        drop(gl);
        drop(surface);
        drop(context);
        drop(window);
        log::debug!("GL window destroyed");
    }
}

/// Picks the config with the fewest samples; no multisampling is used.
///
/// glutin reports an error instead of calling the picker when nothing matches
/// the template, so the iterator is never empty.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() < best.num_samples() { c } else { best })
        .expect("glutin yields at least one config")
}
