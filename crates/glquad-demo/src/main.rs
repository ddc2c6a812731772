use anyhow::Result;

use glquad_engine::core::{App, FrameCtx};
use glquad_engine::device::Gl;
use glquad_engine::logging::{init_logging, LoggingConfig};
use glquad_engine::render::{QuadRenderer, ShaderFailurePolicy};
use glquad_engine::window::{Runtime, RuntimeConfig};

/// Demo-level switches, fixed at build time. No command line or environment
/// is read; edit `main` to change them.
#[derive(Debug, Clone, Default)]
struct DemoOptions {
    /// `Abort` turns a broken quad program into a startup error with a
    /// non-zero exit instead of clear-only frames.
    shader_failure: ShaderFailurePolicy,
}

struct QuadDemo {
    options: DemoOptions,
    quad: Option<QuadRenderer>,
}

impl QuadDemo {
    fn new(options: DemoOptions) -> Self {
        Self { options, quad: None }
    }
}

impl App for QuadDemo {
    fn init(&mut self, gl: &Gl) -> Result<()> {
        self.quad = Some(QuadRenderer::setup(gl, self.options.shader_failure)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) {
        let Some(quad) = self.quad.as_mut() else {
            return;
        };

        let outcome = quad.render(ctx.gl, ctx.framebuffer);
        if ctx.frame_index == 0 {
            log::info!("first frame {outcome:?} at {:?}", ctx.framebuffer);
        }
    }

    fn shutdown(&mut self, gl: &Gl) {
        if let Some(quad) = self.quad.take() {
            quad.release(gl);
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default();
    let options = DemoOptions::default();
    log::info!("starting glquad demo ({options:?})");

    Runtime::run(config, QuadDemo::new(options))
}
