use std::io::Write;

use super::api::GlApi;
use super::error::RenderError;
use super::frame::{begin_frame, FramebufferSize};
use super::geometry::QuadMesh;
use super::shader::{ShaderLog, ShaderProgram, FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};

/// Whether the quad program is usable.
pub enum ProgramState<G: GlApi> {
    Ready(ShaderProgram<G>),
    /// Build failed; the renderer clears but never draws.
    Failed(ShaderLog),
}

/// What [`QuadRenderer::setup`] does when the program fails to build.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ShaderFailurePolicy {
    /// Print the diagnostics and keep running with clear-only frames.
    #[default]
    LogAndContinue,
    /// Print the diagnostics, release the mesh and return the error.
    Abort,
}

/// Result of one [`QuadRenderer::render`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Drawn,
    /// Cleared only, because the program failed to build.
    Skipped,
}

/// Owns the quad mesh and its shader program.
///
/// Geometry and program are created once in [`QuadRenderer::setup`] and left
/// untouched until [`QuadRenderer::release`].
pub struct QuadRenderer<G: GlApi = glow::Context> {
    mesh: QuadMesh<G>,
    program: ProgramState<G>,
    warned_skip: bool,
}

impl<G: GlApi> QuadRenderer<G> {
    /// Uploads the quad and builds its program from the embedded sources.
    ///
    /// Shader diagnostics are printed to standard output. Under
    /// [`ShaderFailurePolicy::LogAndContinue`] the failure is kept in
    /// [`ProgramState::Failed`] and only allocation failures are errors.
    pub fn setup(gl: &G, policy: ShaderFailurePolicy) -> Result<Self, RenderError> {
        Self::setup_with_sources(
            gl,
            VERTEX_SHADER_SOURCE,
            FRAGMENT_SHADER_SOURCE,
            policy,
            &mut std::io::stdout().lock(),
        )
    }

    pub(crate) fn setup_with_sources<W: Write>(
        gl: &G,
        vertex_source: &str,
        fragment_source: &str,
        policy: ShaderFailurePolicy,
        console: &mut W,
    ) -> Result<Self, RenderError> {
        let mesh = QuadMesh::upload(gl)?;

        let program = match ShaderProgram::build_from_sources(gl, vertex_source, fragment_source) {
            Ok(p) => ProgramState::Ready(p),
            Err(RenderError::Shader(log)) => {
                print_diagnostics(console, &log);
                log::error!(
                    "quad shader program failed to build ({} diagnostics)",
                    log.diagnostics().len()
                );
                if policy == ShaderFailurePolicy::Abort {
                    mesh.release(gl);
                    return Err(RenderError::Shader(log));
                }
                ProgramState::Failed(log)
            }
            Err(e) => {
                mesh.release(gl);
                return Err(e);
            }
        };

        Ok(Self {
            mesh,
            program,
            warned_skip: false,
        })
    }

    pub fn program(&self) -> &ProgramState<G> {
        &self.program
    }

    pub fn mesh(&self) -> &QuadMesh<G> {
        &self.mesh
    }

    pub fn shader_failure(&self) -> Option<&ShaderLog> {
        match &self.program {
            ProgramState::Ready(_) => None,
            ProgramState::Failed(log) => Some(log),
        }
    }

    /// Draws one frame: viewport, clear, program, vertex array, 6 indices.
    pub fn render(&mut self, gl: &G, size: FramebufferSize) -> FrameOutcome {
        begin_frame(gl, size);

        let ProgramState::Ready(program) = &self.program else {
            if !self.warned_skip {
                log::warn!("quad program unavailable; frames are cleared but not drawn");
                self.warned_skip = true;
            }
            return FrameOutcome::Skipped;
        };

        program.bind(gl);
        self.mesh.bind(gl);
        gl.draw_elements(glow::TRIANGLES, self.mesh.index_count(), glow::UNSIGNED_INT, 0);

        FrameOutcome::Drawn
    }

    /// Deletes the mesh objects and the program. The context must be current.
    pub fn release(self, gl: &G) {
        self.mesh.release(gl);
        if let ProgramState::Ready(program) = self.program {
            program.delete(gl);
        }
        log::debug!("quad renderer released");
    }
}

/// One prefixed line per diagnostic followed by the raw driver log.
fn print_diagnostics<W: Write>(console: &mut W, log: &ShaderLog) {
    for d in log.diagnostics() {
        if let Err(e) = writeln!(console, "{d}") {
            log::warn!("failed to print shader diagnostic: {e}");
            return;
        }
    }
}
