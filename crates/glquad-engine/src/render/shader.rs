use std::fmt;

use super::api::GlApi;
use super::error::RenderError;

pub const VERTEX_SHADER_SOURCE: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
   gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

pub const FRAGMENT_SHADER_SOURCE: &str = r#"#version 330 core
out vec4 FragColor;
void main()
{
   FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
"#;

/// Fill color written by [`FRAGMENT_SHADER_SOURCE`] (RGBA).
pub const QUAD_COLOR: [f32; 4] = [1.0, 0.5, 0.2, 1.0];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    fn object_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        })
    }
}

/// One failed status check with the driver's log text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShaderDiagnostic {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl ShaderDiagnostic {
    pub fn log(&self) -> &str {
        match self {
            ShaderDiagnostic::Compile { log, .. } | ShaderDiagnostic::Link { log } => log,
        }
    }
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderDiagnostic::Compile { stage, log } => {
                write!(f, "ERROR::SHADER::{stage}::COMPILATION_FAILED\n{}", log.trim_end())
            }
            ShaderDiagnostic::Link { log } => {
                write!(f, "ERROR::SHADER::PROGRAM::LINKING_FAILED\n{}", log.trim_end())
            }
        }
    }
}

/// Every diagnostic produced by one failed program build, in check order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShaderLog {
    diagnostics: Vec<ShaderDiagnostic>,
}

impl ShaderLog {
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        &self.diagnostics
    }

    pub fn failed_stage(&self, stage: ShaderStage) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, ShaderDiagnostic::Compile { stage: s, .. } if *s == stage))
    }

    pub fn link_failed(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, ShaderDiagnostic::Link { .. }))
    }
}

impl fmt::Display for ShaderLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// A successfully linked vertex + fragment program.
///
/// Only obtainable through [`ShaderProgram::build`], so holding one means the
/// link status was checked. Not `Clone`; release with [`ShaderProgram::delete`].
pub struct ShaderProgram<G: GlApi> {
    program: G::Program,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Builds the fixed quad program from the embedded sources.
    pub fn build(gl: &G) -> Result<Self, RenderError> {
        Self::build_from_sources(gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }

    /// Compiles both stages, links them and deletes the stage objects.
    ///
    /// Each status check runs even after an earlier one failed, so the error
    /// carries every compile and link log the driver produced.
    pub fn build_from_sources(
        gl: &G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, RenderError> {
        let mut diagnostics = Vec::new();

        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source, &mut diagnostics)?;
        let fragment =
            match compile_stage(gl, ShaderStage::Fragment, fragment_source, &mut diagnostics) {
                Ok(s) => s,
                Err(e) => {
                    gl.delete_shader(vertex);
                    return Err(e);
                }
            };

        let program = match gl.create_program() {
            Ok(p) => p,
            Err(reason) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(RenderError::create("shader program", reason));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        if !gl.program_link_status(program) {
            diagnostics.push(ShaderDiagnostic::Link {
                log: non_empty(gl.program_info_log(program)),
            });
        }

        // The program keeps the compiled code.
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !diagnostics.is_empty() {
            gl.delete_program(program);
            return Err(RenderError::Shader(ShaderLog { diagnostics }));
        }

        log::debug!("shader program linked ({program:?})");
        Ok(Self { program })
    }

    #[inline]
    pub fn handle(&self) -> G::Program {
        self.program
    }

    pub fn bind(&self, gl: &G) {
        gl.use_program(Some(self.program));
    }

    pub fn delete(self, gl: &G) {
        gl.delete_program(self.program);
    }
}

fn compile_stage<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<ShaderDiagnostic>,
) -> Result<G::Shader, RenderError> {
    let shader = gl
        .create_shader(stage.gl_enum())
        .map_err(|reason| RenderError::create(stage.object_name(), reason))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        diagnostics.push(ShaderDiagnostic::Compile {
            stage,
            log: non_empty(gl.shader_info_log(shader)),
        });
    }

    Ok(shader)
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        "(driver returned an empty info log)".to_string()
    } else {
        log
    }
}
