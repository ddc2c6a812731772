//! GL rendering subsystem.
//!
//! Everything here is generic over [`GlApi`] and only issues calls on the
//! thread that owns the current context. Conventions:
//! - positions are normalized device coordinates, no transforms
//! - every GL object is owned by exactly one value and released explicitly

mod api;
mod error;
mod frame;
mod geometry;
mod quad;
mod shader;

#[cfg(test)]
mod fake;

pub use api::GlApi;
pub use error::RenderError;
pub use frame::{begin_frame, FramebufferSize};
pub use geometry::{QuadMesh, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use quad::{FrameOutcome, ProgramState, QuadRenderer, ShaderFailurePolicy};
pub use shader::{
    ShaderDiagnostic, ShaderLog, ShaderProgram, ShaderStage, FRAGMENT_SHADER_SOURCE, QUAD_COLOR,
    VERTEX_SHADER_SOURCE,
};
