use super::shader::ShaderLog;

/// Failures while creating GL resources.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The driver refused to hand out an object name.
    #[error("failed to create {object}: {reason}")]
    Create { object: &'static str, reason: String },

    /// Compilation or linking reported failure; holds every diagnostic.
    #[error("{0}")]
    Shader(ShaderLog),
}

impl RenderError {
    pub(crate) fn create(object: &'static str, reason: String) -> Self {
        Self::Create { object, reason }
    }
}
