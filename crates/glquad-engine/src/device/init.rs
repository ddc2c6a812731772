/// Initialization parameters for the GL layer.
///
/// Keep this structure small. Add flags only when a concrete platform or
/// driver requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested core-profile version as `(major, minor)`.
    ///
    /// The embedded shaders use `#version 330 core`, so anything below 3.3
    /// fails at compile time.
    pub version: (u8, u8),

    /// Request a debug context and forward `GL_KHR_debug` messages to the logger.
    pub debug: bool,

    /// Wait for vertical blank on swap.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            debug: false,
            vsync: true,
        }
    }
}
