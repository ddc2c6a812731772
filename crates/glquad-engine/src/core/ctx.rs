use crate::device::Gl;
use crate::render::FramebufferSize;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub gl: &'a Gl,

    /// Queried from the window at the start of this frame.
    pub framebuffer: FramebufferSize,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}
