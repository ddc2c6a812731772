use anyhow::Result;

use crate::device::Gl;

use super::ctx::FrameCtx;

/// Application contract implemented by higher layers.
///
/// Callbacks run on the event-loop thread with the GL context current.
pub trait App {
    /// Called once after the context is created, before the first frame.
    ///
    /// An error aborts startup and is returned from `Runtime::run`.
    fn init(&mut self, gl: &Gl) -> Result<()>;

    /// Called once per iteration of the render loop.
    ///
    /// The runtime presents the frame after this returns. The loop only
    /// ends through the window's close flag.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>);

    /// Called once when the loop exits, while the context is still current.
    fn shutdown(&mut self, gl: &Gl);
}
