use winit::dpi::PhysicalSize;

use super::api::GlApi;

/// Drawable surface size in physical pixels.
///
/// May differ from the window's logical size on scaled displays.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FramebufferSize {
    pub width: u32,
    pub height: u32,
}

impl FramebufferSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True for minimised windows; nothing can be drawn.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<PhysicalSize<u32>> for FramebufferSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Points the viewport at the whole framebuffer and clears the color buffer.
///
/// No depth or stencil buffer is in use.
pub fn begin_frame<G: GlApi>(gl: &G, size: FramebufferSize) {
    let width = i32::try_from(size.width).unwrap_or(i32::MAX);
    let height = i32::try_from(size.height).unwrap_or(i32::MAX);
    gl.viewport(0, 0, width, height);
    gl.clear(glow::COLOR_BUFFER_BIT);
}
