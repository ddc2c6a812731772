//! GL context management.
//!
//! This module is responsible for:
//! - creating the window together with a matching GL config (glutin-winit)
//! - creating the core-profile context and window surface, making it current
//! - loading GL entry points into a `glow::Context`
//! - presenting frames and tearing everything down in order

mod debug;
mod init;
mod window;

pub use init::GlInit;
pub use window::GlWindow;

/// The GL function table handed to applications.
pub type Gl = glow::Context;
