//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the GL window, and drives the app's
//! init / frame / shutdown callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
