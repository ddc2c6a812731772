//! glquad engine crate.
//!
//! Window runtime, OpenGL context bootstrap and the fixed quad renderer used by
//! the demo binary.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod window;
