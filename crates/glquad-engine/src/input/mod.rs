//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events through `platform::winit`.

mod close;
pub(crate) mod platform;
mod types;

pub use close::{requests_close, CloseFlag};
pub use types::{InputEvent, Key, KeyState};
