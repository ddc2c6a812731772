//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application: lifecycle callbacks and the per-frame context.

mod app;
mod ctx;

pub use app::App;
pub use ctx::FrameCtx;
