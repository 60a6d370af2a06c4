//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the experience driven by it, and the per-frame context handed across.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
