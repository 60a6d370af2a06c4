//! Frame statistics.
//!
//! `Stats` measures CPU time spent between `before_frame` and `after_frame`
//! and logs a summary at a fixed interval.

mod collector;

pub use collector::{Stats, DEFAULT_REPORT_INTERVAL};
