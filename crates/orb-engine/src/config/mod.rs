//! Experience configuration.
//!
//! A single explicit `Config` is built at startup and passed by reference to each
//! component's constructor. Sizing fields are refreshed from the window on resize.

mod sizes;

pub use sizes::{pixel_ratio_for_scale, Config, MAX_PIXEL_RATIO};
