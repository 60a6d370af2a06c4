//! orb engine crate.
//!
//! Platform + GPU runtime pieces, the scene and renderer, and the noise-sphere
//! experience built on them.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod config;
pub mod logging;
pub mod render;
pub mod scene;

pub mod debug;
pub mod stats;
pub mod experience;
