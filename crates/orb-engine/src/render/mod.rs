//! GPU rendering subsystem.
//!
//! `Renderer` walks the `scene` into a render list, draws it into an offscreen
//! target and composites that target onto the window. Each GPU-facing type
//! creates its own resources (pipelines, buffers) on first use.

mod color;
mod ctx;
mod list;
mod mesh;
pub mod post;
mod renderer;
mod surface;

pub use color::Color;
pub use ctx::RenderCtx;
pub use list::RenderList;
pub use mesh::MeshRenderer;
pub use renderer::{Renderer, CLEAR_HEX};
pub use surface::RenderSurface;
