use glam::Mat4;

use super::{Geometry, ShaderMaterial};

/// Handle to a mesh attached to a `Scene`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub(crate) usize);

/// Geometry + material + model transform.
#[derive(Debug, Clone)]
pub struct Mesh {
    geometry: Geometry,
    pub material: ShaderMaterial,
    pub transform: Mat4,
    pub visible: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: ShaderMaterial) -> Self {
        Self {
            geometry,
            material,
            transform: Mat4::IDENTITY,
            visible: true,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}
