//! Scene graph types.
//!
//! The scene is a flat list of meshes. Each mesh pairs immutable geometry with a
//! shader material whose uniforms the host rewrites between frames. Everything
//! here is CPU-side; GPU resources are owned by `render`.

mod camera;
mod geometry;
mod material;
mod mesh;

pub use camera::Camera;
pub use geometry::{Geometry, MeshVertex};
pub use material::{NoiseUniforms, ShaderMaterial};
pub use mesh::{Mesh, MeshId};

/// Meshes drawn by the renderer, in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a mesh and returns its handle.
    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len());
        self.meshes.push(mesh);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    /// Iterates meshes with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_mesh() -> Mesh {
        Mesh::new(
            Geometry::sphere(1.0, 3, 2),
            ShaderMaterial::new("test", "", NoiseUniforms::default()),
        )
    }

    #[test]
    fn add_returns_sequential_handles() {
        let mut scene = Scene::new();
        let a = scene.add(tiny_mesh());
        let b = scene.add(tiny_mesh());
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert!(scene.mesh(b).is_some());
        assert_eq!(scene.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![a, b]);
    }
}
