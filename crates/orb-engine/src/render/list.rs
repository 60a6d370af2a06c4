use crate::scene::{MeshId, Scene};

/// Per-frame list of meshes to draw.
///
/// Rebuilt from the scene every frame; keeps its allocation between frames.
#[derive(Debug, Default)]
pub struct RenderList {
    items: Vec<MeshId>,
    disposed: bool,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects visible meshes in scene order.
    pub fn rebuild(&mut self, scene: &Scene) {
        self.items.clear();
        if self.disposed {
            return;
        }
        self.items
            .extend(scene.iter().filter(|(_, m)| m.visible).map(|(id, _)| id));
    }

    pub fn items(&self) -> &[MeshId] {
        &self.items
    }

    /// Releases the cached list. Later rebuilds produce empty lists.
    pub fn dispose(&mut self) {
        self.items = Vec::new();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Mesh, NoiseUniforms, ShaderMaterial};

    fn mesh(visible: bool) -> Mesh {
        let mut m = Mesh::new(
            Geometry::sphere(1.0, 4, 3),
            ShaderMaterial::new("test", "", NoiseUniforms::default()),
        );
        m.visible = visible;
        m
    }

    #[test]
    fn skips_hidden_meshes() {
        let mut scene = Scene::new();
        let shown = scene.add(mesh(true));
        scene.add(mesh(false));

        let mut list = RenderList::new();
        list.rebuild(&scene);
        assert_eq!(list.items(), &[shown]);
    }

    #[test]
    fn dispose_is_idempotent_and_sticky() {
        let mut scene = Scene::new();
        scene.add(mesh(true));

        let mut list = RenderList::new();
        list.rebuild(&scene);
        list.dispose();
        list.dispose();
        list.rebuild(&scene);
        assert!(list.items().is_empty());
        assert!(list.is_disposed());
    }
}
