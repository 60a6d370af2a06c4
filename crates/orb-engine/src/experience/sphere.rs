use crate::config::Config;
use crate::debug::{ControlSpec, DebugPanel, FolderId};
use crate::scene::{Geometry, Mesh, MeshId, NoiseUniforms, Scene, ShaderMaterial};

/// Tessellation of the sphere along both axes.
pub const SEGMENTS: u32 = 512;

/// Default rate at which frame milliseconds turn into shader time.
pub const DEFAULT_TIME_FREQUENCY: f32 = 0.0001;

/// Debug field for the sphere's own time scale; the rest are uniform names.
pub const TIME_FREQUENCY_FIELD: &str = "timeFrequency";

const SHADER_LABEL: &str = "orb sphere";

const CONTROLS: [(&str, ControlSpec); 6] = [
    (TIME_FREQUENCY_FIELD, ControlSpec::new(0.0, 0.001, 0.000001)),
    (
        "uDistortionFrequency",
        ControlSpec::new(0.0, 10.0, 0.001).labeled("uDistortionFrequency"),
    ),
    (
        "uDisplacementFrequency",
        ControlSpec::new(0.0, 10.0, 0.001).labeled("uDisplacementFrequency"),
    ),
    (
        "uDistortionStrength",
        ControlSpec::new(0.0, 5.0, 0.001).labeled("uDistortionStrength"),
    ),
    (
        "uDisplacementStrength",
        ControlSpec::new(0.0, 1.0, 0.001).labeled("uDisplacementStrength"),
    ),
    (
        "uTimeFrequency",
        ControlSpec::new(0.0, 0.1, 0.0001).labeled("uTimeFrequency"),
    ),
];

/// Noise-displaced sphere mesh and its animation clock.
#[derive(Debug)]
pub struct Sphere {
    mesh: MeshId,
    time_frequency: f32,
    debug_folder: Option<FolderId>,
}

impl Sphere {
    /// Builds the geometry and material and attaches the mesh to `scene`.
    ///
    /// Controls are registered on `debug` when it is present.
    pub fn new(config: &Config, scene: &mut Scene, debug: Option<&mut DebugPanel>) -> Self {
        let debug_folder = debug
            .filter(|_| config.debug)
            .map(|panel| {
                let id = panel.add_folder("sphere");
                if let Some(folder) = panel.folder_mut(id) {
                    for (field, spec) in CONTROLS {
                        folder.add_control(field, spec);
                    }
                }
                id
            });

        let geometry = Geometry::sphere(1.0, SEGMENTS, SEGMENTS);
        let material = ShaderMaterial::new(
            SHADER_LABEL,
            include_str!("shaders/sphere.wgsl"),
            NoiseUniforms::default(),
        );

        log::debug!(
            "sphere: {} vertices, {} indices",
            geometry.vertices().len(),
            geometry.index_count()
        );

        let mesh = scene.add(Mesh::new(geometry, material));

        Self {
            mesh,
            time_frequency: DEFAULT_TIME_FREQUENCY,
            debug_folder,
        }
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn debug_folder(&self) -> Option<FolderId> {
        self.debug_folder
    }

    pub fn time_frequency(&self) -> f32 {
        self.time_frequency
    }

    pub fn set_time_frequency(&mut self, value: f32) {
        self.time_frequency = value.max(0.0);
    }

    /// Current `uTime` uniform.
    pub fn time(&self, scene: &Scene) -> f32 {
        scene
            .mesh(self.mesh)
            .map(|m| m.material.uniforms.time)
            .unwrap_or(0.0)
    }

    /// Advances the shader time by `delta_ms * time_frequency`.
    pub fn update(&mut self, scene: &mut Scene, delta_ms: f32) {
        if let Some(mesh) = scene.mesh_mut(self.mesh) {
            mesh.material.uniforms.time += delta_ms * self.time_frequency;
        }
    }

    /// Rewrites a tunable value through `f` and returns the new value.
    ///
    /// `field` is `timeFrequency` or a uniform name; `uTime` is not tunable.
    pub fn tune(&mut self, scene: &mut Scene, field: &str, f: impl FnOnce(f32) -> f32) -> Option<f32> {
        if field == TIME_FREQUENCY_FIELD {
            self.set_time_frequency(f(self.time_frequency));
            return Some(self.time_frequency);
        }
        if field == "uTime" {
            return None;
        }

        let slot = scene.mesh_mut(self.mesh)?.material.uniforms.get_mut(field)?;
        *slot = f(*slot);
        Some(*slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(debug: bool) -> Config {
        Config {
            debug,
            ..Config::default()
        }
    }

    #[test]
    fn attaches_full_resolution_mesh() {
        let mut scene = Scene::new();
        let sphere = Sphere::new(&small_config(false), &mut scene, None);

        let mesh = scene.mesh(sphere.mesh()).unwrap();
        assert_eq!(mesh.geometry().vertices().len(), 513 * 513);
        assert_eq!(mesh.material.uniforms, NoiseUniforms::default());
        assert_eq!(sphere.time_frequency(), 0.0001);
        assert_eq!(sphere.time(&scene), 0.0);
    }

    #[test]
    fn time_accumulates_sequentially() {
        let mut scene = Scene::new();
        let mut sphere = Sphere::new(&small_config(false), &mut scene, None);

        let dt = 16.6667_f32;
        let mut expected = 0.0_f32;
        for _ in 0..600 {
            sphere.update(&mut scene, dt);
            expected += dt * 0.0001;
        }

        assert_eq!(sphere.time(&scene), expected);
        assert!((sphere.time(&scene) - 600.0 * dt * 0.0001).abs() < 1e-4);
    }

    #[test]
    fn time_never_decreases() {
        let mut scene = Scene::new();
        let mut sphere = Sphere::new(&small_config(false), &mut scene, None);
        sphere.tune(&mut scene, TIME_FREQUENCY_FIELD, |_| -1.0);

        let before = sphere.time(&scene);
        sphere.update(&mut scene, 16.0);
        assert!(sphere.time(&scene) >= before);
    }

    #[test]
    fn registers_debug_controls_when_enabled() {
        let mut scene = Scene::new();
        let mut panel = DebugPanel::new();
        let sphere = Sphere::new(&small_config(true), &mut scene, Some(&mut panel));

        let folder = panel.folder(sphere.debug_folder().unwrap()).unwrap();
        assert_eq!(folder.title(), "sphere");
        let fields: Vec<_> = folder.controls().iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            [
                "timeFrequency",
                "uDistortionFrequency",
                "uDisplacementFrequency",
                "uDistortionStrength",
                "uDisplacementStrength",
                "uTimeFrequency",
            ]
        );
    }

    #[test]
    fn no_controls_without_debug_flag() {
        let mut scene = Scene::new();
        let mut panel = DebugPanel::new();
        let sphere = Sphere::new(&small_config(false), &mut scene, Some(&mut panel));
        assert!(sphere.debug_folder().is_none());
        assert_eq!(panel.control_count(), 0);
    }

    #[test]
    fn tune_edits_uniforms_by_name() {
        let mut scene = Scene::new();
        let mut sphere = Sphere::new(&small_config(false), &mut scene, None);

        let v = sphere
            .tune(&mut scene, "uDisplacementStrength", |v| v + 0.1)
            .unwrap();
        assert!((v - 0.3).abs() < 1e-6);
        assert_eq!(
            scene.mesh(sphere.mesh()).unwrap().material.uniforms.displacement_strength,
            v
        );
        assert_eq!(sphere.tune(&mut scene, "uTime", |v| v + 1.0), None);
        assert_eq!(sphere.tune(&mut scene, "nope", |v| v), None);
    }
}
