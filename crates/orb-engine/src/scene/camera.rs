use glam::{Mat4, Vec3};

use crate::config::Config;

/// Perspective camera looking at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    aspect: f32,
}

impl Camera {
    pub fn new(config: &Config) -> Self {
        Self {
            fov_y_degrees: 35.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            aspect: config.aspect(),
        }
    }

    /// Tracks the viewport aspect ratio.
    pub fn resize(&mut self, config: &Config) {
        self.aspect = config.aspect();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection into wgpu clip space (depth 0..1).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(f32::EPSILON),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
