//! Post-processing chain.
//!
//! One scene pass renders into an offscreen `RenderTarget`; a present pass then
//! composites that target onto the window surface.

mod pass;
mod present;
mod target;

pub use pass::ScenePass;
pub use present::PresentPass;
pub use target::{
    RenderTarget, TargetKind, DEPTH_FORMAT, MSAA_MAX_PIXEL_RATIO, MSAA_SAMPLES, TARGET_FORMAT,
};

use winit::dpi::PhysicalSize;

/// Scene pass + offscreen target.
///
/// The target kind is fixed at construction.
pub struct PostProcess {
    pub scene_pass: ScenePass,
    pub target: RenderTarget,
}

impl PostProcess {
    pub fn new(kind: TargetKind, size: PhysicalSize<u32>, clear: wgpu::Color) -> Self {
        log::debug!("post process: {kind:?} {}x{}", size.width, size.height);
        Self {
            scene_pass: ScenePass::new(clear),
            target: RenderTarget::new(kind, size),
        }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.target.resize(size);
    }

    pub fn dispose(&mut self) {
        self.target.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_fixed_at_construction() {
        let kind = TargetKind::for_pixel_ratio(1.0);
        let mut post = PostProcess::new(kind, PhysicalSize::new(800, 600), wgpu::Color::WHITE);
        post.resize(PhysicalSize::new(1600, 1200));
        assert!(post.target.kind().is_multisampled());
        assert_eq!(post.target.size(), PhysicalSize::new(1600, 1200));
    }

    #[test]
    fn dispose_releases_target() {
        let mut post = PostProcess::new(
            TargetKind::Standard,
            PhysicalSize::new(800, 600),
            wgpu::Color::WHITE,
        );
        post.dispose();
        assert!(post.target.is_disposed());
        assert_eq!(post.scene_pass.clear_color(), wgpu::Color::WHITE);
    }
}
