use crate::config::Config;
use crate::core::{AppControl, FrameCtx};
use crate::device::SurfaceErrorAction;
use crate::scene::{Camera, Scene};
use crate::stats::Stats;

use super::post::{PostProcess, PresentPass, TargetKind};
use super::{Color, MeshRenderer, RenderCtx, RenderList, RenderSurface};

/// Clear color of the scene pass.
pub const CLEAR_HEX: &str = "#ffffff";

/// GPU-side drawing objects, created lazily on the first frame.
#[derive(Default)]
struct DrawingContext {
    meshes: MeshRenderer,
    present: PresentPass,
}

/// Owns the drawing context, the scene pass and its offscreen target.
///
/// Each `update` renders the scene into the offscreen target and composites
/// that target onto the window surface. After `destroy` it draws nothing.
pub struct Renderer {
    surface: RenderSurface,
    post: PostProcess,
    list: RenderList,
    context: Option<DrawingContext>,
    stats: Option<Stats>,
    last_draw_calls: u32,
}

impl Renderer {
    /// Creates the drawing context state from `config`, with antialiasing
    /// enabled and a white clear color.
    pub fn new(config: &Config, stats: Option<Stats>) -> Self {
        let clear = Color::from_hex(CLEAR_HEX).unwrap_or(Color::WHITE);
        let surface = RenderSurface::new(config, clear);
        let post = Self::configure_post_process(&surface);

        log::info!(
            "renderer: {}x{} @ {}x, target {:?}",
            surface.width(),
            surface.height(),
            surface.pixel_ratio(),
            post.target.kind()
        );

        Self {
            surface,
            post,
            list: RenderList::new(),
            context: Some(DrawingContext::default()),
            stats,
            last_draw_calls: 0,
        }
    }

    /// One scene pass into an offscreen target. With antialiasing on, the kind
    /// follows the pixel ratio; otherwise the target is single-sampled.
    fn configure_post_process(surface: &RenderSurface) -> PostProcess {
        let kind = if surface.antialias() {
            TargetKind::for_pixel_ratio(surface.pixel_ratio())
        } else {
            TargetKind::Standard
        };
        PostProcess::new(
            kind,
            surface.drawable_size(),
            surface.clear_color().to_wgpu_linear(),
        )
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn target_kind(&self) -> TargetKind {
        self.post.target.kind()
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    /// Draw calls issued by the last rendered frame.
    pub fn last_draw_calls(&self) -> u32 {
        self.last_draw_calls
    }

    pub fn is_destroyed(&self) -> bool {
        self.context.is_none()
    }

    /// Applies new window dimensions and pixel ratio.
    ///
    /// The offscreen target follows the clamped drawable size; its kind stays as
    /// chosen at construction. The window surface itself tracks the window's
    /// physical size and is reconfigured by the runtime.
    pub fn resize(&mut self, config: &Config) {
        self.surface.set_size(config.width, config.height);
        self.surface.set_pixel_ratio(config.pixel_ratio);
        self.post.resize(self.surface.drawable_size());
    }

    /// Renders one frame of `scene` seen from `camera`.
    pub fn update(&mut self, frame: &mut FrameCtx<'_, '_>, scene: &Scene, camera: &Camera) -> AppControl {
        let Some(context) = self.context.as_mut() else {
            return AppControl::Continue;
        };

        // Minimized: the swapchain keeps its last valid configuration.
        if !frame.gpu.is_presentable() {
            return AppControl::Continue;
        }

        if let Some(stats) = self.stats.as_mut() {
            if !stats.is_attached() {
                stats.attach(&frame.gpu.adapter_info());
            }
            stats.before_frame();
        }

        let mut gpu_frame = match frame.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match frame.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let rctx = RenderCtx::new(
            frame.gpu.device(),
            frame.gpu.queue(),
            frame.gpu.surface_format(),
            frame.gpu.size(),
        );

        self.post.target.ensure(rctx.device);
        self.list.rebuild(scene);

        let samples = self.post.target.kind().sample_count();
        let items = self.list.items();
        context.meshes.prepare(&rctx, scene, items, camera, samples);

        let meshes = &context.meshes;
        let draws = self
            .post
            .scene_pass
            .record(&mut gpu_frame.encoder, &self.post.target, |rpass| {
                meshes.draw(rpass, scene, items, samples)
            })
            .unwrap_or(0);

        context
            .present
            .render(&rctx, &mut gpu_frame.encoder, &gpu_frame.view, &self.post.target);

        frame.window.window.pre_present_notify();
        frame.gpu.submit(gpu_frame);

        if draws != self.last_draw_calls {
            log::debug!("draw calls per frame: {draws}");
        }
        self.last_draw_calls = draws;

        if let Some(stats) = self.stats.as_mut() {
            stats.after_frame();
        }

        AppControl::Continue
    }

    /// Releases render lists, the drawing context and the offscreen target, in
    /// that order. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }

        self.list.dispose();
        self.context = None;
        self.post.dispose();
        self.surface.dispose();
        log::info!("renderer destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    fn config(width: f32, height: f32, pixel_ratio: f32) -> Config {
        Config {
            width,
            height,
            pixel_ratio,
            debug: false,
        }
    }

    #[test]
    fn new_reports_configured_surface() {
        let r = Renderer::new(&config(1280.0, 720.0, 1.0), None);
        assert_eq!(r.surface().width(), 1280.0);
        assert_eq!(r.surface().height(), 720.0);
        assert_eq!(r.surface().pixel_ratio(), 1.0);
        assert_eq!(r.surface().clear_color(), Color::WHITE);
        assert!(!r.is_destroyed());
    }

    #[test]
    fn resize_updates_surface_and_target() {
        let mut r = Renderer::new(&config(1280.0, 720.0, 1.5), None);
        r.resize(&config(800.0, 600.0, 1.5));
        assert_eq!((r.surface().width(), r.surface().height()), (800.0, 600.0));
        assert_eq!(r.post.target.size(), PhysicalSize::new(1200, 900));
        assert!(r.target_kind().is_multisampled());
    }

    #[test]
    fn target_uses_clamped_ratio_on_dense_displays() {
        // A 3x display: the window is 3840x2160 physical, the target is capped at 2x.
        let mut cfg = config(1280.0, 720.0, 1.0);
        cfg.apply_window_size(1280.0, 720.0, 3.0);

        let r = Renderer::new(&cfg, None);
        assert_eq!(r.post.target.size(), PhysicalSize::new(2560, 1440));
        assert_eq!(r.target_kind(), TargetKind::Standard);
    }

    #[test]
    fn minimized_window_keeps_a_valid_target() {
        let mut r = Renderer::new(&config(1280.0, 720.0, 1.0), None);
        r.resize(&config(0.0, 0.0, 1.0));
        assert_eq!(r.post.target.size(), PhysicalSize::new(1, 1));
    }

    #[test]
    fn target_kind_follows_pixel_ratio() {
        assert!(Renderer::new(&config(100.0, 100.0, 1.0), None)
            .target_kind()
            .is_multisampled());
        assert_eq!(
            Renderer::new(&config(100.0, 100.0, 2.0), None).target_kind(),
            TargetKind::Standard
        );
    }

    #[test]
    fn destroy_twice_is_a_noop() {
        let mut r = Renderer::new(&config(640.0, 480.0, 1.0), Some(Stats::new()));
        r.destroy();
        assert!(r.is_destroyed());
        assert!(r.post.target.is_disposed());
        assert!(r.list.is_disposed());
        r.destroy();
        assert!(r.is_destroyed());
    }
}
