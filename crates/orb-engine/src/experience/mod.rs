//! The animated sphere experience.
//!
//! `Experience` owns the configuration and every component built from it (scene,
//! camera, renderer, sphere, debug panel) and implements `core::App` so the
//! window runtime drives it.

mod sphere;

pub use sphere::{Sphere, DEFAULT_TIME_FREQUENCY, SEGMENTS, TIME_FREQUENCY_FIELD};

use anyhow::Result;

use crate::config::Config;
use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::debug::DebugPanel;
use crate::input::{InputFrame, Key, Modifiers};
use crate::render::Renderer;
use crate::scene::{Camera, Scene};
use crate::stats::Stats;

pub struct Experience {
    config: Config,
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    sphere: Sphere,
    debug: Option<DebugPanel>,
}

impl Experience {
    /// Builds every component from `config`.
    ///
    /// The debug panel and stats collector exist only when `config.debug` is set.
    pub fn new(config: Config) -> Self {
        let mut scene = Scene::new();
        let mut debug = config.debug.then(DebugPanel::new);

        let camera = Camera::new(&config);
        let sphere = Sphere::new(&config, &mut scene, debug.as_mut());
        let stats = config.debug.then(Stats::new);
        let renderer = Renderer::new(&config, stats);

        if let Some(panel) = debug.as_ref() {
            log::info!(
                "debug controls enabled ({} controls): Tab selects, arrows step, Shift x10",
                panel.control_count()
            );
        }

        Self {
            config,
            scene,
            camera,
            renderer,
            sphere,
            debug,
        }
    }

    /// Builds the experience sized to an open window.
    pub fn for_window(mut config: Config, window: &WindowCtx<'_>) -> Result<Self> {
        let (width, height) = window.logical_size();
        config.apply_window_size(width, height, window.scale_factor());
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Applies new window metrics to the camera and renderer.
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f64) {
        self.config.apply_window_size(width, height, scale_factor);
        self.camera.resize(&self.config);
        self.renderer.resize(&self.config);
    }

    /// Advances the animation by one frame delta.
    pub fn tick(&mut self, delta_ms: f32) {
        self.sphere.update(&mut self.scene, delta_ms);
    }

    /// Routes debug key presses to the component owning the edited control.
    pub fn apply_debug_input(&mut self, input: &InputFrame, modifiers: Modifiers) {
        let Some(panel) = self.debug.as_mut() else { return };
        let Some(edit) = panel.handle_input(input, modifiers) else { return };

        if Some(edit.folder) != self.sphere.debug_folder() {
            return;
        }

        if let Some(value) = self
            .sphere
            .tune(&mut self.scene, edit.field, |v| edit.apply(v))
        {
            log::info!(
                "debug: sphere/{} = {value}",
                edit.spec.label.unwrap_or(edit.field)
            );
        }
    }

    /// Releases GPU-facing resources. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.renderer.destroy();
    }
}

impl App for Experience {
    fn on_resize(&mut self, window: &WindowCtx<'_>) {
        let (width, height) = window.logical_size();
        self.resize(width, height, window.scale_factor());
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            ctx.runtime.exit();
            return AppControl::Continue;
        }

        self.apply_debug_input(ctx.input_frame, ctx.input.modifiers);
        self.tick(ctx.time.delta_ms);

        self.renderer.update(ctx, &self.scene, &self.camera)
    }

    fn on_exit(&mut self) {
        self.teardown();
    }
}
