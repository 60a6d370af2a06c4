use winit::dpi::PhysicalSize;

use crate::config::Config;

use super::Color;

/// Drawing-context state: logical size, pixel ratio and clear color.
///
/// `drawable_size()` sizes the offscreen target. Window transparency is a
/// window attribute (`GpuInit::alpha`) and is not tracked here.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    width: f32,
    height: f32,
    pixel_ratio: f32,
    clear_color: Color,
    antialias: bool,
    disposed: bool,
}

impl RenderSurface {
    /// Creates the surface state with antialiasing enabled.
    pub fn new(config: &Config, clear_color: Color) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pixel_ratio: config.pixel_ratio,
            clear_color,
            antialias: true,
            disposed: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio;
    }

    /// Size in physical pixels, never zero.
    pub fn drawable_size(&self) -> PhysicalSize<u32> {
        let px = |logical: f32| (logical * self.pixel_ratio).round().max(1.0) as u32;
        PhysicalSize::new(px(self.width), px(self.height))
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: f32, height: f32, pixel_ratio: f32) -> Config {
        Config {
            width,
            height,
            pixel_ratio,
            debug: false,
        }
    }

    #[test]
    fn reports_configured_size() {
        let s = RenderSurface::new(&config(1024.0, 768.0, 1.5), Color::WHITE);
        assert_eq!((s.width(), s.height(), s.pixel_ratio()), (1024.0, 768.0, 1.5));
        assert!(s.antialias());
        assert_eq!(s.clear_color(), Color::WHITE);
    }

    #[test]
    fn drawable_size_scales_by_pixel_ratio() {
        let s = RenderSurface::new(&config(640.5, 480.0, 2.0), Color::WHITE);
        assert_eq!(s.drawable_size(), PhysicalSize::new(1281, 960));
    }

    #[test]
    fn drawable_size_is_never_zero() {
        let s = RenderSurface::new(&config(0.0, 0.0, 1.0), Color::WHITE);
        assert_eq!(s.drawable_size(), PhysicalSize::new(1, 1));
    }
}
