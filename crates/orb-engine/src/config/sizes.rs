/// Upper bound for the pixel ratio.
///
/// Above 2x the fill-rate cost outweighs any visible gain.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Environment variable enabling the debug controls.
const DEBUG_ENV: &str = "ORB_DEBUG";

/// Sizing and feature flags shared by the experience components.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// Viewport width in logical pixels.
    pub width: f32,
    /// Viewport height in logical pixels.
    pub height: f32,
    /// Physical pixels per logical pixel, clamped to `[1, MAX_PIXEL_RATIO]`.
    pub pixel_ratio: f32,
    /// Whether live debug controls are registered.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            pixel_ratio: 1.0,
            debug: false,
        }
    }
}

impl Config {
    /// Builds a config from command-line arguments and the environment.
    ///
    /// Debug controls are enabled by `--debug` or `ORB_DEBUG=1`/`true`.
    pub fn from_env<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let flag = args.into_iter().any(|a| a == "--debug");
        let env = std::env::var(DEBUG_ENV)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            debug: flag || env,
            ..Self::default()
        }
    }

    /// Refreshes the sizing fields from a window's logical size and scale factor.
    pub fn apply_window_size(&mut self, width: f32, height: f32, scale_factor: f64) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = pixel_ratio_for_scale(scale_factor);
    }

    /// Width over height; 1.0 for a degenerate height.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Maps a platform scale factor to the pixel ratio used for rendering.
pub fn pixel_ratio_for_scale(scale_factor: f64) -> f32 {
    if !scale_factor.is_finite() {
        return 1.0;
    }
    (scale_factor as f32).clamp(1.0, MAX_PIXEL_RATIO)
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_clamped() {
        assert_eq!(pixel_ratio_for_scale(0.5), 1.0);
        assert_eq!(pixel_ratio_for_scale(1.5), 1.5);
        assert_eq!(pixel_ratio_for_scale(3.0), 2.0);
        assert_eq!(pixel_ratio_for_scale(f64::NAN), 1.0);
    }

    #[test]
    fn debug_flag_from_args() {
        let cfg = Config::from_env(["orb-studio".to_string(), "--debug".to_string()]);
        assert!(cfg.debug);
    }

    #[test]
    fn apply_window_size_updates_all_sizing_fields() {
        let mut cfg = Config::default();
        cfg.apply_window_size(800.0, 600.0, 2.5);
        assert_eq!((cfg.width, cfg.height, cfg.pixel_ratio), (800.0, 600.0, 2.0));
        assert!((cfg.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
