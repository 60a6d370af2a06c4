use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

/// Uniform block read by the noise-displacement shader.
///
/// Layout matches the WGSL `NoiseUniforms` struct (32 bytes, 16-byte multiple).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct NoiseUniforms {
    pub time: f32,
    pub distortion_frequency: f32,
    pub distortion_strength: f32,
    pub displacement_frequency: f32,
    pub displacement_strength: f32,
    pub time_frequency: f32,
    pub _pad: [f32; 2],
}

impl Default for NoiseUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            distortion_frequency: 2.0,
            distortion_strength: 1.0,
            displacement_frequency: 2.0,
            displacement_strength: 0.2,
            time_frequency: 0.0001,
            _pad: [0.0; 2],
        }
    }
}

impl NoiseUniforms {
    /// Mutable access by shader-facing name (`uTime`, `uDistortionFrequency`, ...).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut f32> {
        let slot = match name {
            "uTime" => &mut self.time,
            "uDistortionFrequency" => &mut self.distortion_frequency,
            "uDistortionStrength" => &mut self.distortion_strength,
            "uDisplacementFrequency" => &mut self.displacement_frequency,
            "uDisplacementStrength" => &mut self.displacement_strength,
            "uTimeFrequency" => &mut self.time_frequency,
            _ => return None,
        };
        Some(slot)
    }
}

/// Material backed by a WGSL vertex/fragment pair and a uniform block.
///
/// The shader must expose `vs_main` and `fs_main`, read the camera transform at
/// `@group(0) @binding(0)` and the uniforms at `@group(0) @binding(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderMaterial {
    label: &'static str,
    source: Cow<'static, str>,
    pub uniforms: NoiseUniforms,
}

impl ShaderMaterial {
    pub fn new(
        label: &'static str,
        source: impl Into<Cow<'static, str>>,
        uniforms: NoiseUniforms,
    ) -> Self {
        Self {
            label,
            source: source.into(),
            uniforms,
        }
    }

    /// Identifies the shader program; renderers key pipelines on it.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_16_byte_multiple() {
        assert_eq!(std::mem::size_of::<NoiseUniforms>(), 32);
    }

    #[test]
    fn defaults() {
        let u = NoiseUniforms::default();
        assert_eq!(u.time, 0.0);
        assert_eq!(u.distortion_frequency, 2.0);
        assert_eq!(u.distortion_strength, 1.0);
        assert_eq!(u.displacement_frequency, 2.0);
        assert_eq!(u.displacement_strength, 0.2);
        assert_eq!(u.time_frequency, 0.0001);
    }

    #[test]
    fn named_access_round_trips() {
        let mut u = NoiseUniforms::default();
        *u.get_mut("uDisplacementStrength").unwrap() = 0.5;
        assert_eq!(u.displacement_strength, 0.5);
        assert!(u.get_mut("uNope").is_none());
    }
}
