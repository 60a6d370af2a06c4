use winit::dpi::PhysicalSize;

/// Color format of the offscreen target (8-bit RGBA, sRGB encoded).
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Depth format paired with the color buffer.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Sample count of the multisampled target.
pub const MSAA_SAMPLES: u32 = 4;

/// From this pixel ratio up the target is single-sampled.
pub const MSAA_MAX_PIXEL_RATIO: f32 = 2.0;

/// Kind of offscreen color buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetKind {
    /// Single-sampled; used when the pixel ratio already supersamples the image.
    Standard,
    /// Multisampled, resolved into a single-sampled texture after the scene pass.
    Multisampled { samples: u32 },
}

impl TargetKind {
    /// Picks the target kind for a pixel ratio.
    ///
    /// At `MSAA_MAX_PIXEL_RATIO` and above the image is already supersampled.
    pub fn for_pixel_ratio(pixel_ratio: f32) -> Self {
        if pixel_ratio >= MSAA_MAX_PIXEL_RATIO {
            TargetKind::Standard
        } else {
            TargetKind::Multisampled {
                samples: MSAA_SAMPLES,
            }
        }
    }

    pub fn sample_count(self) -> u32 {
        match self {
            TargetKind::Standard => 1,
            TargetKind::Multisampled { samples } => samples,
        }
    }

    pub fn is_multisampled(self) -> bool {
        self.sample_count() > 1
    }
}

/// GPU textures backing an offscreen target.
struct TargetTextures {
    _color: wgpu::Texture,
    color_view: wgpu::TextureView,

    /// Single-sampled resolve destination (multisampled targets only).
    _resolve: Option<wgpu::Texture>,
    resolve_view: Option<wgpu::TextureView>,

    _depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

/// Offscreen color + depth buffers written by the scene pass.
///
/// The kind is fixed at construction. Textures are created lazily on the first
/// `ensure` and recreated when the size changes.
pub struct RenderTarget {
    kind: TargetKind,
    size: PhysicalSize<u32>,
    textures: Option<TargetTextures>,
    /// Bumped whenever textures are recreated; bind groups that sample the
    /// target compare against it.
    generation: u64,
    disposed: bool,
}

impl RenderTarget {
    pub fn new(kind: TargetKind, size: PhysicalSize<u32>) -> Self {
        Self {
            kind,
            size: clamp_size(size),
            textures: None,
            generation: 0,
            disposed: false,
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Sets the target size. Existing textures are dropped if it changed.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        let size = clamp_size(size);
        if size == self.size {
            return;
        }
        self.size = size;
        self.textures = None;
    }

    /// Creates the GPU textures if missing. No-op once disposed.
    pub fn ensure(&mut self, device: &wgpu::Device) {
        if self.disposed || self.textures.is_some() {
            return;
        }

        let extent = wgpu::Extent3d {
            width: self.size.width,
            height: self.size.height,
            depth_or_array_layers: 1,
        };
        let samples = self.kind.sample_count();

        let color_usage = if self.kind.is_multisampled() {
            wgpu::TextureUsages::RENDER_ATTACHMENT
        } else {
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("orb post color"),
            size: extent,
            mip_level_count: 1,
            sample_count: samples,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: color_usage,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

        let resolve = self.kind.is_multisampled().then(|| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("orb post resolve"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TARGET_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        });
        let resolve_view = resolve
            .as_ref()
            .map(|t| t.create_view(&wgpu::TextureViewDescriptor::default()));

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("orb post depth"),
            size: extent,
            mip_level_count: 1,
            sample_count: samples,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!(
            "post target created: {:?} {}x{}",
            self.kind,
            self.size.width,
            self.size.height
        );

        self.textures = Some(TargetTextures {
            _color: color,
            color_view,
            _resolve: resolve,
            resolve_view,
            _depth: depth,
            depth_view,
        });
        self.generation = self.generation.wrapping_add(1);
    }

    /// Attachment view the scene pass renders into.
    pub fn color_view(&self) -> Option<&wgpu::TextureView> {
        self.textures.as_ref().map(|t| &t.color_view)
    }

    /// Resolve destination, `Some` only for multisampled targets.
    pub fn resolve_view(&self) -> Option<&wgpu::TextureView> {
        self.textures.as_ref().and_then(|t| t.resolve_view.as_ref())
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.textures.as_ref().map(|t| &t.depth_view)
    }

    /// Single-sampled view holding the finished image.
    pub fn output_view(&self) -> Option<&wgpu::TextureView> {
        let t = self.textures.as_ref()?;
        Some(t.resolve_view.as_ref().unwrap_or(&t.color_view))
    }

    /// Releases the textures. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.textures = None;
        self.disposed = true;
    }
}

fn clamp_size(size: PhysicalSize<u32>) -> PhysicalSize<u32> {
    PhysicalSize::new(size.width.max(1), size.height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_pixel_ratio_multisamples() {
        assert_eq!(
            TargetKind::for_pixel_ratio(1.0),
            TargetKind::Multisampled { samples: 4 }
        );
        assert!(TargetKind::for_pixel_ratio(1.999).is_multisampled());
    }

    #[test]
    fn pixel_ratio_two_is_standard() {
        assert_eq!(TargetKind::for_pixel_ratio(2.0), TargetKind::Standard);
        assert_eq!(TargetKind::for_pixel_ratio(3.0).sample_count(), 1);
    }

    #[test]
    fn threshold_is_independent_of_the_ratio_cap() {
        assert_eq!(
            TargetKind::for_pixel_ratio(MSAA_MAX_PIXEL_RATIO),
            TargetKind::Standard
        );
        assert!(TargetKind::for_pixel_ratio(MSAA_MAX_PIXEL_RATIO - 0.01).is_multisampled());
    }

    #[test]
    fn resize_tracks_size_and_clamps_zero() {
        let mut target = RenderTarget::new(TargetKind::Standard, PhysicalSize::new(100, 50));
        target.resize(PhysicalSize::new(0, 20));
        assert_eq!(target.size(), PhysicalSize::new(1, 20));
        assert!(target.output_view().is_none());
    }

    #[test]
    fn dispose_twice_is_harmless() {
        let mut target = RenderTarget::new(
            TargetKind::for_pixel_ratio(1.0),
            PhysicalSize::new(10, 10),
        );
        target.dispose();
        target.dispose();
        assert!(target.is_disposed());
        assert!(target.color_view().is_none());
    }
}
