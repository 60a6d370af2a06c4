use super::RenderTarget;

/// The "draw the scene from the camera" stage.
///
/// Clears the offscreen target, hands the open pass to a draw callback and, for
/// multisampled targets, resolves into the single-sampled output on store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePass {
    clear: wgpu::Color,
}

impl ScenePass {
    pub fn new(clear: wgpu::Color) -> Self {
        Self { clear }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.clear
    }

    /// Records the pass. Returns the number of draw calls issued by `draw`,
    /// or `None` if the target has no textures.
    pub fn record<F>(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &RenderTarget,
        draw: F,
    ) -> Option<u32>
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>) -> u32,
    {
        let color_view = target.color_view()?;
        let depth_view = target.depth_view()?;

        // The multisampled buffer is only needed until it is resolved.
        let store = if target.resolve_view().is_some() {
            wgpu::StoreOp::Discard
        } else {
            wgpu::StoreOp::Store
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orb scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: target.resolve_view(),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear),
                    store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        Some(draw(&mut rpass))
    }
}
