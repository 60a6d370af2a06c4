use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;
use crate::render::post::{DEPTH_FORMAT, TARGET_FORMAT};
use crate::scene::{Camera, Mesh, MeshId, MeshVertex, NoiseUniforms, Scene};

/// Renderer for scene meshes with shader materials.
///
/// Pipelines are keyed by material label and sample count; vertex/index and
/// uniform buffers are created per mesh on first sight. Geometry is uploaded
/// once since it never changes; uniforms are rewritten every frame.
#[derive(Default)]
pub struct MeshRenderer {
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    meshes: HashMap<MeshId, MeshGpu>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PipelineKey {
    shader: &'static str,
    samples: u32,
}

struct MeshGpu {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    transform_ubo: wgpu::Buffer,
    material_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl MeshRenderer {
    /// Creates missing GPU resources and uploads this frame's uniforms.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        scene: &Scene,
        items: &[MeshId],
        camera: &Camera,
        samples: u32,
    ) {
        self.ensure_layouts(ctx);

        let view_proj = camera.view_projection();

        for &id in items {
            let Some(mesh) = scene.mesh(id) else { continue };

            self.ensure_pipeline(ctx, mesh, samples);
            self.ensure_mesh(ctx, id, mesh);

            let Some(gpu) = self.meshes.get(&id) else { continue };
            let transform = TransformUniform {
                view_proj: view_proj.to_cols_array_2d(),
                model: mesh.transform.to_cols_array_2d(),
            };
            ctx.queue
                .write_buffer(&gpu.transform_ubo, 0, bytemuck::bytes_of(&transform));
            ctx.queue.write_buffer(
                &gpu.material_ubo,
                0,
                bytemuck::bytes_of(&mesh.material.uniforms),
            );
        }
    }

    /// Records one draw call per prepared mesh. Returns the number of draw calls.
    pub fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        scene: &Scene,
        items: &[MeshId],
        samples: u32,
    ) -> u32 {
        let mut draws = 0;

        for &id in items {
            let Some(mesh) = scene.mesh(id) else { continue };
            let key = PipelineKey {
                shader: mesh.material.label(),
                samples,
            };
            let Some(pipeline) = self.pipelines.get(&key) else { continue };
            let Some(gpu) = self.meshes.get(&id) else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &gpu.bind_group, &[]);
            rpass.set_vertex_buffer(0, gpu.vbo.slice(..));
            rpass.set_index_buffer(gpu.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
            draws += 1;
        }

        draws
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group_layout.is_some() && self.pipeline_layout.is_some() {
            return;
        }

        let uniform_entry = |binding: u32, size: u64| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(size),
            },
            count: None,
        };

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orb mesh bgl"),
            entries: &[
                uniform_entry(0, std::mem::size_of::<TransformUniform>() as u64),
                uniform_entry(1, std::mem::size_of::<NoiseUniforms>() as u64),
            ],
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orb mesh pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        self.bind_group_layout = Some(bgl);
        self.pipeline_layout = Some(layout);
        self.pipelines.clear();
        self.meshes.clear();
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, mesh: &Mesh, samples: u32) {
        let key = PipelineKey {
            shader: mesh.material.label(),
            samples,
        };
        if self.pipelines.contains_key(&key) {
            return;
        }
        let Some(layout) = self.pipeline_layout.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(key.shader),
            source: wgpu::ShaderSource::Wgsl(mesh.material.source().into()),
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(key.shader),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: samples,
                ..Default::default()
            },
            multiview_mask: None,
            cache: None,
        });

        log::debug!("mesh pipeline built: {} ({}x)", key.shader, samples);
        self.pipelines.insert(key, pipeline);
    }

    fn ensure_mesh(&mut self, ctx: &RenderCtx<'_>, id: MeshId, mesh: &Mesh) {
        if self.meshes.contains_key(&id) {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let geometry = mesh.geometry();
        let label = mesh.material.label();

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orb mesh vbo"),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orb mesh ibo"),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let transform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orb mesh transform ubo"),
            size: std::mem::size_of::<TransformUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let material_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orb mesh material ubo"),
            size: std::mem::size_of::<NoiseUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orb mesh bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: transform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_ubo.as_entire_binding(),
                },
            ],
        });

        log::debug!(
            "uploaded mesh {:?} ({label}): {} vertices, {} indices",
            id,
            geometry.vertices().len(),
            geometry.index_count()
        );

        self.meshes.insert(
            id,
            MeshGpu {
                vbo,
                ibo,
                index_count: geometry.index_count(),
                transform_ubo,
                material_ubo,
                bind_group,
            },
        );
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Camera and model matrices, column-major (128 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_uniform_is_two_matrices() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 128);
    }
}
