use bytemuck::{Pod, Zeroable};

/// Vertex layout shared by mesh geometry (32 bytes):
///
///  offset  0  position [f32; 3]   loc 0
///  offset 12  normal   [f32; 3]   loc 1
///  offset 24  uv       [f32; 2]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed triangle geometry. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl Geometry {
    /// Builds a UV sphere centered on the origin.
    ///
    /// Produces `(width_segments + 1) * (height_segments + 1)` vertices; seam and
    /// pole vertices are duplicated so every vertex carries its own UV. The pole
    /// rows emit one triangle per quad, giving
    /// `6 * width_segments * (height_segments - 1)` indices. Triangles wind
    /// counter-clockwise seen from outside.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);

        let row = (w + 1) as usize;
        let mut vertices = Vec::with_capacity(row * (h + 1) as usize);

        for iy in 0..=h {
            let v = iy as f32 / h as f32;

            // Pole vertices take the UV of their quad's center.
            let u_offset = if iy == 0 {
                0.5 / w as f32
            } else if iy == h {
                -0.5 / w as f32
            } else {
                0.0
            };

            let theta = v * std::f32::consts::PI;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let phi = u * std::f32::consts::TAU;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
                vertices.push(MeshVertex {
                    position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                    uv: [u + u_offset, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::with_capacity(6 * (w * (h - 1)) as usize);
        let at = |ix: u32, iy: u32| iy * (w + 1) + ix;

        for iy in 0..h {
            for ix in 0..w {
                let a = at(ix + 1, iy);
                let b = at(ix, iy);
                let c = at(ix, iy + 1);
                let d = at(ix + 1, iy + 1);

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let g = Geometry::sphere(1.0, 8, 6);
        assert_eq!(g.vertices().len(), 9 * 7);
        assert_eq!(g.indices().len(), 6 * 8 * 5);
    }

    #[test]
    fn full_resolution_counts() {
        let g = Geometry::sphere(1.0, 512, 512);
        assert_eq!(g.vertices().len(), 513 * 513);
        assert_eq!(g.index_count(), 6 * 512 * 511);
    }

    #[test]
    fn vertices_lie_on_radius() {
        let g = Geometry::sphere(2.5, 16, 12);
        for v in g.vertices() {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 2.5).abs() < 1e-4, "radius {r}");

            let [nx, ny, nz] = v.normal;
            assert!(((nx * nx + ny * ny + nz * nz).sqrt() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn poles_are_top_and_bottom_rows() {
        let g = Geometry::sphere(1.0, 4, 4);
        assert!((g.vertices()[0].position[1] - 1.0).abs() < 1e-6);
        let last = g.vertices().last().unwrap();
        assert!((last.position[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn indices_are_in_range() {
        let g = Geometry::sphere(1.0, 10, 7);
        let n = g.vertices().len() as u32;
        assert!(g.indices().iter().all(|&i| i < n));
    }

    #[test]
    fn triangles_face_outward() {
        let g = Geometry::sphere(1.0, 12, 8);
        let p = |i: u32| glam::Vec3::from(g.vertices()[i as usize].position);

        for tri in g.indices().chunks_exact(3) {
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let n = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(n.dot(center) > 0.0);
        }
    }

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
    }
}
