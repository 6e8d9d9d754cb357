use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Unit-quad vertex: position in model space and texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Centered unit square, v = 0 at the bottom edge.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-0.5, 0.5], uv: [0.0, 1.0] },
    QuadVertex { position: [-0.5, -0.5], uv: [0.0, 0.0] },
    QuadVertex { position: [0.5, -0.5], uv: [1.0, 0.0] },
    QuadVertex { position: [0.5, 0.5], uv: [1.0, 1.0] },
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// GPU buffers for one unit quad.
pub struct QuadGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
}

impl QuadGeometry {
    pub const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;
    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiln quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiln quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self { vertex_buffer, index_buffer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(tri: &[u32]) -> f32 {
        let p = |i: u32| QUAD_VERTICES[i as usize].position;
        let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
    }

    #[test]
    fn triangles_wind_counter_clockwise() {
        for tri in QUAD_INDICES.chunks(3) {
            assert!(signed_area(tri) > 0.0, "triangle {tri:?} is not CCW");
        }
    }

    #[test]
    fn triangles_cover_the_unit_square() {
        let total: f32 = QUAD_INDICES.chunks(3).map(signed_area).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn uv_follows_position() {
        for v in QUAD_VERTICES {
            assert_eq!(v.uv[0], v.position[0] + 0.5);
            assert_eq!(v.uv[1], v.position[1] + 0.5);
        }
    }

    #[test]
    fn vertex_stride_is_four_floats() {
        assert_eq!(QuadVertex::layout().array_stride, 16);
    }
}
