//! Drawable quads: transform state plus the unit-quad geometry each mesh owns.

mod quad;
mod transform;

pub use quad::{QuadGeometry, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use transform::Transform;

use crate::resource::Resource;

/// A textured quad: transform state plus its own vertex and index buffers.
pub struct Mesh {
    pub transform: Transform,
    pub geometry: QuadGeometry,
}

impl Mesh {
    /// Creates a zero-initialized mesh. It stays invisible until scaled.
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            transform: Transform::default(),
            geometry: QuadGeometry::new(device),
        }
    }
}

impl Resource for Mesh {
    const KIND: &'static str = "mesh";
}
