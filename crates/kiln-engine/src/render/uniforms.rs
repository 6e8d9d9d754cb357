use bytemuck::{Pod, Zeroable};

use crate::coords::{Viewport, Vec4};
use crate::math::Mat4;

/// Sub-rectangle of a texture, in UV units: origin `(u, v)`, extent `(du, dv)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexRegion {
    pub u: f32,
    pub v: f32,
    pub du: f32,
    pub dv: f32,
}

impl TexRegion {
    pub const FULL: TexRegion = TexRegion { u: 0.0, v: 0.0, du: 1.0, dv: 1.0 };

    #[inline]
    pub const fn new(u: f32, v: f32, du: f32, dv: f32) -> Self {
        Self { u, v, du, dv }
    }
}

impl Default for TexRegion {
    fn default() -> Self {
        Self::FULL
    }
}

/// Uniform block bound at group 0, binding 0 of every quad shader.
///
/// ```wgsl
/// struct DrawUniforms {
///     model: mat4x4<f32>,
///     projection: mat4x4<f32>,
///     tex_coords: vec4<f32>,
/// }
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model: Mat4,
    pub projection: Mat4,
    pub tex_coords: Vec4,
}

impl DrawUniforms {
    pub fn new(model: Mat4, projection: Mat4, region: TexRegion) -> Self {
        Self {
            model,
            projection,
            tex_coords: Vec4::new(region.u, region.v, region.du, region.dv),
        }
    }

    /// Minimum binding size for the uniform buffer layout entry.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64)
            .expect("DrawUniforms has non-zero size by construction")
    }
}

/// Projection for a window: x spans `[-aspect, aspect]`, y spans `[-1, 1]`.
pub fn projection(viewport: Viewport) -> Mat4 {
    let aspect = viewport.aspect();
    Mat4::orthographic(-aspect, aspect, -1.0, 1.0, -10.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_144_bytes() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 144);
        assert_eq!(DrawUniforms::min_binding_size().get(), 144);
    }

    #[test]
    fn tex_coords_follow_region_order() {
        let u = DrawUniforms::new(Mat4::identity(), Mat4::identity(), TexRegion::new(0.25, 0.5, 0.125, 1.0));
        assert_eq!(u.tex_coords, Vec4::new(0.25, 0.5, 0.125, 1.0));

        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(&floats[32..36], &[0.25, 0.5, 0.125, 1.0]);
    }

    #[test]
    fn projection_tracks_aspect() {
        let wide = projection(Viewport::new(1600, 800));
        assert!((wide.m[0][0] - 0.5).abs() < 1e-6);
        assert!((wide.m[1][1] - 1.0).abs() < 1e-6);

        let tall = projection(Viewport::new(400, 800));
        assert!((tall.m[0][0] - 2.0).abs() < 1e-6);
    }
}
