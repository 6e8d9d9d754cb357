use bytemuck::{Pod, Zeroable};

/// 4x4 matrix stored as `m[row][col]`.
///
/// The operations here mutate individual cells rather than multiplying
/// matrices: `scale` writes the diagonal, `translate` writes row 3 and
/// `rotate` mixes the first two columns of rows 0..3. Build a model matrix
/// with identity -> scale -> rotate -> translate; other orders give
/// different results.
///
/// The 64 bytes are uploaded to the GPU untouched, so WGSL reads row `r`
/// of this struct as column `r` of its `mat4x4<f32>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Overwrites the diagonal scale cells.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.m[0][0] = sx;
        self.m[1][1] = sy;
        self.m[2][2] = sz;
    }

    /// Rotates rows 0..3 in the XY plane by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        let (s, c) = (angle as f64).sin_cos();
        let (s, c) = (s as f32, c as f32);

        for row in self.m.iter_mut().take(3) {
            let a = row[0];
            let b = row[1];
            row[0] = c * a - s * b;
            row[1] = s * a + c * b;
        }
    }

    /// Overwrites the translation cells in row 3.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.m[3][0] = x;
        self.m[3][1] = y;
        self.m[3][2] = z;
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = [[0.0f32; 4]; 4];

        m[0][0] = 2.0 / (right - left);
        m[1][1] = 2.0 / (top - bottom);
        m[2][2] = -2.0 / (far - near);
        m[0][3] = -(right + left) / (right - left);
        m[1][3] = -(top + bottom) / (top - bottom);
        m[2][3] = -(far + near) / (far - near);
        m[3][3] = 1.0;

        Self { m }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPS
    }

    // ── rotate ────────────────────────────────────────────────────────────

    #[test]
    fn rotate_identity_gives_2d_rotation() {
        for deg in [0.0f32, 30.0, 90.0, 135.0, 180.0, 270.0, -45.0] {
            let theta = deg.to_radians();
            let mut m = Mat4::identity();
            m.scale(1.0, 1.0, 1.0);
            m.rotate(theta);
            m.translate(0.0, 0.0, 0.0);

            let (s, c) = (theta.sin(), theta.cos());
            assert!(approx(m.m[0][0], c), "deg {deg}");
            assert!(approx(m.m[0][1], s), "deg {deg}");
            assert!(approx(m.m[1][0], -s), "deg {deg}");
            assert!(approx(m.m[1][1], c), "deg {deg}");
            assert_eq!(m.m[2][0], 0.0);
            assert_eq!(m.m[2][1], 0.0);
            assert_eq!(m.m[2][2], 1.0);
            assert_eq!(m.m[3], [0.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn rotate_preserves_columns_two_and_three() {
        let mut m = Mat4::identity();
        m.m[0][2] = 7.0;
        m.m[1][3] = 9.0;
        m.rotate(1.0);
        assert_eq!(m.m[0][2], 7.0);
        assert_eq!(m.m[1][3], 9.0);
    }

    // ── scale / translate ─────────────────────────────────────────────────

    #[test]
    fn scale_overwrites_rather_than_multiplies() {
        let mut m = Mat4::identity();
        m.scale(2.0, 3.0, 4.0);
        m.scale(5.0, 6.0, 7.0);
        assert_eq!(m.m[0][0], 5.0);
        assert_eq!(m.m[1][1], 6.0);
        assert_eq!(m.m[2][2], 7.0);
    }

    #[test]
    fn translate_writes_row_three() {
        let mut m = Mat4::identity();
        m.translate(1.0, 2.0, 3.0);
        assert_eq!(m.m[3], [1.0, 2.0, 3.0, 1.0]);
    }

    // ── pipeline order ────────────────────────────────────────────────────

    #[test]
    fn scale_then_rotate_differs_from_rotate_then_scale() {
        let angle = 0.7;

        let mut a = Mat4::identity();
        a.scale(2.0, 0.5, 1.0);
        a.rotate(angle);
        a.translate(1.0, 1.0, 0.0);

        let mut b = Mat4::identity();
        b.rotate(angle);
        b.scale(2.0, 0.5, 1.0);
        b.translate(1.0, 1.0, 0.0);

        assert_ne!(a, b);
    }

    // ── orthographic ──────────────────────────────────────────────────────

    #[test]
    fn orthographic_symmetric_volume() {
        for a in [0.5f32, 1.0, 4.0 / 3.0, 16.0 / 9.0] {
            let m = Mat4::orthographic(-a, a, -1.0, 1.0, -10.0, 10.0);
            assert!(approx(m.m[0][0], 1.0 / a));
            assert!(approx(m.m[1][1], 1.0));
            assert!(approx(m.m[2][2], -0.1));
            assert_eq!(m.m[3][3], 1.0);
            assert_eq!(m.m[0][3], 0.0);
            assert_eq!(m.m[1][3], 0.0);
            assert_eq!(m.m[2][3], 0.0);
        }
    }

    #[test]
    fn orthographic_off_center_translation_terms() {
        let m = Mat4::orthographic(0.0, 4.0, 0.0, 2.0, 1.0, 3.0);
        assert!(approx(m.m[0][3], -1.0));
        assert!(approx(m.m[1][3], -1.0));
        assert!(approx(m.m[2][3], -2.0));
        assert_eq!(m.m[3][0], 0.0);
    }

    #[test]
    fn gpu_bytes_are_row_major() {
        let mut m = Mat4::identity();
        m.translate(3.0, 0.0, 0.0);
        let floats: &[f32] = bytemuck::cast_slice(m.as_bytes());
        assert_eq!(floats.len(), 16);
        assert_eq!(floats[12], 3.0);
    }
}
