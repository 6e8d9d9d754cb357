use crate::coords::{Vec2, Vec3};
use crate::math::Mat4;

/// Per-drawable transform state.
///
/// The default is all zeros, including the scale.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec2,
    pub rotation_degrees: f32,
}

impl Transform {
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
    }

    pub fn set_scale(&mut self, w: f32, h: f32) {
        self.scale = Vec2::new(w, h);
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation_degrees = degrees;
    }

    /// identity -> scale(sx, sy, 1) -> rotate -> translate.
    pub fn model_matrix(&self) -> Mat4 {
        let radians = (std::f64::consts::PI * self.rotation_degrees as f64 / 180.0) as f32;

        let mut m = Mat4::identity();
        m.scale(self.scale.x, self.scale.y, 1.0);
        m.rotate(radians);
        m.translate(self.position.x, self.position.y, self.position.z);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zeroed() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::zero());
        assert_eq!(t.scale, Vec2::zero());
        assert_eq!(t.rotation_degrees, 0.0);

        let m = t.model_matrix();
        assert_eq!(m.m[0][0], 0.0);
        assert_eq!(m.m[1][1], 0.0);
        assert_eq!(m.m[2][2], 1.0);
    }

    #[test]
    fn scaled_and_translated_without_rotation() {
        let mut t = Transform::default();
        t.set_scale(2.0, 1.0);
        t.set_position(3.0, 0.0, 0.0);

        let m = t.model_matrix();
        assert_eq!(m.m[0][0], 2.0);
        assert_eq!(m.m[1][1], 1.0);
        assert_eq!(m.m[3][0], 3.0);
        assert_eq!(m.m[3][1], 0.0);
        assert_eq!(m.m[0][1], 0.0);
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let mut t = Transform::default();
        t.set_scale(1.0, 1.0);
        t.set_rotation(90.0);

        let m = t.model_matrix();
        assert!(m.m[0][0].abs() < 1e-6);
        assert!((m.m[0][1] - 1.0).abs() < 1e-6);
        assert!((m.m[1][0] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn position_z_lands_in_row_three() {
        let mut t = Transform::default();
        t.set_position(0.0, -0.5, 2.0);
        let m = t.model_matrix();
        assert_eq!(m.m[3], [0.0, -0.5, 2.0, 1.0]);
    }
}
