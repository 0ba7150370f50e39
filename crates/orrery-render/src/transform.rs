//! World transform for objects that are re-posed every draw call.

use glam::{DMat3, DVec3, Vec3};

/// Position, orientation, and non-uniform scale.
///
/// The shared grid mesh composes one of these and is re-posed per patch;
/// there is no persistent transform per quadtree leaf.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    position: DVec3,
    scale: Vec3,
    direction: DVec3,
    right: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            scale: Vec3::ONE,
            direction: DVec3::Z,
            right: DVec3::X,
        }
    }
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Orient the local forward axis along `dir`, with `up` fixing the roll.
    ///
    /// When `dir` and `up` are parallel the basis is degenerate; the
    /// direction is nudged by a small epsilon before the cross products, the
    /// same escape hatch the surface-normal callers rely on at the poles.
    pub fn set_direction(&mut self, dir: DVec3, up: DVec3) {
        let mut direction = dir.normalize_or(DVec3::Z);
        let up = up.normalize_or(DVec3::X);

        if direction.cross(up).length_squared() < f64::EPSILON {
            direction = (direction + DVec3::splat(1e-8)).normalize();
        }

        self.direction = direction;
        self.right = up.cross(direction).normalize();
    }

    /// Rotation basis with columns right, up, direction.
    #[must_use]
    pub fn rotation(&self) -> DMat3 {
        let up = self.direction.cross(self.right);
        DMat3::from_cols(self.right, up, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_default_is_identity_basis() {
        let t = Transform::new();
        let r = t.rotation();
        assert!((r.x_axis - DVec3::X).length() < EPSILON);
        assert!((r.y_axis - DVec3::Y).length() < EPSILON);
        assert!((r.z_axis - DVec3::Z).length() < EPSILON);
    }

    #[test]
    fn test_rotation_basis_is_orthonormal() {
        let mut t = Transform::new();
        t.set_direction(DVec3::new(0.3, 0.8, -0.2), DVec3::X);
        let r = t.rotation();
        for axis in [r.x_axis, r.y_axis, r.z_axis] {
            assert!((axis.length() - 1.0).abs() < 1e-6, "axis not unit: {axis:?}");
        }
        assert!(r.x_axis.dot(r.y_axis).abs() < 1e-6);
        assert!(r.y_axis.dot(r.z_axis).abs() < 1e-6);
        assert!(r.z_axis.dot(r.x_axis).abs() < 1e-6);
    }

    #[test]
    fn test_direction_becomes_forward_axis() {
        let mut t = Transform::new();
        let dir = DVec3::new(0.0, 1.0, 0.0);
        t.set_direction(dir, DVec3::X);
        let r = t.rotation();
        assert!((r.z_axis - dir).length() < EPSILON);
    }

    #[test]
    fn test_parallel_direction_and_up_stay_finite() {
        let mut t = Transform::new();
        t.set_direction(DVec3::Y, DVec3::Y);
        let r = t.rotation();
        assert!(r.x_axis.is_finite() && r.y_axis.is_finite() && r.z_axis.is_finite());
        assert!((r.x_axis.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_position_and_scale_round_trip() {
        let mut t = Transform::new();
        t.set_position(DVec3::new(1.0, 2.0, 3.0));
        t.set_scale(Vec3::new(4.0, 4.0, 1.0));
        assert_eq!(t.position(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale(), Vec3::new(4.0, 4.0, 1.0));
    }
}
