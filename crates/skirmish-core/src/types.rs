//! Core types used throughout Skirmish

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate by the given quaternion
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = rotation * self.rotation;
    }

    /// Rotate this transform around a world-space point.
    ///
    /// Both the position (orbiting the point) and the orientation are
    /// rotated by `angle` radians about `axis`.
    pub fn rotate_around(&mut self, point: Vec3, axis: Vec3, angle: f32) {
        let rotation = Quat::from_axis_angle(axis.normalize(), angle);
        self.position = point + rotation * (self.position - point);
        self.rotation = rotation * self.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotate_around_orbits_point() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        transform.rotate_around(Vec3::ZERO, Vec3::Y, -std::f32::consts::FRAC_PI_2);

        // -90 degrees around Y sends +X to +Z
        assert!(transform.position.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn test_rotate_around_keeps_distance() {
        let pivot = Vec3::new(2.0, 1.0, -3.0);
        let mut transform = Transform::from_position(Vec3::new(3.5, 1.0, -3.0));
        let before = (transform.position - pivot).length();

        transform.rotate_around(pivot, Vec3::Y, -45f32.to_radians());

        let after = (transform.position - pivot).length();
        assert!((before - after).abs() < 1e-5);
        assert_eq!(transform.position.y, 1.0);
    }
}
