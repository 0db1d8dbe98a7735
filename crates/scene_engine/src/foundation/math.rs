//! Math utilities and types
//!
//! Provides fundamental math types for 3D scene composition, re-exported
//! from nalgebra with the matrix constructors the renderer needs.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }
}

/// Extension trait for Mat4 with the constructors used by scene composition
pub trait Mat4Ext {
    /// Create a translation matrix
    fn translation(offset: Vec3) -> Mat4;

    /// Create a non-uniform scaling matrix
    fn scaling(factors: Vec3) -> Mat4;

    /// Create a uniform scaling matrix
    fn uniform_scaling(factor: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary axis
    ///
    /// The axis is normalized internally; callers may pass any nonzero vector.
    fn rotation_axis(angle: f32, axis: Vec3) -> Mat4;

    /// Create a right-handed perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Strip the translation column, keeping only the rotation block
    ///
    /// Used for skybox rendering, where the view matrix must follow the
    /// camera's orientation but never its position.
    fn rotation_only(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translation(offset: Vec3) -> Mat4 {
        Mat4::new_translation(&offset)
    }

    fn scaling(factors: Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(&factors)
    }

    fn uniform_scaling(factor: f32) -> Mat4 {
        Mat4::new_scaling(factor)
    }

    fn rotation_axis(angle: f32, axis: Vec3) -> Mat4 {
        Mat4::from_axis_angle(&Unit::new_normalize(axis), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&eye.into(), &target.into(), &up)
    }

    fn rotation_only(&self) -> Mat4 {
        let rotation: Mat3 = self.fixed_view::<3, 3>(0, 0).into_owned();
        rotation.to_homogeneous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transform_composition_order_matters() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let scale = Vec3::new(2.0, 2.0, 2.0);
        let angle = 0.7;
        let axis = Vec3::new(0.0, 0.0, 1.0);

        let composed = Mat4::translation(position) * Mat4::scaling(scale) * Mat4::rotation_axis(angle, axis);
        let reordered = Mat4::rotation_axis(angle, axis) * Mat4::scaling(scale) * Mat4::translation(position);

        // Off-origin translation with a nonzero rotation must not commute.
        assert!((composed - reordered).abs().sum() > 1e-3);

        // The composed matrix carries the translation untouched.
        assert_relative_eq!(composed[(0, 3)], 1.0);
        assert_relative_eq!(composed[(1, 3)], 2.0);
        assert_relative_eq!(composed[(2, 3)], 3.0);
    }

    #[test]
    fn rotation_axis_normalizes_input() {
        let from_unit = Mat4::rotation_axis(1.1, Vec3::new(0.0, 1.0, 0.0));
        let from_scaled = Mat4::rotation_axis(1.1, Vec3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(from_unit, from_scaled, epsilon = 1e-6);
    }

    #[test]
    fn rotation_only_strips_translation() {
        let view = Mat4::look_at(
            Vec3::new(4.0, 2.0, 9.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let stripped = view.rotation_only();

        assert_relative_eq!(stripped[(0, 3)], 0.0);
        assert_relative_eq!(stripped[(1, 3)], 0.0);
        assert_relative_eq!(stripped[(2, 3)], 0.0);
        // The rotation block is untouched.
        assert_relative_eq!(stripped[(0, 0)], view[(0, 0)]);
        assert_relative_eq!(stripped[(2, 1)], view[(2, 1)]);
    }
}
