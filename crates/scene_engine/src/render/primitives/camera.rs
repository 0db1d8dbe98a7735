//! # First-Person Fly Camera
//!
//! Converts keyboard and mouse deltas into a view transform. Orientation is
//! tracked as Euler yaw/pitch with derived front/right/up vectors; the view
//! matrix comes from a standard right-handed look-at.
//!
//! ## Coordinate System
//! Right-handed Y-up world space. The default orientation (yaw -90°,
//! pitch 0°) looks down -Z.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Directions for keyboard-driven camera translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along the facing direction
    Forward,
    /// Against the facing direction
    Backward,
    /// Along the negative right vector
    Left,
    /// Along the right vector
    Right,
}

/// Default yaw in degrees (looking down -Z)
const DEFAULT_YAW: f32 = -90.0;
/// Default pitch in degrees
const DEFAULT_PITCH: f32 = 0.0;
/// Default movement speed in world units per second
const DEFAULT_SPEED: f32 = 7.0;
/// Default mouse sensitivity
const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Default zoom (vertical field of view) in degrees
const DEFAULT_ZOOM: f32 = 45.0;

/// Free-flying first-person camera
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Facing direction (unit vector, derived from yaw/pitch)
    pub front: Vec3,
    /// Camera-space up vector (derived)
    pub up: Vec3,
    /// Camera-space right vector (derived)
    pub right: Vec3,
    /// World up vector used for orthonormalization
    pub world_up: Vec3,
    /// Yaw angle in degrees
    pub yaw: f32,
    /// Pitch angle in degrees, clamped to (-90°, 90°)
    pub pitch: f32,
    /// Keyboard translation speed in world units per second
    pub movement_speed: f32,
    /// Mouse look sensitivity
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees, driven by the scroll wheel
    pub zoom: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl FlyCamera {
    /// Create a camera at the given position with default orientation
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            world_up: Vec3::new(0.0, 1.0, 0.0),
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    /// Generate the view matrix for the current position and orientation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Apply keyboard-driven translation for one frame
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a mouse-look delta in screen units
    ///
    /// Pitch is clamped to ±89° so the view never flips over the pole.
    pub fn process_mouse(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = utils::clamp(self.pitch, -89.0, 89.0);
        self.update_vectors();
    }

    /// Apply a scroll-wheel zoom delta
    ///
    /// Zoom (the projection's vertical field of view) stays within [1°, 45°].
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.zoom = utils::clamp(self.zoom - y_offset, 1.0, 45.0);
    }

    /// Point the camera along an arbitrary facing vector
    ///
    /// Recovers yaw/pitch from the vector so subsequent mouse look continues
    /// smoothly. Used when restoring a persisted camera.
    pub fn set_facing(&mut self, front: Vec3) {
        if front.norm() <= f32::EPSILON {
            log::warn!("Ignoring zero-length camera facing vector");
            return;
        }
        let front = front.normalize();
        self.pitch = utils::rad_to_deg(front.y.asin());
        self.yaw = utils::rad_to_deg(front.z.atan2(front.x));
        self.update_vectors();
    }

    /// Recompute front/right/up from yaw and pitch
    fn update_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = FlyCamera::default();
        assert_relative_eq!(camera.front.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.front.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.front.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn keyboard_moves_along_derived_axes() {
        let mut camera = FlyCamera::new(Vec3::zeros());
        camera.movement_speed = 2.0;
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert_relative_eq!(camera.position.z, -1.0, epsilon = 1e-6);

        camera.process_keyboard(CameraMovement::Right, 0.5);
        assert_relative_eq!(camera.position.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        camera.process_mouse(0.0, 10_000.0);
        assert_relative_eq!(camera.pitch, 89.0);
        camera.process_mouse(0.0, -100_000.0);
        assert_relative_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut camera = FlyCamera::default();
        camera.process_scroll(100.0);
        assert_relative_eq!(camera.zoom, 1.0);
        camera.process_scroll(-100.0);
        assert_relative_eq!(camera.zoom, 45.0);
    }

    #[test]
    fn set_facing_round_trips_through_euler_angles() {
        let mut camera = FlyCamera::default();
        let target = Vec3::new(0.3, 0.5, -0.8).normalize();
        camera.set_facing(target);
        assert_relative_eq!(camera.front.x, target.x, epsilon = 1e-5);
        assert_relative_eq!(camera.front.y, target.y, epsilon = 1e-5);
        assert_relative_eq!(camera.front.z, target.z, epsilon = 1e-5);
    }

    #[test]
    fn set_facing_ignores_zero_vector() {
        let mut camera = FlyCamera::default();
        let before = camera.front;
        camera.set_facing(Vec3::zeros());
        assert_eq!(camera.front, before);
    }
}
