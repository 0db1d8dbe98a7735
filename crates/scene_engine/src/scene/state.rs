//! Application state
//!
//! One struct holds everything the input handlers and the frame sequencer
//! share: the camera, the clear color, and the render toggles. It is passed
//! by reference wherever it is needed; there are no process-wide statics.

use crate::foundation::math::Vec3;
use crate::render::primitives::FlyCamera;

/// Shared render and input state for the running application
#[derive(Debug, Clone)]
pub struct AppState {
    /// Background clear color
    pub clear_color: Vec3,
    /// Whether the debug overlay is shown
    pub overlay_enabled: bool,
    /// Whether mouse movement drives the camera (off while the overlay owns
    /// the cursor)
    pub mouse_look_enabled: bool,
    /// The free-flying camera
    pub camera: FlyCamera,
    /// Normal mapping on the platform, pipe, and floor
    pub normal_mapping: bool,
    /// Parallax mapping on the floor
    pub parallax_mapping: bool,
    /// Parallax height scale
    pub height_scale: f32,
    /// Sky-reflective mode: platform and floor sample the skybox cubemap
    /// instead of their own textures
    pub sky_reflective: bool,
    /// Continuous rotation of the bear and platform
    pub rotation_enabled: bool,
    /// Cull front faces instead of back faces
    pub cull_front: bool,
    /// Blinn-Phong specular term in the primary program
    pub blinn: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            clear_color: Vec3::zeros(),
            overlay_enabled: false,
            mouse_look_enabled: true,
            camera: FlyCamera::new(Vec3::zeros()),
            normal_mapping: false,
            parallax_mapping: false,
            height_scale: 0.05,
            sky_reflective: false,
            rotation_enabled: true,
            cull_front: false,
            blinn: true,
        }
    }
}

impl AppState {
    /// Flip the overlay and hand the cursor over accordingly
    ///
    /// While the overlay is up the cursor is free and mouse look pauses;
    /// closing it recaptures the cursor.
    pub fn toggle_overlay(&mut self) {
        self.overlay_enabled = !self.overlay_enabled;
        self.mouse_look_enabled = !self.overlay_enabled;
    }

    /// Flip sky-reflective mode for the platform and floor
    pub fn toggle_sky_reflective(&mut self) {
        self.sky_reflective = !self.sky_reflective;
    }

    /// Flip continuous rotation of the bear and platform
    pub fn toggle_rotation(&mut self) {
        self.rotation_enabled = !self.rotation_enabled;
    }

    /// Flip between front- and back-face culling
    pub fn toggle_cull_front(&mut self) {
        self.cull_front = !self.cull_front;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_tuning() {
        let state = AppState::default();
        assert!(!state.overlay_enabled);
        assert!(state.mouse_look_enabled);
        assert!(!state.sky_reflective);
        assert!(state.rotation_enabled);
        assert!(state.blinn);
        assert_eq!(state.height_scale, 0.05);
    }

    #[test]
    fn toggles_are_idempotent_in_pairs() {
        let mut state = AppState::default();
        let original = (
            state.overlay_enabled,
            state.mouse_look_enabled,
            state.sky_reflective,
            state.rotation_enabled,
            state.cull_front,
        );

        state.toggle_overlay();
        state.toggle_overlay();
        state.toggle_sky_reflective();
        state.toggle_sky_reflective();
        state.toggle_rotation();
        state.toggle_rotation();
        state.toggle_cull_front();
        state.toggle_cull_front();

        assert_eq!(
            original,
            (
                state.overlay_enabled,
                state.mouse_look_enabled,
                state.sky_reflective,
                state.rotation_enabled,
                state.cull_front,
            )
        );
    }

    #[test]
    fn overlay_owns_the_cursor() {
        let mut state = AppState::default();
        state.toggle_overlay();
        assert!(state.overlay_enabled);
        assert!(!state.mouse_look_enabled);
        state.toggle_overlay();
        assert!(state.mouse_look_enabled);
    }
}
