//! Lighting system
//!
//! Parameter sets for the three light kinds and the rig that aggregates
//! them. All default values are tuned for the diorama's look and must not
//! be retuned; clamping colors to [0, 1] is acceptable, changing the
//! numbers is not.

use crate::foundation::math::{utils, Vec3};
use bitflags::bitflags;

bitflags! {
    /// Which light kinds the shading program should evaluate this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LightMask: u32 {
        /// The directional sun light
        const DIRECTIONAL = 1 << 0;
        /// The single point light
        const POINT = 1 << 1;
        /// The anchored spotlights
        const SPOT = 1 << 2;
    }
}

/// Directional light (like sunlight)
///
/// One instance; immutable after setup.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Light direction in world space
    pub direction: Vec3,
    /// Ambient color term
    pub ambient: Vec3,
    /// Diffuse color term
    pub diffuse: Vec3,
    /// Specular color term
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.07, 0.08, -1.0),
            ambient: Vec3::new(0.08, 0.08, 0.08),
            diffuse: Vec3::new(0.3, 0.3, 0.3),
            specular: Vec3::new(0.4, 0.4, 0.4),
        }
    }
}

/// Point light (like a lightbulb)
#[derive(Debug, Clone)]
pub struct PointLight {
    /// Light position in world space
    pub position: Vec3,
    /// Constant attenuation coefficient
    pub constant: f32,
    /// Linear attenuation coefficient
    pub linear: f32,
    /// Quadratic attenuation coefficient
    pub quadratic: f32,
    /// Ambient color term
    pub ambient: Vec3,
    /// Diffuse color term
    pub diffuse: Vec3,
    /// Specular color term
    pub specular: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(-9.0, 13.0, 5.0),
            constant: 1.0,
            linear: 0.08,
            quadratic: 0.006,
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(0.7, 0.7, 0.7),
            specular: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Spot light aimed at a target from an anchor position
///
/// A single template instance is broadcast from several fixed anchors per
/// frame: [`SpotLight::aim`] overwrites position and direction before each
/// use, so neither field is stable across a frame.
#[derive(Debug, Clone)]
pub struct SpotLight {
    /// Light position in world space (overwritten per anchor)
    pub position: Vec3,
    /// Light direction (derived; overwritten per anchor)
    pub direction: Vec3,
    /// Cosine of the inner cone angle
    pub cut_off: f32,
    /// Cosine of the outer cone angle
    pub outer_cut_off: f32,
    /// Constant attenuation coefficient
    pub constant: f32,
    /// Linear attenuation coefficient
    pub linear: f32,
    /// Quadratic attenuation coefficient
    pub quadratic: f32,
    /// Ambient color term
    pub ambient: Vec3,
    /// Diffuse color term
    pub diffuse: Vec3,
    /// Specular color term
    pub specular: Vec3,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 4.0, 0.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            cut_off: utils::deg_to_rad(30.5).cos(),
            outer_cut_off: utils::deg_to_rad(45.0).cos(),
            constant: 1.0,
            linear: 0.045,
            quadratic: 0.0005,
            ambient: Vec3::new(0.0, 0.0, 0.0),
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl SpotLight {
    /// Retarget the spotlight: place it at `from`, aiming at `target`
    ///
    /// Overwrites both position and direction. The direction is the unit
    /// vector from the anchor to the target.
    pub fn aim(&mut self, from: Vec3, target: Vec3) {
        self.position = from;
        self.direction = (target - from).normalize();
    }
}

/// The scene's complete lighting parameter set
///
/// Exactly one instance of each light kind, plus the four fixed world-space
/// anchors the spotlight template is broadcast from.
#[derive(Debug, Clone, Default)]
pub struct LightingRig {
    /// The directional light
    pub directional: DirectionalLight,
    /// The point light
    pub point: PointLight,
    /// The spotlight template (mutated per anchor each frame)
    pub spot: SpotLight,
    /// Fixed spotlight anchor positions
    pub spot_anchors: [Vec3; 4],
}

impl LightingRig {
    /// Create the rig with the diorama's tuned light set
    pub fn new() -> Self {
        Self {
            directional: DirectionalLight::default(),
            point: PointLight::default(),
            spot: SpotLight::default(),
            spot_anchors: Self::default_anchors(),
        }
    }

    fn default_anchors() -> [Vec3; 4] {
        [
            Vec3::new(5.0, 5.0, -5.0),
            Vec3::new(-5.0, 5.0, 5.0),
            Vec3::new(-5.0, 5.0, -5.0),
            Vec3::new(5.0, 5.0, 5.0),
        ]
    }
}
