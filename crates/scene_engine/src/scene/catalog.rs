//! Scene object catalog
//!
//! The diorama's fixed content: world-space placements, per-object transform
//! recipes, the 50x50 floor grid, and the five transparent window panes.
//! Multiplication order within each recipe is normative; reordering changes
//! the rendered pose. All numeric constants here are tuned placements and
//! must not be retuned.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use std::cmp::Ordering;

/// Bear angular speed in radians per second, about world Z
pub const BEAR_SPIN_SPEED: f32 = 0.45;

/// Platform angular speed in radians per second, about world Y
pub const PLATFORM_SPIN_SPEED: f32 = 0.25;

/// Edge length of one floor tile in world units
pub const FLOOR_TILE_SIZE: f32 = 2.0;

/// Floor grid extent per axis (tiles)
pub const FLOOR_GRID_EXTENT: usize = 50;

/// World-space position of the bear
pub fn bear_position() -> Vec3 {
    Vec3::new(0.0, 1.205, 0.45)
}

/// World-space position of the platform
pub fn platform_position() -> Vec3 {
    Vec3::new(0.0, 0.4321, 0.0)
}

/// World-space position of the pipe
pub fn pipe_position() -> Vec3 {
    Vec3::new(-13.0, 2.0, -13.0)
}

/// Model matrix for the bear
///
/// Translate, scale, fixed tilt, optional spin, then a second translate by
/// the same offset. The trailing translate compounds the placement; the
/// scene is tuned around it, so it stays.
pub fn bear_transform(elapsed: f32, rotation_enabled: bool) -> Mat4 {
    let mut model = Mat4::translation(bear_position())
        * Mat4::uniform_scaling(0.03)
        * Mat4::rotation_axis(3.6, Vec3::new(0.0, 1.0, 1.0));
    if rotation_enabled {
        model *= Mat4::rotation_axis(BEAR_SPIN_SPEED * elapsed, Vec3::new(0.0, 0.0, 1.0));
    }
    model * Mat4::translation(bear_position())
}

/// Model matrix for the rotating platform
pub fn platform_transform(elapsed: f32, rotation_enabled: bool) -> Mat4 {
    let mut model = Mat4::translation(platform_position())
        * Mat4::uniform_scaling(0.12)
        * Mat4::rotation_axis(0.25, Vec3::new(0.0, 1.0, 0.0));
    if rotation_enabled {
        model *= Mat4::rotation_axis(PLATFORM_SPIN_SPEED * elapsed, Vec3::new(0.0, 1.0, 0.0));
    }
    model
}

/// Model matrix for the pipe
///
/// The sub-epsilon scale keeps the pipe loaded but effectively invisible;
/// this is the intended placement, not a bug.
pub fn pipe_transform() -> Mat4 {
    Mat4::scaling(Vec3::new(1e-18, 1e-14, 1e-17))
        * Mat4::translation(pipe_position())
        * Mat4::rotation_axis(1.57, Vec3::new(1.0, 0.0, 0.0))
}

/// Model matrices for every floor tile, row by row
///
/// Exactly [`FLOOR_GRID_EXTENT`]² transforms. Each tile is rotated 270°
/// about X to lie flat, then offset on the grid; adjacent tiles touch with
/// no overlap.
pub fn floor_tile_transforms() -> Vec<Mat4> {
    let half = FLOOR_GRID_EXTENT as f32 / 2.0;
    let first = Vec3::new(-half * FLOOR_TILE_SIZE, -half * FLOOR_TILE_SIZE, 0.0);
    let lie_flat = Mat4::rotation_axis(utils::deg_to_rad(270.0), Vec3::new(1.0, 0.0, 0.0));

    let mut transforms = Vec::with_capacity(FLOOR_GRID_EXTENT * FLOOR_GRID_EXTENT);
    for i in 0..FLOOR_GRID_EXTENT {
        for j in 0..FLOOR_GRID_EXTENT {
            let offset = first
                + Vec3::new(
                    j as f32 * FLOOR_TILE_SIZE,
                    i as f32 * FLOOR_TILE_SIZE,
                    0.0,
                );
            transforms.push(lie_flat * Mat4::translation(offset));
        }
    }
    transforms
}

/// Model matrix for the single large quad used in sky-reflective mode
///
/// Covers the same footprint as the tiled grid.
pub fn reflective_floor_transform() -> Mat4 {
    Mat4::rotation_axis(utils::deg_to_rad(270.0), Vec3::new(1.0, 0.0, 0.0))
        * Mat4::uniform_scaling(FLOOR_GRID_EXTENT as f32 / 2.0 * FLOOR_TILE_SIZE)
}

/// One transparent window pane placement
#[derive(Debug, Clone)]
pub struct TransparentPane {
    /// Pane position in world space
    pub position: Vec3,
    /// Rotation about X in degrees
    pub rotate_x: f32,
    /// Rotation about Y in degrees
    pub rotate_y: f32,
    /// Rotation about Z in degrees
    pub rotate_z: f32,
    /// Uniform scale factor
    pub scale: f32,
}

/// The five fixed window panes
pub fn window_panes() -> Vec<TransparentPane> {
    vec![
        TransparentPane {
            position: Vec3::new(-5.5, 1.723, 5.69),
            rotate_x: 0.0,
            rotate_y: -20.0,
            rotate_z: 0.0,
            scale: 1.2,
        },
        TransparentPane {
            position: Vec3::new(-5.95, 1.723, 7.05),
            rotate_x: 0.0,
            rotate_y: -20.0,
            rotate_z: 0.0,
            scale: 1.2,
        },
        TransparentPane {
            position: Vec3::new(-6.03, 1.723, 6.9),
            rotate_x: 0.0,
            rotate_y: 68.5,
            rotate_z: 0.0,
            scale: 1.2,
        },
        TransparentPane {
            position: Vec3::new(-4.69, 1.723, 7.35),
            rotate_x: 0.0,
            rotate_y: 68.5,
            rotate_z: 0.0,
            scale: 1.2,
        },
        TransparentPane {
            position: Vec3::new(-5.8, 2.352, 6.365),
            rotate_x: 90.0,
            rotate_y: 0.0,
            rotate_z: 20.0,
            scale: 1.4,
        },
    ]
}

/// Model matrix for one window pane
pub fn pane_transform(pane: &TransparentPane) -> Mat4 {
    Mat4::translation(pane.position)
        * Mat4::rotation_axis(utils::deg_to_rad(pane.rotate_x), Vec3::new(1.0, 0.0, 0.0))
        * Mat4::rotation_axis(utils::deg_to_rad(pane.rotate_y), Vec3::new(0.0, 1.0, 0.0))
        * Mat4::rotation_axis(utils::deg_to_rad(pane.rotate_z), Vec3::new(0.0, 0.0, 1.0))
        * Mat4::uniform_scaling(pane.scale)
}

/// View-space depth of a world position (negative in front of the camera)
fn view_space_z(view: &Mat4, position: Vec3) -> f32 {
    (view * position.push(1.0)).z
}

/// Order panes for correct alpha blending: farthest from the camera first
///
/// Sorts by ascending view-space z. Run once per frame before the pane draw
/// loop; the static list order carries no meaning.
pub fn sort_panes_back_to_front(panes: &mut [TransparentPane], view: &Mat4) {
    panes.sort_by(|a, b| {
        view_space_z(view, a.position)
            .partial_cmp(&view_space_z(view, b.position))
            .unwrap_or(Ordering::Equal)
    });
}
