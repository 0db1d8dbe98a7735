//! Device abstraction for the rendering system
//!
//! This module defines the trait a rendering device must implement to serve
//! the frame sequencer: resource creation, program selection, uniform upload,
//! and draw submission. Everything GPU-specific lives behind it.

use crate::assets::image_loader::{CubemapData, ImageData};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::primitives::{MeshData, QuadVertex};

/// Handle to a mesh resource stored in the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

impl MeshHandle {
    /// The invalid handle, produced when a model fails to load
    ///
    /// Drawing it is a no-op at the device; rendering degrades but never
    /// aborts.
    pub const INVALID: Self = Self(0);

    /// Whether this handle refers to an uploaded mesh
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Handle to a 2D texture or cubemap resource stored in the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

impl TextureHandle {
    /// The invalid handle, produced when a texture fails to load
    pub const INVALID: Self = Self(0);

    /// Whether this handle refers to an uploaded texture
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Face culling state for the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// Cull back faces (the default for closed meshes)
    Back,
    /// Cull front faces
    Front,
    /// No culling; needed for double-sided and enclosing geometry
    Disabled,
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCompare {
    /// Standard strict comparison
    Less,
    /// Relaxed comparison used while the skybox draws at maximum depth
    LessOrEqual,
}

/// The three shading programs the sequencer switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramId {
    /// Primary lit program: models, floor tiles, transparent panes
    Scene,
    /// Cubemap-sampling program for sky-reflective surfaces
    Reflective,
    /// Skybox program drawn behind all real geometry
    Skybox,
}

/// Main rendering device trait
///
/// Uniform setters apply to the currently bound program and are assumed to
/// succeed whenever the name exists in it; they return nothing. Draw calls
/// with [`MeshHandle::INVALID`] are silently skipped.
pub trait RenderDevice {
    /// Upload a triangle mesh and return its handle
    fn create_mesh(&mut self, data: &MeshData) -> MeshHandle;

    /// Upload a six-vertex tangent-space quad and return its handle
    fn create_quad(&mut self, vertices: &[QuadVertex; 6]) -> MeshHandle;

    /// Upload a 2D texture and return its handle
    fn create_texture(&mut self, image: &ImageData) -> TextureHandle;

    /// Upload a six-face cubemap and return its handle
    fn create_cubemap(&mut self, cubemap: &CubemapData) -> TextureHandle;

    /// Clear the color and depth buffers and start a new frame
    fn begin_frame(&mut self, clear_color: Vec3);

    /// Set the rasterizer's face culling state
    fn set_cull_mode(&mut self, mode: CullMode);

    /// Set the depth comparison function
    fn set_depth_compare(&mut self, compare: DepthCompare);

    /// Activate a shading program; subsequent uniform sets target it
    fn use_program(&mut self, program: ProgramId);

    /// Upload a boolean uniform to the bound program
    fn set_bool(&mut self, name: &str, value: bool);

    /// Upload an integer uniform to the bound program
    fn set_int(&mut self, name: &str, value: i32);

    /// Upload a float uniform to the bound program
    fn set_float(&mut self, name: &str, value: f32);

    /// Upload a vec3 uniform to the bound program
    fn set_vec3(&mut self, name: &str, value: Vec3);

    /// Upload a mat4 uniform to the bound program
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Bind a 2D texture to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: TextureHandle);

    /// Bind a cubemap to a texture unit
    fn bind_cubemap(&mut self, unit: u32, texture: TextureHandle);

    /// Draw a mesh with the bound program and current state
    fn draw_mesh(&mut self, mesh: MeshHandle);

    /// Finish the frame
    fn end_frame(&mut self);
}
