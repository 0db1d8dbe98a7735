//! Command-recording render device
//!
//! Implements the device seam by recording every call into an inspectable
//! command stream instead of touching a GPU. The frame sequencer runs
//! against it unchanged, which makes the whole per-frame ordering observable
//! in tests; a hardware device replaces it at the same trait.

use crate::assets::image_loader::{CubemapData, ImageData};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::{
    CullMode, DepthCompare, MeshHandle, ProgramId, RenderDevice, TextureHandle,
};
use crate::render::primitives::{MeshData, QuadVertex};
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use std::collections::HashMap;

new_key_type! {
    struct MeshKey;
    struct TextureKey;
}

/// Stored mesh metadata
#[derive(Debug, Clone)]
struct MeshRecord {
    vertex_count: usize,
    triangle_count: usize,
}

/// Stored texture metadata
#[derive(Debug, Clone)]
struct TextureRecord {
    width: u32,
    height: u32,
    is_cubemap: bool,
}

/// A uniform value captured at upload time
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Boolean uniform
    Bool(bool),
    /// Integer uniform
    Int(i32),
    /// Float uniform
    Float(f32),
    /// vec3 uniform
    Vec3(Vec3),
    /// mat4 uniform
    Mat4(Mat4),
}

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// Frame start with the clear color
    BeginFrame {
        /// RGB clear color
        clear_color: Vec3,
    },
    /// Face culling state change
    SetCullMode(CullMode),
    /// Depth comparison change
    SetDepthCompare(DepthCompare),
    /// Program activation
    UseProgram(ProgramId),
    /// Uniform upload to the program bound at the time
    SetUniform {
        /// Program the value went to
        program: ProgramId,
        /// Uniform name as the shader sees it
        name: String,
        /// Captured value
        value: UniformValue,
    },
    /// 2D texture bind
    BindTexture {
        /// Texture unit
        unit: u32,
        /// Bound handle
        texture: TextureHandle,
    },
    /// Cubemap bind
    BindCubemap {
        /// Texture unit
        unit: u32,
        /// Bound handle
        texture: TextureHandle,
    },
    /// Draw call that reached the rasterizer
    Draw {
        /// Program bound at draw time
        program: ProgramId,
        /// Mesh drawn
        mesh: MeshHandle,
    },
    /// Draw call skipped because its handle was invalid or unknown
    SkippedDraw {
        /// The offending handle
        mesh: MeshHandle,
    },
    /// Frame end
    EndFrame,
}

/// Recording implementation of [`RenderDevice`]
///
/// Tracks resource tables, the bound program, per-program uniform values,
/// bound textures, and depth/cull state, and appends every call to a command
/// list. Query helpers expose all of it.
pub struct HeadlessDevice {
    meshes: SlotMap<MeshKey, MeshRecord>,
    textures: SlotMap<TextureKey, TextureRecord>,
    commands: Vec<DeviceCommand>,
    current_program: Option<ProgramId>,
    uniforms: HashMap<(ProgramId, String), UniformValue>,
    bound_textures: HashMap<u32, TextureHandle>,
    cull_mode: CullMode,
    depth_compare: DepthCompare,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    /// Create an empty device
    pub fn new() -> Self {
        Self {
            meshes: SlotMap::with_key(),
            textures: SlotMap::with_key(),
            commands: Vec::new(),
            current_program: None,
            uniforms: HashMap::new(),
            bound_textures: HashMap::new(),
            cull_mode: CullMode::Back,
            depth_compare: DepthCompare::Less,
        }
    }

    fn mesh_key(handle: MeshHandle) -> MeshKey {
        KeyData::from_ffi(handle.0).into()
    }

    fn record_uniform(&mut self, name: &str, value: UniformValue) {
        let Some(program) = self.current_program else {
            log::warn!("Uniform {:?} set with no program bound, dropped", name);
            return;
        };
        self.uniforms
            .insert((program, name.to_string()), value.clone());
        self.commands.push(DeviceCommand::SetUniform {
            program,
            name: name.to_string(),
            value,
        });
    }

    /// The full command stream recorded so far
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drop the recorded commands, keeping resources and state
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of draw calls that reached the rasterizer
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::Draw { .. }))
            .count()
    }

    /// Number of draw calls issued with a given program
    pub fn draws_with_program(&self, program: ProgramId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::Draw { program: p, .. } if *p == program))
            .count()
    }

    /// Number of draws skipped for invalid handles
    pub fn skipped_draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::SkippedDraw { .. }))
            .count()
    }

    /// Last value uploaded to a uniform of a program, if any
    pub fn uniform(&self, program: ProgramId, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(&(program, name.to_string()))
    }

    /// Last integer uploaded to a uniform
    pub fn uniform_int(&self, program: ProgramId, name: &str) -> Option<i32> {
        match self.uniform(program, name) {
            Some(UniformValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Last bool uploaded to a uniform
    pub fn uniform_bool(&self, program: ProgramId, name: &str) -> Option<bool> {
        match self.uniform(program, name) {
            Some(UniformValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Last float uploaded to a uniform
    pub fn uniform_float(&self, program: ProgramId, name: &str) -> Option<f32> {
        match self.uniform(program, name) {
            Some(UniformValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Last vec3 uploaded to a uniform
    pub fn uniform_vec3(&self, program: ProgramId, name: &str) -> Option<Vec3> {
        match self.uniform(program, name) {
            Some(UniformValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    /// Last mat4 uploaded to a uniform
    pub fn uniform_mat4(&self, program: ProgramId, name: &str) -> Option<Mat4> {
        match self.uniform(program, name) {
            Some(UniformValue::Mat4(v)) => Some(*v),
            _ => None,
        }
    }

    /// Handle currently bound to a texture unit
    pub fn bound_texture(&self, unit: u32) -> Option<TextureHandle> {
        self.bound_textures.get(&unit).copied()
    }

    /// The program bound right now
    pub fn current_program(&self) -> Option<ProgramId> {
        self.current_program
    }

    /// Current face culling state
    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    /// Current depth comparison function
    pub fn depth_compare(&self) -> DepthCompare {
        self.depth_compare
    }

    /// Number of meshes uploaded
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of textures and cubemaps uploaded
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Vertex and triangle counts of an uploaded mesh
    pub fn mesh_size(&self, mesh: MeshHandle) -> Option<(usize, usize)> {
        self.meshes
            .get(Self::mesh_key(mesh))
            .map(|r| (r.vertex_count, r.triangle_count))
    }

    /// Dimensions and cubemap-ness of an uploaded texture
    pub fn texture_info(&self, texture: TextureHandle) -> Option<(u32, u32, bool)> {
        self.textures
            .get(KeyData::from_ffi(texture.0).into())
            .map(|r: &TextureRecord| (r.width, r.height, r.is_cubemap))
    }
}

impl RenderDevice for HeadlessDevice {
    fn create_mesh(&mut self, data: &MeshData) -> MeshHandle {
        let key = self.meshes.insert(MeshRecord {
            vertex_count: data.vertices.len(),
            triangle_count: data.triangle_count(),
        });
        MeshHandle(key.data().as_ffi())
    }

    fn create_quad(&mut self, vertices: &[QuadVertex; 6]) -> MeshHandle {
        // The quad's byte view is what a GPU device would upload.
        debug_assert_eq!(
            bytemuck::cast_slice::<QuadVertex, u8>(vertices).len(),
            6 * 14 * std::mem::size_of::<f32>()
        );
        let key = self.meshes.insert(MeshRecord {
            vertex_count: vertices.len(),
            triangle_count: 2,
        });
        MeshHandle(key.data().as_ffi())
    }

    fn create_texture(&mut self, image: &ImageData) -> TextureHandle {
        let key = self.textures.insert(TextureRecord {
            width: image.width,
            height: image.height,
            is_cubemap: false,
        });
        TextureHandle(key.data().as_ffi())
    }

    fn create_cubemap(&mut self, cubemap: &CubemapData) -> TextureHandle {
        let (width, height) = cubemap.face_size();
        let key = self.textures.insert(TextureRecord {
            width,
            height,
            is_cubemap: true,
        });
        TextureHandle(key.data().as_ffi())
    }

    fn begin_frame(&mut self, clear_color: Vec3) {
        self.commands.push(DeviceCommand::BeginFrame { clear_color });
    }

    fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
        self.commands.push(DeviceCommand::SetCullMode(mode));
    }

    fn set_depth_compare(&mut self, compare: DepthCompare) {
        self.depth_compare = compare;
        self.commands.push(DeviceCommand::SetDepthCompare(compare));
    }

    fn use_program(&mut self, program: ProgramId) {
        self.current_program = Some(program);
        self.commands.push(DeviceCommand::UseProgram(program));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record_uniform(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record_uniform(name, UniformValue::Int(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record_uniform(name, UniformValue::Float(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.record_uniform(name, UniformValue::Vec3(value));
    }

    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.record_uniform(name, UniformValue::Mat4(*value));
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        self.bound_textures.insert(unit, texture);
        self.commands
            .push(DeviceCommand::BindTexture { unit, texture });
    }

    fn bind_cubemap(&mut self, unit: u32, texture: TextureHandle) {
        self.bound_textures.insert(unit, texture);
        self.commands
            .push(DeviceCommand::BindCubemap { unit, texture });
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        if !mesh.is_valid() || !self.meshes.contains_key(Self::mesh_key(mesh)) {
            self.commands.push(DeviceCommand::SkippedDraw { mesh });
            return;
        }
        let Some(program) = self.current_program else {
            log::warn!("Draw issued with no program bound, skipped");
            self.commands.push(DeviceCommand::SkippedDraw { mesh });
            return;
        };
        self.commands.push(DeviceCommand::Draw { program, mesh });
    }

    fn end_frame(&mut self) {
        self.commands.push(DeviceCommand::EndFrame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitives::unit_quad;

    fn device_with_mesh() -> (HeadlessDevice, MeshHandle) {
        let mut device = HeadlessDevice::new();
        let mesh = device.create_mesh(&MeshData::skybox_cube());
        (device, mesh)
    }

    #[test]
    fn created_handles_are_valid_and_distinct() {
        let mut device = HeadlessDevice::new();
        let a = device.create_mesh(&MeshData::skybox_cube());
        let b = device.create_quad(&unit_quad().unwrap());
        assert!(a.is_valid());
        assert!(b.is_valid());
        assert_ne!(a, b);
        assert_eq!(device.mesh_count(), 2);
        assert_eq!(device.mesh_size(a), Some((36, 12)));
        assert_eq!(device.mesh_size(b), Some((6, 2)));
        assert_eq!(device.mesh_size(MeshHandle::INVALID), None);
    }

    #[test]
    fn uniforms_are_tracked_per_program() {
        let mut device = HeadlessDevice::new();
        device.use_program(ProgramId::Scene);
        device.set_float("transparency", 1.0);
        device.use_program(ProgramId::Skybox);
        device.set_float("transparency", 0.25);

        assert_eq!(device.uniform_float(ProgramId::Scene, "transparency"), Some(1.0));
        assert_eq!(device.uniform_float(ProgramId::Skybox, "transparency"), Some(0.25));
    }

    #[test]
    fn uniform_without_program_is_dropped() {
        let mut device = HeadlessDevice::new();
        device.set_int("skybox", 0);
        assert!(device.commands().is_empty());
    }

    #[test]
    fn invalid_draw_is_a_recorded_no_op() {
        let (mut device, mesh) = device_with_mesh();
        device.use_program(ProgramId::Scene);
        device.draw_mesh(MeshHandle::INVALID);
        device.draw_mesh(mesh);

        assert_eq!(device.draw_count(), 1);
        assert_eq!(device.skipped_draw_count(), 1);
    }

    #[test]
    fn unknown_handle_is_skipped() {
        let (mut device, _) = device_with_mesh();
        device.use_program(ProgramId::Scene);
        device.draw_mesh(MeshHandle(0xdead_beef));
        assert_eq!(device.draw_count(), 0);
        assert_eq!(device.skipped_draw_count(), 1);
    }

    #[test]
    fn state_queries_follow_the_latest_calls() {
        let (mut device, _) = device_with_mesh();
        device.set_cull_mode(CullMode::Front);
        device.set_depth_compare(DepthCompare::LessOrEqual);
        let texture = device.create_texture(&ImageData::solid_color(2, 2, [0, 0, 0, 255]));
        device.bind_texture(3, texture);

        assert_eq!(device.cull_mode(), CullMode::Front);
        assert_eq!(device.depth_compare(), DepthCompare::LessOrEqual);
        assert_eq!(device.bound_texture(3), Some(texture));
        assert_eq!(device.bound_texture(0), None);
        assert_eq!(device.texture_info(texture), Some((2, 2, false)));
    }
}
