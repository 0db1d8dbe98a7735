//! Per-frame render sequencer
//!
//! Turns the scene catalog, the lighting rig, and the application state into
//! an ordered stream of device calls, the same order every frame: opaque
//! models, the tiled or reflective floor, the skybox drawn last-but-behind,
//! and finally the transparent window panes back-to-front.

use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::render::api::{
    CullMode, DepthCompare, MeshHandle, ProgramId, RenderDevice, TextureHandle,
};
use crate::render::lighting::{LightMask, LightingRig};
use crate::render::uniforms;
use crate::scene::catalog::{self, TransparentPane};
use crate::scene::state::AppState;

/// Device handles for everything the diorama draws
///
/// Any handle may be [`MeshHandle::INVALID`] / [`TextureHandle::INVALID`]
/// after a failed load; the sequencer issues the calls regardless and the
/// device skips them.
#[derive(Debug, Clone, Copy)]
pub struct SceneAssets {
    /// The circus bear model
    pub bear: MeshHandle,
    /// The rotating platform model
    pub platform: MeshHandle,
    /// The pipe model
    pub pipe: MeshHandle,
    /// The tangent-space floor quad
    pub floor_quad: MeshHandle,
    /// The skybox cube
    pub skybox: MeshHandle,
    /// The window pane quad
    pub pane: MeshHandle,
    /// Platform diffuse map
    pub platform_diffuse: TextureHandle,
    /// Platform specular map
    pub platform_specular: TextureHandle,
    /// Platform normal map
    pub platform_normal: TextureHandle,
    /// Floor diffuse map
    pub floor_diffuse: TextureHandle,
    /// Floor specular map
    pub floor_specular: TextureHandle,
    /// Floor normal map
    pub floor_normal: TextureHandle,
    /// Floor height map for parallax
    pub floor_height: TextureHandle,
    /// Window glass texture
    pub window: TextureHandle,
    /// Six-face sky cubemap
    pub skybox_cubemap: TextureHandle,
}

/// The frame sequencer
///
/// Owns the uploaded handles, the lighting rig, the pane list, and the
/// projection parameters. [`SceneRenderer::prepare`] runs the one-time
/// program setup; [`SceneRenderer::render_frame`] draws one frame.
pub struct SceneRenderer {
    assets: SceneAssets,
    lighting: LightingRig,
    panes: Vec<TransparentPane>,
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,
}

impl SceneRenderer {
    /// Create a sequencer over uploaded assets
    pub fn new(assets: SceneAssets, aspect_ratio: f32, near_plane: f32, far_plane: f32) -> Self {
        Self {
            assets,
            lighting: LightingRig::new(),
            panes: catalog::window_panes(),
            aspect_ratio,
            near_plane,
            far_plane,
        }
    }

    /// Update the projection aspect ratio after a window resize
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// One-time program setup
    ///
    /// Points the cubemap samplers at unit 0 and uploads the Blinn toggle.
    /// Run once after the programs exist, before the first frame.
    pub fn prepare(&self, device: &mut dyn RenderDevice, state: &AppState) {
        device.use_program(ProgramId::Skybox);
        device.set_int("skybox", 0);
        device.use_program(ProgramId::Reflective);
        device.set_int("skybox", 0);
        device.use_program(ProgramId::Scene);
        device.set_bool("blinn", state.blinn);
    }

    /// Draw one frame
    ///
    /// `elapsed` is total time since startup in seconds, driving the
    /// continuous rotations.
    pub fn render_frame(&mut self, device: &mut dyn RenderDevice, state: &AppState, elapsed: f32) {
        device.begin_frame(state.clear_color);
        device.set_cull_mode(if state.cull_front {
            CullMode::Front
        } else {
            CullMode::Back
        });

        let projection = Mat4::perspective(
            utils::deg_to_rad(state.camera.zoom),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        );
        let view = state.camera.view_matrix();

        self.draw_bear(device, state, &projection, &view, elapsed);
        self.upload_reflective_globals(device, state, &projection, &view);
        self.draw_platform(device, state, elapsed);
        self.draw_pipe(device, state);

        // Floor and skybox are double-sided / enclosing.
        device.set_cull_mode(CullMode::Disabled);
        self.draw_floor(device, state);
        self.draw_skybox(device, &projection, &view);
        self.draw_window_panes(device, &view);

        device.end_frame();
    }

    /// Bear draw plus the full per-frame lighting upload
    fn draw_bear(
        &mut self,
        device: &mut dyn RenderDevice,
        state: &AppState,
        projection: &Mat4,
        view: &Mat4,
        elapsed: f32,
    ) {
        device.use_program(ProgramId::Scene);
        device.set_float("transparency", 1.0);
        // The point light's parameters are uploaded below, but its presence
        // flag stays off: the scene is lit by the sun and the spot anchors.
        uniforms::set_light_mask(device, LightMask::DIRECTIONAL | LightMask::SPOT);
        device.set_mat4("projection", projection);
        device.set_mat4("view", view);
        device.set_mat4(
            "model",
            &catalog::bear_transform(elapsed, state.rotation_enabled),
        );

        uniforms::set_point_light(device, 0, &self.lighting.point);
        device.set_float("material.shininess", 32.0);
        device.set_vec3("viewPos", state.camera.position);

        // The single spotlight template is broadcast from anchors 1..3,
        // re-aimed at the bear before each upload.
        let target = catalog::bear_position();
        for slot in 1..4 {
            let anchor = self.lighting.spot_anchors[slot];
            self.lighting.spot.aim(anchor, target);
            uniforms::set_spot_light(device, slot, &self.lighting.spot);
        }

        uniforms::set_directional_light(device, &self.lighting.directional);
        device.set_bool("hasNormalMap", false);
        device.draw_mesh(self.assets.bear);
    }

    /// Per-frame globals for the reflective program
    fn upload_reflective_globals(
        &self,
        device: &mut dyn RenderDevice,
        state: &AppState,
        projection: &Mat4,
        view: &Mat4,
    ) {
        device.use_program(ProgramId::Reflective);
        device.set_mat4("projection", projection);
        device.set_mat4("view", view);
        device.set_vec3("cameraPos", state.camera.position);
    }

    fn draw_platform(&self, device: &mut dyn RenderDevice, state: &AppState, elapsed: f32) {
        let model = catalog::platform_transform(elapsed, state.rotation_enabled);
        if state.sky_reflective {
            device.use_program(ProgramId::Reflective);
            device.set_mat4("model", &model);
            device.bind_cubemap(0, self.assets.skybox_cubemap);
            device.draw_mesh(self.assets.platform);
        } else {
            device.bind_texture(0, self.assets.platform_diffuse);
            device.bind_texture(1, self.assets.platform_specular);
            device.bind_texture(2, self.assets.platform_normal);
            device.use_program(ProgramId::Scene);
            device.set_mat4("model", &model);
            device.set_bool("hasNormalMap", state.normal_mapping);
            device.draw_mesh(self.assets.platform);
            device.set_bool("hasNormalMap", false);
        }
    }

    fn draw_pipe(&self, device: &mut dyn RenderDevice, state: &AppState) {
        device.use_program(ProgramId::Scene);
        device.set_mat4("model", &catalog::pipe_transform());
        device.set_bool("hasNormalMap", state.normal_mapping);
        device.draw_mesh(self.assets.pipe);
        device.set_bool("hasNormalMap", false);
    }

    /// The 50x50 tiled floor, or one large reflective quad
    fn draw_floor(&self, device: &mut dyn RenderDevice, state: &AppState) {
        if state.sky_reflective {
            device.use_program(ProgramId::Reflective);
            device.set_mat4("model", &catalog::reflective_floor_transform());
            device.bind_cubemap(0, self.assets.skybox_cubemap);
            device.draw_mesh(self.assets.floor_quad);
            return;
        }

        device.use_program(ProgramId::Scene);
        device.set_int("material.texture_height1", 3);
        device.bind_texture(0, self.assets.floor_diffuse);
        device.bind_texture(1, self.assets.floor_specular);
        device.bind_texture(2, self.assets.floor_normal);
        device.bind_texture(3, self.assets.floor_height);
        device.set_bool("hasNormalMap", state.normal_mapping);
        device.set_bool("hasParallaxMapping", state.parallax_mapping);
        device.set_float("heightScale", state.height_scale);

        for transform in catalog::floor_tile_transforms() {
            device.set_mat4("model", &transform);
            device.draw_mesh(self.assets.floor_quad);
        }

        device.set_bool("hasNormalMap", false);
        device.set_bool("hasParallaxMapping", false);
    }

    /// Skybox, drawn after the opaque pass but always behind it
    ///
    /// Depth compare relaxes to less-or-equal so the cube passes at maximum
    /// depth, and the view matrix drops its translation so the box follows
    /// the camera's orientation only.
    fn draw_skybox(&self, device: &mut dyn RenderDevice, projection: &Mat4, view: &Mat4) {
        device.set_depth_compare(DepthCompare::LessOrEqual);
        device.use_program(ProgramId::Skybox);
        device.set_mat4("view", &view.rotation_only());
        device.set_mat4("projection", projection);
        device.bind_cubemap(0, self.assets.skybox_cubemap);
        device.draw_mesh(self.assets.skybox);
        device.set_depth_compare(DepthCompare::Less);
    }

    /// Transparent panes, farthest from the camera first
    fn draw_window_panes(&mut self, device: &mut dyn RenderDevice, view: &Mat4) {
        device.use_program(ProgramId::Scene);
        device.set_float("transparency", 0.5);
        device.bind_texture(0, self.assets.window);

        catalog::sort_panes_back_to_front(&mut self.panes, view);
        for pane in &self.panes {
            device.set_mat4("model", &catalog::pane_transform(pane));
            device.draw_mesh(self.assets.pane);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::image_loader::{CubemapData, ImageData};
    use crate::foundation::math::Vec3;
    use crate::render::backends::{DeviceCommand, HeadlessDevice, UniformValue};
    use crate::render::primitives::{unit_quad, MeshData};
    use approx::assert_relative_eq;

    fn upload_assets(device: &mut HeadlessDevice) -> SceneAssets {
        let gray = ImageData::solid_color(2, 2, [128, 128, 128, 255]);
        let cubemap = CubemapData {
            faces: [
                gray.clone(),
                gray.clone(),
                gray.clone(),
                gray.clone(),
                gray.clone(),
                gray.clone(),
            ],
        };
        SceneAssets {
            bear: device.create_mesh(&MeshData::skybox_cube()),
            platform: device.create_mesh(&MeshData::skybox_cube()),
            pipe: device.create_mesh(&MeshData::skybox_cube()),
            floor_quad: device.create_quad(&unit_quad().unwrap()),
            skybox: device.create_mesh(&MeshData::skybox_cube()),
            pane: device.create_mesh(&MeshData::window_pane()),
            platform_diffuse: device.create_texture(&gray),
            platform_specular: device.create_texture(&gray),
            platform_normal: device.create_texture(&gray),
            floor_diffuse: device.create_texture(&gray),
            floor_specular: device.create_texture(&gray),
            floor_normal: device.create_texture(&gray),
            floor_height: device.create_texture(&gray),
            window: device.create_texture(&gray),
            skybox_cubemap: device.create_cubemap(&cubemap),
        }
    }

    fn setup() -> (HeadlessDevice, SceneRenderer, AppState) {
        let mut device = HeadlessDevice::new();
        let assets = upload_assets(&mut device);
        let renderer = SceneRenderer::new(assets, 1920.0 / 1080.0, 0.1, 100.0);
        let state = AppState::default();
        (device, renderer, state)
    }

    #[test]
    fn textured_frame_draws_every_object() {
        let (mut device, mut renderer, state) = setup();
        renderer.prepare(&mut device, &state);
        renderer.render_frame(&mut device, &state, 0.0);

        // bear + platform + pipe + 2500 floor tiles + skybox + 5 panes
        assert_eq!(device.draw_count(), 2509);
        assert_eq!(device.draws_with_program(ProgramId::Skybox), 1);
        assert_eq!(device.draws_with_program(ProgramId::Reflective), 0);
        assert_eq!(device.skipped_draw_count(), 0);
    }

    #[test]
    fn reflective_frame_collapses_the_floor() {
        let (mut device, mut renderer, mut state) = setup();
        state.sky_reflective = true;
        renderer.render_frame(&mut device, &state, 0.0);

        // bear + platform + pipe + 1 floor quad + skybox + 5 panes
        assert_eq!(device.draw_count(), 10);
        // Platform and floor both move to the reflective program.
        assert_eq!(device.draws_with_program(ProgramId::Reflective), 2);
    }

    #[test]
    fn light_presence_flags_match_the_rig() {
        let (mut device, mut renderer, state) = setup();
        renderer.render_frame(&mut device, &state, 0.0);

        assert_eq!(device.uniform_int(ProgramId::Scene, "hasDirLight"), Some(1));
        assert_eq!(device.uniform_int(ProgramId::Scene, "hasPointLight"), Some(0));
        assert_eq!(device.uniform_int(ProgramId::Scene, "hasSpotLight"), Some(1));
    }

    #[test]
    fn spot_slots_are_aimed_at_the_bear_from_their_anchors() {
        let (mut device, mut renderer, state) = setup();
        renderer.render_frame(&mut device, &state, 0.0);

        let rig = LightingRig::new();
        let target = catalog::bear_position();
        let mut directions = Vec::new();
        for slot in 1..4 {
            let direction = device
                .uniform_vec3(ProgramId::Scene, &format!("spotLight[{slot}].direction"))
                .unwrap();
            let expected = (target - rig.spot_anchors[slot]).normalize();
            assert_relative_eq!(direction, expected, epsilon = 1e-6);
            directions.push(direction);
        }
        assert!((directions[0] - directions[1]).norm() > 1e-3);
        assert!((directions[1] - directions[2]).norm() > 1e-3);
    }

    #[test]
    fn bear_is_opaque_and_panes_are_half_transparent() {
        let (mut device, mut renderer, state) = setup();
        renderer.render_frame(&mut device, &state, 0.0);

        // The last transparency set before the first draw is 1.0.
        let mut transparency_at_first_draw = None;
        let mut latest = None;
        for command in device.commands() {
            match command {
                DeviceCommand::SetUniform { name, value, .. } if name == "transparency" => {
                    if let UniformValue::Float(v) = value {
                        latest = Some(*v);
                    }
                }
                DeviceCommand::Draw { .. } => {
                    transparency_at_first_draw.get_or_insert(latest);
                }
                _ => {}
            }
        }
        assert_eq!(transparency_at_first_draw, Some(Some(1.0)));
        // The final value, covering the pane draws, is 0.5.
        assert_eq!(device.uniform_float(ProgramId::Scene, "transparency"), Some(0.5));
    }

    #[test]
    fn skybox_draws_under_relaxed_depth_then_restores() {
        let (mut device, mut renderer, state) = setup();
        renderer.render_frame(&mut device, &state, 0.0);

        let commands = device.commands();
        let skybox_draw = commands
            .iter()
            .position(|c| matches!(c, DeviceCommand::Draw { program: ProgramId::Skybox, .. }))
            .expect("skybox draw missing");

        let before = commands[..skybox_draw]
            .iter()
            .rev()
            .find_map(|c| match c {
                DeviceCommand::SetDepthCompare(d) => Some(*d),
                _ => None,
            });
        assert_eq!(before, Some(DepthCompare::LessOrEqual));
        assert_eq!(device.depth_compare(), DepthCompare::Less);
    }

    #[test]
    fn skybox_view_has_no_translation() {
        let (mut device, mut renderer, mut state) = setup();
        state.camera.position = Vec3::new(11.0, 3.0, -7.0);
        renderer.render_frame(&mut device, &state, 0.0);

        let view = device.uniform_mat4(ProgramId::Skybox, "view").unwrap();
        assert_relative_eq!(view[(0, 3)], 0.0);
        assert_relative_eq!(view[(1, 3)], 0.0);
        assert_relative_eq!(view[(2, 3)], 0.0);
    }

    #[test]
    fn panes_draw_back_to_front() {
        let (mut device, mut renderer, mut state) = setup();
        // All five panes sit in front of this camera.
        state.camera.position = Vec3::new(-5.5, 1.7, 20.0);
        renderer.render_frame(&mut device, &state, 0.0);

        let view = state.camera.view_matrix();
        let pane_mesh = renderer.assets.pane;
        let mut latest_model = None;
        let mut pane_depths = Vec::new();
        for command in device.commands() {
            match command {
                DeviceCommand::SetUniform { name, value, .. } if name == "model" => {
                    if let UniformValue::Mat4(m) = value {
                        latest_model = Some(*m);
                    }
                }
                DeviceCommand::Draw { mesh, .. } if *mesh == pane_mesh => {
                    let model = latest_model.expect("pane drawn without a model upload");
                    // Pane transforms translate first, so the fourth column
                    // is the pane's world position.
                    let position = Vec3::new(model[(0, 3)], model[(1, 3)], model[(2, 3)]);
                    pane_depths.push((view * position.push(1.0)).z);
                }
                _ => {}
            }
        }

        assert_eq!(pane_depths.len(), 5);
        for pair in pane_depths.windows(2) {
            assert!(pair[0] <= pair[1], "panes drawn out of order: {pane_depths:?}");
        }
    }

    #[test]
    fn floor_textures_bind_to_units_0_through_3() {
        let (mut device, mut renderer, state) = setup();
        renderer.render_frame(&mut device, &state, 0.0);

        assert_eq!(
            device.uniform_int(ProgramId::Scene, "material.texture_height1"),
            Some(3)
        );
        // The pane texture rebinds unit 0 at the end of the frame; unit 3 is
        // still the height map.
        assert_eq!(device.bound_texture(3), Some(renderer.assets.floor_height));
        assert_eq!(device.bound_texture(0), Some(renderer.assets.window));
    }

    #[test]
    fn mode_toggle_twice_restores_the_frame_shape() {
        let (mut device, mut renderer, mut state) = setup();
        renderer.render_frame(&mut device, &state, 0.0);
        let baseline_scene = device.draws_with_program(ProgramId::Scene);
        let baseline_total = device.draw_count();

        state.toggle_sky_reflective();
        state.toggle_sky_reflective();
        device.clear_commands();
        renderer.render_frame(&mut device, &state, 0.0);

        assert_eq!(device.draws_with_program(ProgramId::Scene), baseline_scene);
        assert_eq!(device.draw_count(), baseline_total);
        assert_eq!(device.draws_with_program(ProgramId::Reflective), 0);
    }

    #[test]
    fn failed_loads_degrade_without_aborting() {
        let mut device = HeadlessDevice::new();
        let mut assets = upload_assets(&mut device);
        assets.bear = MeshHandle::INVALID;
        assets.window = TextureHandle::INVALID;
        let mut renderer = SceneRenderer::new(assets, 16.0 / 9.0, 0.1, 100.0);

        let state = AppState::default();
        renderer.render_frame(&mut device, &state, 0.0);

        assert_eq!(device.skipped_draw_count(), 1);
        assert_eq!(device.draw_count(), 2508);
    }

    #[test]
    fn prepare_points_samplers_at_unit_zero() {
        let (mut device, renderer, state) = setup();
        renderer.prepare(&mut device, &state);

        assert_eq!(device.uniform_int(ProgramId::Skybox, "skybox"), Some(0));
        assert_eq!(device.uniform_int(ProgramId::Reflective, "skybox"), Some(0));
        assert_eq!(device.uniform_bool(ProgramId::Scene, "blinn"), Some(true));
    }

    #[test]
    fn cull_state_follows_the_toggle() {
        let (mut device, mut renderer, mut state) = setup();
        state.cull_front = true;
        renderer.render_frame(&mut device, &state, 0.0);

        let first_cull = device.commands().iter().find_map(|c| match c {
            DeviceCommand::SetCullMode(m) => Some(*m),
            _ => None,
        });
        assert_eq!(first_cull, Some(CullMode::Front));
        // Floor and skybox disabled culling for the rest of the frame.
        assert_eq!(device.cull_mode(), CullMode::Disabled);
    }
}
