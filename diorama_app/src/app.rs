//! Application wiring: assets, input mapping, and the frame loop

use crate::window::{Window, WindowError};
use glfw::{Action, Key, WindowEvent};
use scene_engine::assets::{load_cubemap, load_model, load_texture};
use scene_engine::core::config::ApplicationConfig;
use scene_engine::foundation::time::Timer;
use scene_engine::render::api::{MeshHandle, RenderDevice};
use scene_engine::render::backends::HeadlessDevice;
use scene_engine::render::primitives::{unit_quad, CameraMovement, MeshData};
use scene_engine::scene::scene_renderer::{SceneAssets, SceneRenderer};
use scene_engine::scene::snapshot;
use scene_engine::scene::state::AppState;
use std::path::{Path, PathBuf};

/// The running application
pub struct DioramaApp {
    window: Window,
    device: HeadlessDevice,
    renderer: SceneRenderer,
    state: AppState,
    timer: Timer,
    last_cursor: Option<(f64, f64)>,
    snapshot_path: PathBuf,
}

impl DioramaApp {
    /// Create the window, upload the scene, and restore the snapshot
    pub fn new(config: ApplicationConfig) -> Result<Self, WindowError> {
        let mut window = Window::new(
            &config.window.title,
            config.window.width,
            config.window.height,
        )?;

        let mut device = HeadlessDevice::new();
        let assets_dir = Path::new(&config.assets.assets_dir);
        let assets = load_scene_assets(&mut device, assets_dir);
        log::info!(
            "Scene uploaded: {} meshes, {} textures",
            device.mesh_count(),
            device.texture_count()
        );

        let mut state = AppState::default();
        state.camera.movement_speed = config.camera.movement_speed;
        state.camera.mouse_sensitivity = config.camera.mouse_sensitivity;

        let snapshot_path = assets_dir.join("program_state.txt");
        if let Err(e) = snapshot::load(&mut state, &snapshot_path) {
            log::warn!("Ignoring snapshot at {:?}: {}", snapshot_path, e);
        }
        window.set_cursor_captured(!state.overlay_enabled);

        let mut renderer = SceneRenderer::new(
            assets,
            config.window.aspect_ratio(),
            config.renderer.near_plane,
            config.renderer.far_plane,
        );
        renderer.prepare(&mut device, &state);

        Ok(Self {
            window,
            device,
            renderer,
            state,
            timer: Timer::new(),
            last_cursor: None,
            snapshot_path,
        })
    }

    /// Run the frame loop until the window closes, then save the snapshot
    pub fn run(&mut self) {
        log::info!("Entering frame loop");
        while !self.window.should_close() {
            self.frame();
        }
        if let Err(e) = snapshot::save(&self.state, &self.snapshot_path) {
            log::warn!("Failed to save snapshot to {:?}: {}", self.snapshot_path, e);
        }
    }

    fn frame(&mut self) {
        self.timer.update();
        let delta_time = self.timer.delta_time();

        self.process_held_keys(delta_time);
        self.window.poll_events();
        for (_, event) in self.window.take_events() {
            self.handle_event(event);
        }

        self.renderer
            .render_frame(&mut self.device, &self.state, self.timer.total_time());
        self.window.swap_buffers();
    }

    /// WASD camera translation, polled so held keys repeat every frame
    fn process_held_keys(&mut self, delta_time: f32) {
        let camera = &mut self.state.camera;
        if self.window.is_key_down(Key::W) {
            camera.process_keyboard(CameraMovement::Forward, delta_time);
        }
        if self.window.is_key_down(Key::S) {
            camera.process_keyboard(CameraMovement::Backward, delta_time);
        }
        if self.window.is_key_down(Key::A) {
            camera.process_keyboard(CameraMovement::Left, delta_time);
        }
        if self.window.is_key_down(Key::D) {
            camera.process_keyboard(CameraMovement::Right, delta_time);
        }
    }

    fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                self.window.set_should_close();
            }
            WindowEvent::Key(Key::F1, _, Action::Press, _) => {
                self.state.toggle_overlay();
                self.window.set_cursor_captured(!self.state.overlay_enabled);
            }
            WindowEvent::Key(Key::C, _, Action::Press, _) => {
                self.state.toggle_sky_reflective();
            }
            WindowEvent::Key(Key::R, _, Action::Press, _) => {
                self.state.toggle_rotation();
            }
            WindowEvent::CursorPos(x, y) => self.handle_cursor(x, y),
            WindowEvent::Scroll(_, y_offset) => {
                self.state.camera.process_scroll(y_offset as f32);
            }
            WindowEvent::FramebufferSize(width, height) => {
                if width > 0 && height > 0 {
                    self.renderer.set_aspect_ratio(width as f32 / height as f32);
                }
            }
            _ => {}
        }
    }

    /// Mouse look; the first event only seeds the reference position
    fn handle_cursor(&mut self, x: f64, y: f64) {
        let (dx, dy) = match self.last_cursor {
            // Screen y grows downward, so the vertical delta is reversed.
            Some((last_x, last_y)) => ((x - last_x) as f32, (last_y - y) as f32),
            None => (0.0, 0.0),
        };
        self.last_cursor = Some((x, y));

        if self.state.mouse_look_enabled {
            self.state.camera.process_mouse(dx, dy);
        }
    }
}

/// Load every model and texture the diorama draws
///
/// Loads are non-fatal: anything that fails is logged and replaced by an
/// invalid handle, and the frame loop runs regardless.
fn load_scene_assets(device: &mut HeadlessDevice, assets_dir: &Path) -> SceneAssets {
    let objects = assets_dir.join("objects");
    let textures = assets_dir.join("textures");

    let floor_quad = match unit_quad() {
        Ok(vertices) => device.create_quad(&vertices),
        Err(e) => {
            log::warn!("Floor quad construction failed: {}", e);
            MeshHandle::INVALID
        }
    };

    let beach = textures.join("beach_texture");
    let skybox_dir = textures.join("skybox");
    let faces = [
        skybox_dir.join("right.png"),
        skybox_dir.join("left.png"),
        skybox_dir.join("top.png"),
        skybox_dir.join("bottom.png"),
        skybox_dir.join("front.png"),
        skybox_dir.join("back.png"),
    ];

    SceneAssets {
        bear: load_model(
            device,
            objects.join("circus_bear/14089_Circus_Bear_Standing_on_large_ball_v1_l2.obj"),
        ),
        platform: load_model(device, objects.join("platform/Rotating_Light_Platform_Final.obj")),
        pipe: load_model(device, objects.join("tube/tube.obj")),
        floor_quad,
        skybox: device.create_mesh(&MeshData::skybox_cube()),
        pane: device.create_mesh(&MeshData::window_pane()),
        platform_diffuse: load_texture(device, objects.join("platform/lambert1_metallic.jpg")),
        platform_specular: load_texture(device, objects.join("platform/lambert1_roughness.jpg")),
        platform_normal: load_texture(device, objects.join("platform/lambert1_normal.png")),
        floor_diffuse: load_texture(
            device,
            beach.join("Seamless_beach_sand_footsteps_texture.jpg"),
        ),
        floor_specular: load_texture(
            device,
            beach.join("Seamless_beach_sand_footsteps_texture_SPECULAR.jpg"),
        ),
        floor_normal: load_texture(
            device,
            beach.join("Seamless_beach_sand_footsteps_texture_NORMAL.jpg"),
        ),
        floor_height: load_texture(
            device,
            beach.join("Seamless_beach_sand_footsteps_texture_DISP.jpg"),
        ),
        window: load_texture(device, textures.join("window.png")),
        skybox_cubemap: load_cubemap(device, &faces),
    }
}
