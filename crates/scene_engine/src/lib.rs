//! # Scene Engine
//!
//! Scene, lighting, and frame-sequencing core for an interactive 3D diorama
//! renderer. The crate owns everything between the input events and the
//! graphics API: the light parameter store, the fixed scene catalog, the
//! tangent-space quad builder, a fly camera, and the per-frame render
//! sequencer that turns all of it into an ordered stream of device calls.
//!
//! The GPU sits behind the [`render::api::RenderDevice`] trait. The crate
//! ships a command-recording implementation
//! ([`render::backends::HeadlessDevice`]) that the tests and the default
//! binary run against; a hardware device plugs in at the same seam.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod assets;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::core::config::ApplicationConfig;
    pub use crate::foundation::{
        math::{Mat4, Mat4Ext, Vec2, Vec3},
        time::Timer,
    };
    pub use crate::render::{
        api::{CullMode, DepthCompare, MeshHandle, ProgramId, RenderDevice, TextureHandle},
        lighting::{DirectionalLight, LightMask, LightingRig, PointLight, SpotLight},
        primitives::{CameraMovement, FlyCamera, MeshData},
    };
    pub use crate::scene::{
        scene_renderer::{SceneAssets, SceneRenderer},
        state::AppState,
    };
}
