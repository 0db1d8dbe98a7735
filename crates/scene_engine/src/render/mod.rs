//! Rendering layer: device seam, light parameters, and geometry primitives

pub mod api;
pub mod backends;
pub mod lighting;
pub mod primitives;
pub mod uniforms;

pub use api::{CullMode, DepthCompare, MeshHandle, ProgramId, RenderDevice, TextureHandle};
pub use lighting::{DirectionalLight, LightMask, LightingRig, PointLight, SpotLight};
pub use primitives::{CameraMovement, FlyCamera, MeshData, QuadVertex, Vertex};
