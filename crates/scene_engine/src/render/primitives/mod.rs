//! Geometry and camera primitives

pub mod camera;
pub mod mesh;
pub mod quad;

pub use camera::{CameraMovement, FlyCamera};
pub use mesh::{MeshData, Vertex};
pub use quad::{build_quad, tangent_basis, unit_quad, GeometryError, QuadVertex};
