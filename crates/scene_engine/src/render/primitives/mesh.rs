//! Mesh data structures
//!
//! Pure CPU-side geometry, handed to a [`RenderDevice`](crate::render::api::RenderDevice)
//! for upload. Vertices use `#[repr(C)]` + bytemuck so the device can view
//! them as raw bytes without copying.

use bytemuck::{Pod, Zeroable};

/// 3D vertex with position, normal, and texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Triangle mesh ready for device upload
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex array
    pub vertices: Vec<Vertex>,
    /// Triangle indices into the vertex array; empty for unindexed meshes
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertices.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// Unit cube drawn from the inside, used as skybox geometry
    ///
    /// Matches the canonical 36-vertex skybox layout; only positions are
    /// meaningful (the skybox program samples by direction).
    pub fn skybox_cube() -> Self {
        #[rustfmt::skip]
        const POSITIONS: [[f32; 3]; 36] = [
            [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0],
            [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],

            [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
            [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0],

            [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0],
            [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],

            [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0],
            [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],

            [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0],
            [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],

            [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0],
            [ 1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
        ];

        Self {
            vertices: POSITIONS
                .iter()
                .map(|&p| Vertex::new(p, [0.0, 0.0, 0.0], [0.0, 0.0]))
                .collect(),
            indices: Vec::new(),
        }
    }

    /// Window-pane quad for the transparent glass surfaces
    ///
    /// Spans x in [0, 1] and y in [-0.5, 0.5] with a +Y normal. The V
    /// coordinates are flipped because the glass texture is stored upside
    /// down.
    pub fn window_pane() -> Self {
        let vertices = vec![
            Vertex::new([0.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([0.0, -0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
            Vertex::new([1.0, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([1.0, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([1.0, 0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
        ];
        Self {
            vertices,
            indices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skybox_cube_has_36_vertices() {
        let cube = MeshData::skybox_cube();
        assert_eq!(cube.vertices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        // Every corner sits on the unit cube.
        for v in &cube.vertices {
            for c in v.position {
                assert_eq!(c.abs(), 1.0);
            }
        }
    }

    #[test]
    fn window_pane_spans_unit_width() {
        let pane = MeshData::window_pane();
        assert_eq!(pane.vertices.len(), 6);
        let min_x = pane.vertices.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = pane.vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!(min_x, 0.0);
        assert_eq!(max_x, 1.0);
    }

    #[test]
    fn vertex_is_pod() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 8 * std::mem::size_of::<f32>());
    }
}
