//! OBJ file loader for 3D models
//!
//! Parses the triangulated, positive-index subset of Wavefront OBJ that the
//! diorama's models use. Faces with more than three vertices are fan
//! triangulated.

use crate::render::primitives::{MeshData, Vertex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// OBJ parsing errors
#[derive(Debug, Error)]
pub enum ObjError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric field failed to parse
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file structure is not usable as a mesh
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Wavefront OBJ loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file into mesh data
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshData, ObjError> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Parse OBJ text from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<MeshData, ObjError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" if parts.len() >= 4 => {
                    positions.push(parse_vec3(&parts[1..4])?);
                }
                "vn" if parts.len() >= 4 => {
                    normals.push(parse_vec3(&parts[1..4])?);
                }
                "vt" if parts.len() >= 3 => {
                    tex_coords.push([parse_float(parts[1])?, parse_float(parts[2])?]);
                }
                "f" if parts.len() >= 4 => {
                    let mut face_indices = Vec::with_capacity(parts.len() - 1);
                    for corner in &parts[1..] {
                        let vertex =
                            parse_face_corner(corner, &positions, &normals, &tex_coords)?;
                        vertices.push(vertex);
                        face_indices.push((vertices.len() - 1) as u32);
                    }
                    // Fan triangulation for quads and larger faces.
                    for i in 1..(face_indices.len() - 1) {
                        indices.push(face_indices[0]);
                        indices.push(face_indices[i]);
                        indices.push(face_indices[i + 1]);
                    }
                }
                _ => {}
            }
        }

        if vertices.is_empty() {
            return Err(ObjError::InvalidFormat("no vertices found".to_string()));
        }

        Ok(MeshData { vertices, indices })
    }
}

fn parse_float(text: &str) -> Result<f32, ObjError> {
    text.parse()
        .map_err(|_| ObjError::Parse(format!("invalid number: {text}")))
}

fn parse_vec3(parts: &[&str]) -> Result<[f32; 3], ObjError> {
    Ok([
        parse_float(parts[0])?,
        parse_float(parts[1])?,
        parse_float(parts[2])?,
    ])
}

/// Resolve one `v/vt/vn` face corner into a vertex
///
/// Texture and normal indices are optional; missing attributes fall back to
/// zero UVs and a +Y normal. Indices are 1-based in OBJ.
fn parse_face_corner(
    corner: &str,
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    tex_coords: &[[f32; 2]],
) -> Result<Vertex, ObjError> {
    let fields: Vec<&str> = corner.split('/').collect();

    let pos_idx = fields[0]
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .ok_or_else(|| ObjError::Parse(format!("invalid position index: {corner}")))?;
    let position = *positions
        .get(pos_idx)
        .ok_or_else(|| ObjError::InvalidFormat(format!("position index out of bounds: {corner}")))?;

    let tex_coord = fields
        .get(1)
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse::<usize>().ok())
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| tex_coords.get(i))
        .copied()
        .unwrap_or([0.0, 0.0]);

    let normal = fields
        .get(2)
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse::<usize>().ok())
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| normals.get(i))
        .copied()
        .unwrap_or([0.0, 1.0, 0.0]);

    Ok(Vertex {
        position,
        normal,
        tex_coord,
    })
}
