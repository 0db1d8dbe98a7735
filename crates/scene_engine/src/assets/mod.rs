//! Asset loading
//!
//! Image decoding, OBJ parsing, and the non-fatal load helpers the
//! application uses at startup. A model or texture that fails to load is
//! reported and replaced by an invalid handle; rendering degrades visually
//! but execution continues.

pub mod image_loader;
pub mod obj_loader;

pub use image_loader::{CubemapData, ImageData};
pub use obj_loader::{ObjError, ObjLoader};

use crate::render::api::{MeshHandle, RenderDevice, TextureHandle};
use std::path::Path;
use thiserror::Error;

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents could not be decoded as an image
    #[error("Image decode failed: {0}")]
    Decode(String),

    /// A cubemap face has different dimensions from the first face
    #[error("cubemap face {face} is {actual:?}, expected {expected:?}")]
    CubemapFaceMismatch {
        /// Index of the offending face
        face: usize,
        /// Dimensions of the first face
        expected: (u32, u32),
        /// Dimensions of the offending face
        actual: (u32, u32),
    },

    /// The file could not be parsed as a model
    #[error("Model load failed: {0}")]
    Model(#[from] ObjError),
}

/// Load a 2D texture, degrading to an invalid handle on failure
pub fn load_texture<P: AsRef<Path>>(device: &mut dyn RenderDevice, path: P) -> TextureHandle {
    let path_ref = path.as_ref();
    match ImageData::from_file(path_ref) {
        Ok(image) => device.create_texture(&image),
        Err(e) => {
            log::warn!("Texture failed to load at path {:?}: {}", path_ref, e);
            TextureHandle::INVALID
        }
    }
}

/// Load a six-face cubemap, degrading to an invalid handle on failure
pub fn load_cubemap<P: AsRef<Path>>(device: &mut dyn RenderDevice, faces: &[P; 6]) -> TextureHandle {
    match CubemapData::from_files(faces) {
        Ok(cubemap) => device.create_cubemap(&cubemap),
        Err(e) => {
            log::warn!("Cubemap failed to load: {}", e);
            TextureHandle::INVALID
        }
    }
}

/// Load an OBJ model, degrading to an invalid handle on failure
pub fn load_model<P: AsRef<Path>>(device: &mut dyn RenderDevice, path: P) -> MeshHandle {
    let path_ref = path.as_ref();
    match ObjLoader::load(path_ref) {
        Ok(mesh) => {
            log::info!(
                "Loaded model {:?} ({} vertices, {} triangles)",
                path_ref,
                mesh.vertices.len(),
                mesh.triangle_count()
            );
            device.create_mesh(&mesh)
        }
        Err(e) => {
            log::warn!("Model failed to load at path {:?}: {}", path_ref, e);
            MeshHandle::INVALID
        }
    }
}
