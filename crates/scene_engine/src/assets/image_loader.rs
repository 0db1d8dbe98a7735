//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files into RGBA8 pixel buffers ready for device
//! upload, for both 2D textures and six-face cubemaps.

use crate::assets::AssetError;
use std::path::Path;

/// Loaded image data ready for device upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path, converting to RGBA8
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::Decode(format!("{:?}: {}", path_ref, e)))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for tests and placeholders)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Six loaded cubemap faces in right/left/top/bottom/front/back order
#[derive(Debug, Clone)]
pub struct CubemapData {
    /// Face images, all with identical dimensions
    pub faces: [ImageData; 6],
}

impl CubemapData {
    /// Load a cubemap from six face image paths
    ///
    /// Face order is right, left, top, bottom, front, back. All faces must
    /// decode to the same dimensions.
    pub fn from_files<P: AsRef<Path>>(paths: &[P; 6]) -> Result<Self, AssetError> {
        let mut loaded = Vec::with_capacity(6);
        for path in paths {
            loaded.push(ImageData::from_file(path)?);
        }

        let (width, height) = (loaded[0].width, loaded[0].height);
        for (index, face) in loaded.iter().enumerate() {
            if face.width != width || face.height != height {
                return Err(AssetError::CubemapFaceMismatch {
                    face: index,
                    expected: (width, height),
                    actual: (face.width, face.height),
                });
            }
        }

        let faces: [ImageData; 6] = loaded
            .try_into()
            .map_err(|_| AssetError::Decode("cubemap face count".to_string()))?;
        Ok(Self { faces })
    }

    /// Edge length shared by all faces
    pub fn face_size(&self) -> (u32, u32) {
        (self.faces[0].width, self.faces[0].height)
    }
}
