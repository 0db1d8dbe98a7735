//! # Application Configuration
//!
//! Consolidates the configurable parameters of the renderer into a single,
//! serializable structure: window setup, projection planes, asset search
//! directory, and camera feel. Values not present in the config file keep
//! their compiled-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file could not be parsed as TOML
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Window creation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Window title string
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "Diorama".to_string(),
        }
    }
}

impl WindowConfig {
    /// Aspect ratio (width / height) used for the projection matrix
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Projection parameters for the scene camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Distance to the near clipping plane
    pub near_plane: f32,
    /// Distance to the far clipping plane
    pub far_plane: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// Asset loading parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Base directory for models and textures
    pub assets_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: "resources".to_string(),
        }
    }
}

/// Camera feel parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Keyboard translation speed in world units per second
    pub movement_speed: f32,
    /// Mouse look sensitivity
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            movement_speed: 7.0,
            mouse_sensitivity: 0.1,
        }
    }
}

/// Top-level configuration for the application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window setup
    pub window: WindowConfig,
    /// Projection planes
    pub renderer: RendererConfig,
    /// Asset locations
    pub assets: AssetConfig,
    /// Camera feel
    pub camera: CameraConfig,
}

impl ApplicationConfig {
    /// Load configuration from a TOML file
    ///
    /// Fields absent from the file keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults
    ///
    /// A missing file is not an error; a malformed file is logged and
    /// defaults are used.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            log::debug!("No config file at {:?}, using defaults", path_ref);
            return Self::default();
        }
        match Self::load_from_file(path_ref) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config from {:?}: {}, using defaults", path_ref, e);
                Self::default()
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(
                "window dimensions must be nonzero".to_string(),
            ));
        }
        if self.renderer.near_plane <= 0.0 {
            return Err(ConfigError::Invalid(
                "near plane must be positive".to_string(),
            ));
        }
        if self.renderer.far_plane <= self.renderer.near_plane {
            return Err(ConfigError::Invalid(
                "far plane must be beyond the near plane".to_string(),
            ));
        }
        Ok(())
    }
}
