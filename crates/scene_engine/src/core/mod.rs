//! Core engine configuration

pub mod config;

pub use config::{ApplicationConfig, AssetConfig, CameraConfig, ConfigError, RendererConfig, WindowConfig};
