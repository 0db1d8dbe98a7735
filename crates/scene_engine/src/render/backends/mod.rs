//! Render device implementations

pub mod headless;

pub use headless::{DeviceCommand, HeadlessDevice, UniformValue};
