//! Scene content and frame sequencing

pub mod catalog;
pub mod scene_renderer;
pub mod snapshot;
pub mod state;

pub use catalog::TransparentPane;
pub use scene_renderer::{SceneAssets, SceneRenderer};
pub use snapshot::SnapshotError;
pub use state::AppState;
