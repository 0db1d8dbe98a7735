//! Diorama viewer
//!
//! Loads the scene, opens a window, and drives the frame sequencer with a
//! free-flying camera. Controls: WASD to move, mouse to look, scroll to
//! zoom, F1 toggles the overlay and releases the cursor, C toggles
//! sky-reflective mode, R toggles rotation, Escape quits.

mod app;
mod window;

use scene_engine::core::config::ApplicationConfig;

fn main() {
    scene_engine::foundation::logging::init();

    let config = ApplicationConfig::load_or_default("config.toml");
    log::info!(
        "Starting diorama viewer ({}x{})",
        config.window.width,
        config.window.height
    );

    match app::DioramaApp::new(config) {
        Ok(mut app) => app.run(),
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    }
}
