//! GLFW-based window management
//!
//! Wraps window creation, event polling, and cursor capture. Failure to
//! initialize GLFW or create the window is the one fatal startup error in
//! the application.

use glfw::Context;
use thiserror::Error;

/// Window management errors
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("GLFW initialization failed")]
    InitializationFailed,

    #[error("Window creation failed")]
    CreationFailed,
}

/// GLFW window wrapper with event collection
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::Resizable(true));
        glfw.window_hint(glfw::WindowHint::Samples(Some(4)));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    pub fn set_should_close(&mut self) {
        self.window.set_should_close(true);
    }

    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain the pending window events into a vector
    pub fn take_events(&mut self) -> Vec<(f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events).collect()
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Capture the cursor for mouse look, or release it for the overlay
    pub fn set_cursor_captured(&mut self, captured: bool) {
        let mode = if captured {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        };
        self.window.set_cursor_mode(mode);
    }

    /// Whether a key is held down right now
    pub fn is_key_down(&self, key: glfw::Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }
}
