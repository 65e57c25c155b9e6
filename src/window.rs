//! Window manager
//!
//! Owns the GLFW window, the renderer and the model, and drives the main
//! loop. Context creation tries OpenGL 4.6 core first and falls back to a
//! Vulkan instance/surface when no GL context is available.

use crate::config::AppConfig;
use crate::model::Model;
use crate::render::{RenderError, Renderer};
use crate::vulkan::{VulkanError, VulkanFallback};
use glfw::{Action, Context, Key, MouseButton, WindowEvent};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("GLFW initialization failed")]
    InitializationFailed,

    #[error("window creation failed for both OpenGL and Vulkan")]
    CreationFailed,

    #[error("Vulkan is not supported")]
    VulkanUnsupported,

    #[error("Vulkan fallback failed: {0}")]
    Vulkan(#[from] VulkanError),

    #[error("renderer init failed: {0}")]
    Render(#[from] RenderError),
}

/// Owns the OS window and everything that hangs off it.
///
/// On the OpenGL path `renderer` is populated; on the Vulkan fallback path
/// only `vulkan` is, since this skeleton has no Vulkan renderer.
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    renderer: Option<Renderer>,
    vulkan: Option<VulkanFallback>,
    model: Model,
}

impl Window {
    /// Create the window and bring up a graphics context.
    ///
    /// Tries an OpenGL 4.6 core-profile context first. If window creation
    /// fails and Vulkan is supported, re-creates the window without a client
    /// API and builds the Vulkan instance/surface instead. Failure of both
    /// paths, or of renderer init, is fatal.
    pub fn new(config: &AppConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::log_errors).map_err(|_| WindowError::InitializationFailed)?;

        let width = config.window.width;
        let height = config.window.height;
        let title = config.window.title.as_str();

        glfw.window_hint(glfw::WindowHint::ContextVersion(4, 6));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));

        let (mut window, events, renderer, vulkan) =
            match glfw.create_window(width, height, title, glfw::WindowMode::Windowed) {
                Some((mut window, events)) => {
                    window.make_current();
                    let gl = unsafe {
                        glow::Context::from_loader_function(|s| {
                            window.get_proc_address(s) as *const _
                        })
                    };
                    let renderer = Renderer::new(gl, width, height, &config.assets)?;
                    (window, events, Some(renderer), None)
                }
                None => {
                    log::warn!("no OpenGL context available, trying Vulkan");
                    if !glfw.vulkan_supported() {
                        return Err(WindowError::VulkanUnsupported);
                    }

                    // hints apply to the next window created
                    glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
                    glfw.window_hint(glfw::WindowHint::Resizable(false));
                    let (mut window, events) = glfw
                        .create_window(width, height, title, glfw::WindowMode::Windowed)
                        .ok_or(WindowError::CreationFailed)?;

                    let vulkan = VulkanFallback::new(&glfw, &mut window, title)?;
                    (window, events, None, Some(vulkan))
                }
            };

        window.set_pos_polling(true);
        window.set_iconify_polling(true);
        window.set_maximize_polling(true);
        window.set_close_polling(true);
        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_cursor_enter_polling(true);
        window.set_framebuffer_size_polling(true);

        let model = Model::new();
        log::info!("mockup model data loaded");

        if renderer.is_some() {
            log::info!("window with OpenGL 4.6 successfully initialized");
        } else {
            log::info!("window with Vulkan fallback successfully initialized");
        }

        Ok(Self {
            glfw,
            window,
            events,
            renderer,
            vulkan,
            model,
        })
    }

    /// Run the main loop until a close request is observed.
    ///
    /// The model's mesh is uploaded into the renderer exactly once before
    /// looping. Per iteration: draw, present, poll and dispatch events.
    pub fn run(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            // force vsync
            self.glfw.set_swap_interval(glfw::SwapInterval::Sync(1));
            renderer.upload_data(self.model.vertex_data());
        } else {
            log::warn!("Vulkan fallback active, nothing will be drawn");
        }

        while !self.window.should_close() {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.draw();
                self.window.swap_buffers();
            }

            self.glfw.poll_events();
            let events: Vec<WindowEvent> = glfw::flush_messages(&self.events)
                .map(|(_, event)| event)
                .collect();
            for event in events {
                self.handle_event(event);
            }
        }
    }

    /// Tear down in reverse construction order. Safe after a partially
    /// failed init and idempotent: renderer and Vulkan objects are taken
    /// out of their slots on first call.
    pub fn cleanup(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.cleanup();
        }
        if let Some(mut vulkan) = self.vulkan.take() {
            vulkan.destroy();
        }
        log::info!("terminating window");
    }

    fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Pos(x, y) => self.handle_window_move(x, y),
            WindowEvent::Iconify(minimized) => self.handle_window_minimized(minimized),
            WindowEvent::Maximize(maximized) => self.handle_window_maximized(maximized),
            WindowEvent::Close => self.handle_window_close(),
            WindowEvent::Key(key, scancode, action, _) => self.handle_key(key, scancode, action),
            WindowEvent::MouseButton(button, action, _) => {
                self.handle_mouse_button(button, action);
            }
            WindowEvent::CursorPos(x, y) => self.handle_mouse_position(x, y),
            WindowEvent::CursorEnter(entered) => self.handle_mouse_enter_leave(entered),
            WindowEvent::FramebufferSize(width, height) => self.handle_resize(width, height),
            _ => {}
        }
    }

    fn handle_window_move(&mut self, x: i32, y: i32) {
        log::info!("window has been moved to {}/{}", x, y);
    }

    fn handle_window_minimized(&mut self, minimized: bool) {
        if minimized {
            log::info!("window has been minimized");
        } else {
            log::info!("window has been restored");
        }
    }

    fn handle_window_maximized(&mut self, maximized: bool) {
        if maximized {
            log::info!("window has been maximized");
        } else {
            log::info!("window has been restored");
        }
    }

    fn handle_window_close(&mut self) {
        log::info!("window got close event... bye");
    }

    fn handle_key(&mut self, key: Key, scancode: glfw::Scancode, action: Action) {
        log::info!(
            "key {:?} (scancode {}) {}",
            key,
            scancode,
            action_name(action)
        );

        if is_exit_request(key, action) {
            self.window.set_should_close(true);
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, action: Action) {
        log::info!(
            "{} mouse button ({:?}) {}",
            button_name(button),
            button,
            action_name(action)
        );
    }

    fn handle_mouse_position(&mut self, x: f64, y: f64) {
        log::info!("mouse is at position {}/{}", x, y);
    }

    fn handle_mouse_enter_leave(&mut self, entered: bool) {
        if entered {
            log::info!("mouse entered window");
        } else {
            log::info!("mouse left window");
        }
    }

    fn handle_resize(&mut self, width: i32, height: i32) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_size(width.max(0) as u32, height.max(0) as u32);
        }
    }
}

/// Escape pressed means the user wants out; everything else does not.
fn is_exit_request(key: Key, action: Action) -> bool {
    key == Key::Escape && action == Action::Press
}

fn action_name(action: Action) -> &'static str {
    match action {
        Action::Press => "pressed",
        Action::Release => "released",
        Action::Repeat => "repeated",
    }
}

fn button_name(button: MouseButton) -> &'static str {
    match button {
        MouseButton::Button1 => "left",
        MouseButton::Button2 => "right",
        MouseButton::Button3 => "middle",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_request_on_escape_press() {
        assert!(is_exit_request(Key::Escape, Action::Press));
    }

    #[test]
    fn test_no_exit_request_otherwise() {
        assert!(!is_exit_request(Key::Escape, Action::Release));
        assert!(!is_exit_request(Key::Escape, Action::Repeat));
        assert!(!is_exit_request(Key::A, Action::Press));
        assert!(!is_exit_request(Key::Enter, Action::Press));
    }

    #[test]
    fn test_action_names() {
        assert_eq!(action_name(Action::Press), "pressed");
        assert_eq!(action_name(Action::Release), "released");
        assert_eq!(action_name(Action::Repeat), "repeated");
    }

    #[test]
    fn test_button_names() {
        assert_eq!(button_name(MouseButton::Button1), "left");
        assert_eq!(button_name(MouseButton::Button2), "right");
        assert_eq!(button_name(MouseButton::Button3), "middle");
        assert_eq!(button_name(MouseButton::Button8), "other");
    }
}
